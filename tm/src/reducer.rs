//! Pure state-transition logic
//!
//! [`reduce`] is the sole mutation path for the task store. It consumes the
//! current [`State`], applies one [`Action`], and returns the replacement
//! state. Timestamps come from the caller-provided clock, never from the
//! ambient wall clock, so identical inputs always yield identical outputs.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::state::{ActionKind, HistoryEntry, State};
use crate::task::{Task, TaskId, TaskPatch};

/// One mutation of the task store.
///
/// A closed set: the reducer matches exhaustively, so an unhandled kind is a
/// compile-time error.
#[derive(Debug, Clone)]
pub enum Action {
    /// Append a fully-formed task (id pre-assigned by the caller)
    AddTask(Task),
    /// Flip `completed` on the matching task
    ToggleComplete(TaskId),
    /// Remove the matching task
    Delete(TaskId),
    /// Merge a partial field set into the matching task
    UpdateFields { id: TaskId, patch: TaskPatch },
    /// Flip `starred` on the matching task
    ToggleStar(TaskId),
    /// Remove every completed task
    ClearCompleted,
    /// Replace the entire state wholesale, history included
    LoadState(State),
}

/// Apply one action to the state, returning the new state.
///
/// Unknown-id operations never fail: they degrade to no-ops on the task
/// list. Toggle and update still record a history entry for the requested
/// id; delete records nothing when the task is absent.
///
/// Star-toggling deliberately appends no history entry, matching the
/// observed product behavior. Whether that asymmetry is intended is an open
/// product question; it is preserved here rather than unified.
pub fn reduce(mut state: State, action: Action, now: DateTime<Utc>) -> State {
    match action {
        Action::AddTask(task) => {
            debug!(id = task.id, "reduce: add task");
            state.history.push(HistoryEntry::for_task(ActionKind::Add, task.clone(), now));
            state.tasks.push(task);
            state
        }
        Action::ToggleComplete(id) => {
            debug!(id, "reduce: toggle complete");
            if let Some(task) = state.tasks.iter_mut().find(|t| t.id == id) {
                task.completed = !task.completed;
            }
            state.history.push(HistoryEntry::for_id(ActionKind::Toggle, id, now));
            state
        }
        Action::Delete(id) => {
            debug!(id, "reduce: delete task");
            if let Some(pos) = state.tasks.iter().position(|t| t.id == id) {
                let removed = state.tasks.remove(pos);
                state.history.push(HistoryEntry::for_task(ActionKind::Delete, removed, now));
            }
            state
        }
        Action::UpdateFields { id, patch } => {
            debug!(id, "reduce: update fields");
            if let Some(task) = state.tasks.iter_mut().find(|t| t.id == id) {
                task.apply(&patch);
            }
            state.history.push(HistoryEntry::for_id(ActionKind::Update, id, now));
            state
        }
        Action::ToggleStar(id) => {
            debug!(id, "reduce: toggle star");
            if let Some(task) = state.tasks.iter_mut().find(|t| t.id == id) {
                task.starred = !task.starred;
            }
            // No history entry for starring
            state
        }
        Action::ClearCompleted => {
            debug!("reduce: clear completed");
            state.tasks.retain(|t| !t.completed);
            state.history.push(HistoryEntry::bare(ActionKind::ClearCompleted, now));
            state
        }
        Action::LoadState(loaded) => {
            debug!(
                tasks = loaded.tasks.len(),
                history = loaded.history.len(),
                "reduce: load state"
            );
            loaded
        }
    }
}
