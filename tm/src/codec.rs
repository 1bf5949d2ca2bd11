//! Import/export snapshot codec
//!
//! Serializes the whole state (tasks plus history) to a self-describing JSON
//! document and parses such documents back. Parsing is fail-closed: a
//! snapshot either deserializes into a well-formed [`State`] with unique
//! task ids, or the caller gets an [`ImportError`] and keeps its current
//! state untouched.

use std::collections::HashSet;

use thiserror::Error;
use tracing::debug;

use crate::state::State;
use crate::task::TaskId;

/// Errors from parsing an imported snapshot
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("invalid snapshot: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate task id {0} in snapshot")]
    DuplicateId(TaskId),
}

/// Serialize the entire state to a human-readable JSON snapshot
pub fn export_state(state: &State) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(state)
}

/// Parse a snapshot back into a state.
///
/// The returned value is intended to be dispatched as
/// [`Action::LoadState`](crate::reducer::Action::LoadState); on error the
/// caller's current state is simply left alone.
pub fn import_state(input: &str) -> Result<State, ImportError> {
    let state: State = serde_json::from_str(input)?;

    let mut seen = HashSet::new();
    for task in &state.tasks {
        if !seen.insert(task.id) {
            return Err(ImportError::DuplicateId(task.id));
        }
    }

    debug!(
        tasks = state.tasks.len(),
        history = state.history.len(),
        "Parsed snapshot"
    );
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reducer::{Action, reduce};
    use crate::task::Task;
    use chrono::{TimeZone, Utc};

    fn populated_state() -> State {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let state = reduce(
            State::default(),
            Action::AddTask(Task::new(1, "first", now).unwrap()),
            now,
        );
        let state = reduce(
            state,
            Action::AddTask(Task::new(2, "second", now).unwrap().with_category("work")),
            now,
        );
        reduce(state, Action::ToggleComplete(1), now)
    }

    #[test]
    fn test_export_import_round_trip() {
        let state = populated_state();
        let snapshot = export_state(&state).unwrap();
        let back = import_state(&snapshot).unwrap();
        assert_eq!(state, back);
    }

    #[test]
    fn test_import_rejects_malformed_input() {
        assert!(matches!(import_state("not json at all"), Err(ImportError::Parse(_))));
        assert!(matches!(import_state("{\"tasks\": 42}"), Err(ImportError::Parse(_))));
    }

    #[test]
    fn test_import_rejects_duplicate_ids() {
        let mut state = populated_state();
        let dup = state.tasks[0].clone();
        state.tasks.push(dup);

        let snapshot = export_state(&state).unwrap();
        assert!(matches!(import_state(&snapshot), Err(ImportError::DuplicateId(1))));
    }

    #[test]
    fn test_import_accepts_missing_sections() {
        // Both sections default to empty
        let state = import_state("{}").unwrap();
        assert!(state.tasks.is_empty());
        assert!(state.history.is_empty());
    }
}
