//! Task store: the complete state snapshot
//!
//! [`State`] holds the ordered task collection plus the append-only audit
//! history. It is pure data; the only mutation path is
//! [`reduce`](crate::reducer::reduce), which replaces the whole value.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::task::{Task, TaskId};

/// Kind of mutation recorded in the audit history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionKind {
    Add,
    Toggle,
    Delete,
    Update,
    ClearCompleted,
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Add => write!(f, "ADD"),
            Self::Toggle => write!(f, "TOGGLE"),
            Self::Delete => write!(f, "DELETE"),
            Self::Update => write!(f, "UPDATE"),
            Self::ClearCompleted => write!(f, "CLEAR_COMPLETED"),
        }
    }
}

/// Immutable audit record of a past mutation.
///
/// Entries are never modified or removed once appended; the log only grows
/// (until a wholesale state replacement discards it).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// What happened
    pub action: ActionKind,

    /// Snapshot of the affected task, when one is recorded (add, delete)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<Task>,

    /// Id of the affected task, when only the id is recorded (toggle, update)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<TaskId>,

    /// When the mutation happened
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    /// Entry recording a full task snapshot
    pub fn for_task(action: ActionKind, task: Task, now: DateTime<Utc>) -> Self {
        Self {
            action,
            task: Some(task),
            task_id: None,
            timestamp: now,
        }
    }

    /// Entry recording only a task id
    pub fn for_id(action: ActionKind, id: TaskId, now: DateTime<Utc>) -> Self {
        Self {
            action,
            task: None,
            task_id: Some(id),
            timestamp: now,
        }
    }

    /// Entry with no task reference (e.g. clear-completed)
    pub fn bare(action: ActionKind, now: DateTime<Utc>) -> Self {
        Self {
            action,
            task: None,
            task_id: None,
            timestamp: now,
        }
    }
}

/// Complete snapshot of all tasks plus the audit history.
///
/// Tasks are kept in insertion order, which is creation order. Ids are
/// unique within a state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    #[serde(default)]
    pub tasks: Vec<Task>,

    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

impl State {
    /// Look up a task by id
    pub fn find(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// True when a task with the given id exists
    pub fn contains(&self, id: TaskId) -> bool {
        self.find(id).is_some()
    }

    /// Next id for a task created at `now`.
    ///
    /// Uses the wall-clock millisecond, bumped past the largest existing id
    /// so ids stay strictly monotonic even when two tasks are created within
    /// the same millisecond.
    pub fn next_task_id(&self, now: DateTime<Utc>) -> TaskId {
        let floor = self.tasks.iter().map(|t| t.id).max().map_or(0, |max| max + 1);
        floor.max(now.timestamp_millis() as TaskId)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_find_and_contains() {
        let mut state = State::default();
        state.tasks.push(Task::new(7, "find me", now()).unwrap());

        assert!(state.contains(7));
        assert_eq!(state.find(7).map(|t| t.text.as_str()), Some("find me"));
        assert!(!state.contains(8));
    }

    #[test]
    fn test_next_task_id_uses_clock() {
        let state = State::default();
        assert_eq!(state.next_task_id(now()), now().timestamp_millis() as u64);
    }

    #[test]
    fn test_next_task_id_stays_monotonic() {
        let mut state = State::default();
        let id = state.next_task_id(now());
        state.tasks.push(Task::new(id, "first", now()).unwrap());

        // Same clock tick still yields a strictly larger id
        let next = state.next_task_id(now());
        assert!(next > id);
    }

    #[test]
    fn test_action_kind_display_and_serde() {
        assert_eq!(ActionKind::Add.to_string(), "ADD");
        assert_eq!(ActionKind::ClearCompleted.to_string(), "CLEAR_COMPLETED");

        let json = serde_json::to_string(&ActionKind::ClearCompleted).unwrap();
        assert_eq!(json, "\"CLEAR_COMPLETED\"");
        let back: ActionKind = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ActionKind::ClearCompleted);
    }

    #[test]
    fn test_history_entry_serde() {
        let entry = HistoryEntry::for_id(ActionKind::Toggle, 42, now());
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"taskId\":42"));
        // Absent snapshot is omitted entirely
        assert!(!json.contains("\"task\":"));

        let back: HistoryEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(entry, back);
    }
}
