//! Aggregate progress counters
//!
//! Recomputed in full from the current state on every call. Fine at
//! personal-list sizes; an incremental design would be needed if the task
//! list ever grew unbounded.

use chrono::NaiveDate;
use serde::Serialize;

use crate::state::State;
use crate::task::Priority;

/// Aggregate counters derived from the current state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    /// Total number of tasks
    pub total: usize,
    /// Completed tasks
    pub completed: usize,
    /// Open tasks
    pub active: usize,
    /// Completed share in whole percent, 0 for an empty list
    pub progress: u32,
    /// Open tasks with high priority
    pub high_priority_active: usize,
    /// Open tasks whose due date is strictly in the past
    pub overdue_active: usize,
    /// Starred tasks
    pub starred: usize,
}

/// Compute the aggregate counters.
///
/// `today` is supplied by the caller so overdue counting stays testable.
pub fn stats(state: &State, today: NaiveDate) -> Stats {
    let total = state.tasks.len();
    let completed = state.tasks.iter().filter(|t| t.completed).count();
    let progress = if total == 0 {
        0
    } else {
        ((completed as f64 / total as f64) * 100.0).round() as u32
    };

    Stats {
        total,
        completed,
        active: total - completed,
        progress,
        high_priority_active: state
            .tasks
            .iter()
            .filter(|t| !t.completed && t.priority == Priority::High)
            .count(),
        overdue_active: state.tasks.iter().filter(|t| t.is_overdue(today)).count(),
        starred: state.tasks.iter().filter(|t| t.starred).count(),
    }
}
