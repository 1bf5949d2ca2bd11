//! Derived task views: filter, search, sort
//!
//! Stateless and recomputed on demand; the input state is never mutated.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::state::State;
use crate::task::Task;

/// Which tasks to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    /// Every task
    #[default]
    All,
    /// Not yet completed
    Active,
    /// Completed
    Completed,
    /// Starred
    Starred,
}

/// How to order the view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Most recently created first (descending id)
    #[default]
    Date,
    /// High before medium before low, stable otherwise
    Priority,
    /// Lexicographic by text, case-insensitive
    Name,
    /// Ascending due date, tasks without one last
    DueDate,
}

/// Compute the filtered, searched, sorted projection of the task list.
///
/// Filter and search compose conjunctively. Search is a case-insensitive
/// substring match against the text or the category; the empty string
/// matches everything. Sorting operates on a copy.
pub fn view(state: &State, filter: FilterMode, search: &str, sort: SortMode) -> Vec<Task> {
    let needle = search.to_lowercase();

    let mut tasks: Vec<Task> = state
        .tasks
        .iter()
        .filter(|t| matches_filter(t, filter) && matches_search(t, &needle))
        .cloned()
        .collect();

    // Vec::sort_by is stable, which the priority and due-date tie rules rely on
    match sort {
        SortMode::Date => tasks.sort_by(|a, b| b.id.cmp(&a.id)),
        SortMode::Priority => tasks.sort_by(|a, b| a.priority.rank().cmp(&b.priority.rank())),
        SortMode::Name => tasks.sort_by(|a, b| a.text.to_lowercase().cmp(&b.text.to_lowercase())),
        SortMode::DueDate => tasks.sort_by(|a, b| match (a.due_date, b.due_date) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        }),
    }

    tasks
}

fn matches_filter(task: &Task, filter: FilterMode) -> bool {
    match filter {
        FilterMode::All => true,
        FilterMode::Active => !task.completed,
        FilterMode::Completed => task.completed,
        FilterMode::Starred => task.starred,
    }
}

fn matches_search(task: &Task, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    task.text.to_lowercase().contains(needle)
        || task
            .category
            .as_ref()
            .is_some_and(|c| c.to_lowercase().contains(needle))
}
