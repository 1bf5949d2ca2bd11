//! Task domain types
//!
//! A [`Task`] is the single trackable to-do item. Tasks are owned exclusively
//! by the [`State`](crate::state::State) and only ever change through the
//! reducer.

use chrono::{DateTime, NaiveDate, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unique task identifier, monotonically increasing with creation time.
///
/// Ids double as the default recency ordering key: a larger id means a more
/// recently created task.
pub type TaskId = u64;

/// Errors raised before a task is ever constructed
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("task text must not be empty")]
    EmptyText,
}

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Sort rank: high sorts before medium sorts before low
    pub fn rank(&self) -> u8 {
        match self {
            Self::High => 0,
            Self::Medium => 1,
            Self::Low => 2,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// A single trackable to-do item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier, assigned at creation
    pub id: TaskId,

    /// Non-empty description
    pub text: String,

    /// Completion flag
    #[serde(default)]
    pub completed: bool,

    /// Starred flag
    #[serde(default)]
    pub starred: bool,

    /// Optional category label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Priority, defaults to medium
    #[serde(default)]
    pub priority: Priority,

    /// Optional due date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,

    /// Optional free-form notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Creation timestamp, immutable once set
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Create a new task, rejecting empty or whitespace-only text.
    ///
    /// The id must be pre-assigned by the caller (see
    /// [`State::next_task_id`](crate::state::State::next_task_id)).
    pub fn new(id: TaskId, text: impl Into<String>, now: DateTime<Utc>) -> Result<Self, ValidationError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ValidationError::EmptyText);
        }
        Ok(Self {
            id,
            text,
            completed: false,
            starred: false,
            category: None,
            priority: Priority::default(),
            due_date: None,
            notes: None,
            created_at: now,
        })
    }

    /// Builder method to set the category
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Builder method to set the priority
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Builder method to set the due date
    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Builder method to set the notes
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Merge a partial field set into this task
    pub fn apply(&mut self, patch: &TaskPatch) {
        if let Some(ref text) = patch.text {
            self.text = text.clone();
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        if let Some(starred) = patch.starred {
            self.starred = starred;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(ref category) = patch.category {
            self.category = category.clone();
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        if let Some(ref notes) = patch.notes {
            self.notes = notes.clone();
        }
    }

    /// True when the task is still open and its due date has passed
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.completed && self.due_date.is_some_and(|due| due < today)
    }
}

/// Partial field set merged into a task by `UpdateFields`.
///
/// Outer `None` means "leave the field alone"; for the optional task fields
/// the inner `Option` distinguishes setting a value from clearing it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub text: Option<String>,
    pub completed: Option<bool>,
    pub starred: Option<bool>,
    pub priority: Option<Priority>,
    pub category: Option<Option<String>>,
    pub due_date: Option<Option<NaiveDate>>,
    pub notes: Option<Option<String>>,
}

impl TaskPatch {
    /// True when the patch changes nothing
    pub fn is_empty(&self) -> bool {
        self.text.is_none()
            && self.completed.is_none()
            && self.starred.is_none()
            && self.priority.is_none()
            && self.category.is_none()
            && self.due_date.is_none()
            && self.notes.is_none()
    }

    /// Builder method to set the text
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Builder method to set the notes
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(Some(notes.into()));
        self
    }

    /// Builder method to set the priority
    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Builder method to set the due date
    pub fn due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(Some(due_date));
        self
    }

    /// Builder method to clear the due date
    pub fn clear_due_date(mut self) -> Self {
        self.due_date = Some(None);
        self
    }

    /// Builder method to set the category
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(Some(category.into()));
        self
    }
}
