//! Taskmaster - personal task tracker
//!
//! The core is a pure state engine: a reducer maps `(State, Action)` to a
//! new state, and every view (filtered/sorted listings, progress stats, the
//! recent-history panel) is recomputed from the current state on demand.
//! Persistence and authentication are thin external collaborators around
//! that engine.
//!
//! # Architecture
//!
//! ```text
//! Action ──> reduce() ──> State ──┬──> view()    (filter + search + sort)
//!                                 ├──> stats()   (aggregate counters)
//!                                 ├──> recent()  (audit history)
//!                                 └──> Gateway   (per-user JSON blob)
//! ```
//!
//! The reducer takes its timestamps from a caller-provided clock, so every
//! transition is deterministic and testable. Persistence is a separate,
//! fire-and-forget step after each reduction; concurrent sessions writing
//! the same user's blob race last-write-wins.
//!
//! # Example
//!
//! ```ignore
//! use taskmaster::{Action, State, Task, reduce};
//!
//! let now = chrono::Utc::now();
//! let state = State::default();
//! let task = Task::new(state.next_task_id(now), "Buy milk", now)?;
//! let state = reduce(state, Action::AddTask(task), now);
//! ```

pub mod auth;
pub mod cli;
pub mod codec;
pub mod config;
pub mod history;
pub mod query;
pub mod reducer;
pub mod state;
pub mod stats;
pub mod storage;
pub mod task;

pub use auth::{AuthError, User, current_user, login, logout, register};
pub use codec::{ImportError, export_state, import_state};
pub use config::Config;
pub use history::recent;
pub use query::{FilterMode, SortMode, view};
pub use reducer::{Action, reduce};
pub use state::{ActionKind, HistoryEntry, State};
pub use stats::{Stats, stats};
pub use storage::{CURRENT_USER_KEY, FileStore, Gateway, MemoryStore, USERS_KEY, state_key};
pub use task::{Priority, Task, TaskId, TaskPatch, ValidationError};
