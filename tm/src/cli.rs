//! CLI argument parsing for taskmaster

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::query::{FilterMode, SortMode};
use crate::task::{Priority, TaskId};

#[derive(Parser, Debug)]
#[command(name = "tm")]
#[command(author, version, about = "Personal task tracker", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Register a new account and log in
    Register {
        username: String,
        password: String,
        email: String,
    },

    /// Log in to an existing account
    Login { username: String, password: String },

    /// Log out of the current account
    Logout,

    /// Show the currently logged-in user
    Whoami,

    /// Add a new task
    Add {
        /// Task description
        #[arg(required = true)]
        text: String,

        /// Category label
        #[arg(short, long)]
        category: Option<String>,

        /// Priority (default: medium)
        #[arg(short, long)]
        priority: Option<Priority>,

        /// Due date (YYYY-MM-DD)
        #[arg(short, long)]
        due: Option<NaiveDate>,

        /// Free-form notes
        #[arg(short, long)]
        notes: Option<String>,
    },

    /// List tasks
    List {
        /// Which tasks to show
        #[arg(short, long, default_value = "all")]
        filter: FilterMode,

        /// Substring search over text and category
        #[arg(short, long, default_value = "")]
        search: String,

        /// Sort order
        #[arg(short = 'o', long, default_value = "date")]
        sort: SortMode,
    },

    /// Toggle a task's completion
    Toggle {
        #[arg(required = true)]
        id: TaskId,
    },

    /// Toggle a task's star
    Star {
        #[arg(required = true)]
        id: TaskId,
    },

    /// Edit fields of a task
    Edit {
        #[arg(required = true)]
        id: TaskId,

        /// New description
        #[arg(short, long)]
        text: Option<String>,

        /// New category label
        #[arg(short, long)]
        category: Option<String>,

        /// New priority
        #[arg(short, long)]
        priority: Option<Priority>,

        /// New due date (YYYY-MM-DD)
        #[arg(short, long)]
        due: Option<NaiveDate>,

        /// Clear the due date
        #[arg(long, conflicts_with = "due")]
        clear_due: bool,

        /// New notes
        #[arg(short, long)]
        notes: Option<String>,
    },

    /// Delete a task
    Delete {
        #[arg(required = true)]
        id: TaskId,
    },

    /// Remove every completed task
    Clear,

    /// Show aggregate progress statistics
    Stats,

    /// Show the most recent audit history entries
    History {
        /// Number of entries to show
        #[arg(short, long, default_value = "10")]
        count: usize,
    },

    /// Export the full state as JSON
    Export {
        /// Output file (stdout when omitted)
        path: Option<PathBuf>,
    },

    /// Import a JSON snapshot, replacing the full state
    Import {
        #[arg(required = true)]
        path: PathBuf,
    },
}
