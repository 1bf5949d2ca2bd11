use chrono::Utc;
use clap::Parser;
use colored::*;
use eyre::{Context, Result, eyre};
use log::info;

use taskmaster::cli::{Cli, Command};
use taskmaster::{
    Action, Config, FileStore, Gateway, State, Task, TaskPatch, auth, codec, history, query, reduce, state_key, stats,
};

fn setup_logging() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .init();
    Ok(())
}

/// The logged-in user, or an error telling the caller to log in
fn require_user(store: &FileStore) -> Result<auth::User> {
    auth::current_user(store)?.ok_or_else(|| eyre!("Not logged in (use `tm login` or `tm register`)"))
}

/// Load the user's state blob, or start fresh when none exists
fn load_state(store: &FileStore, user_id: u64) -> Result<State> {
    match store.get(&state_key(user_id))? {
        Some(raw) => codec::import_state(&raw).context("Stored task state is corrupt"),
        None => Ok(State::default()),
    }
}

/// Durably store the state after a reduction
fn persist(store: &mut FileStore, user_id: u64, state: &State) -> Result<()> {
    let raw = codec::export_state(state)?;
    store.set(&state_key(user_id), &raw)
}

fn print_task(task: &Task, today: chrono::NaiveDate) {
    let check = if task.completed { "✓".green() } else { "○".normal() };
    let star = if task.starred { "★".yellow() } else { " ".normal() };
    let priority = match task.priority {
        taskmaster::Priority::High => "high".red(),
        taskmaster::Priority::Medium => "medium".yellow(),
        taskmaster::Priority::Low => "low".green(),
    };

    let mut line = format!("{} {} {:>15}  [{}] {}", check, star, task.id, priority, task.text);
    if let Some(ref category) = task.category {
        line.push_str(&format!("  {}", format!("#{category}").cyan()));
    }
    if let Some(due) = task.due_date {
        let due_str = if task.is_overdue(today) {
            format!("due {due} (overdue)").red().to_string()
        } else {
            format!("due {due}").dimmed().to_string()
        };
        line.push_str(&format!("  {due_str}"));
    }
    println!("{line}");
    if let Some(ref notes) = task.notes {
        println!("      {}", notes.dimmed());
    }
}

fn main() -> Result<()> {
    setup_logging().context("Failed to setup logging")?;

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    let mut store = FileStore::open(&config.store_path)?;

    let now = Utc::now();
    let today = now.date_naive();

    match cli.command {
        Command::Register {
            username,
            password,
            email,
        } => {
            let user = auth::register(&mut store, &username, &password, &email, now)?;
            println!("{} Registered and logged in as {}", "✓".green(), user.username.cyan());
        }
        Command::Login { username, password } => {
            let user = auth::login(&mut store, &username, &password)?;
            println!("{} Logged in as {}", "✓".green(), user.username.cyan());
        }
        Command::Logout => {
            auth::logout(&mut store)?;
            println!("{} Logged out", "✓".green());
        }
        Command::Whoami => match auth::current_user(&store)? {
            Some(user) => println!("{} ({})", user.username.cyan(), user.email),
            None => println!("Not logged in"),
        },
        Command::Add {
            text,
            category,
            priority,
            due,
            notes,
        } => {
            let user = require_user(&store)?;
            let state = load_state(&store, user.id)?;

            let mut task = Task::new(state.next_task_id(now), text, now)?;
            if let Some(category) = category {
                task = task.with_category(category);
            }
            if let Some(priority) = priority {
                task = task.with_priority(priority);
            }
            if let Some(due) = due {
                task = task.with_due_date(due);
            }
            if let Some(notes) = notes {
                task = task.with_notes(notes);
            }

            let id = task.id;
            let state = reduce(state, Action::AddTask(task), now);
            persist(&mut store, user.id, &state)?;
            info!("added task {id}");
            println!("{} Added task {}", "✓".green(), id.to_string().cyan());
        }
        Command::List { filter, search, sort } => {
            let user = require_user(&store)?;
            let state = load_state(&store, user.id)?;
            let tasks = query::view(&state, filter, &search, sort);

            if tasks.is_empty() {
                println!("No tasks found");
            } else {
                for task in &tasks {
                    print_task(task, today);
                }
                println!(
                    "{}",
                    format!("{} of {} tasks", tasks.len(), state.tasks.len()).dimmed()
                );
            }
        }
        Command::Toggle { id } => {
            let user = require_user(&store)?;
            let state = load_state(&store, user.id)?;
            let existed = state.contains(id);

            let state = reduce(state, Action::ToggleComplete(id), now);
            persist(&mut store, user.id, &state)?;

            if existed {
                let done = state.find(id).map(|t| t.completed).unwrap_or(false);
                let label = if done { "completed" } else { "reopened" };
                println!("{} Task {} {}", "✓".green(), id, label);
            } else {
                println!("{} No task with id {}", "!".yellow(), id);
            }
        }
        Command::Star { id } => {
            let user = require_user(&store)?;
            let state = load_state(&store, user.id)?;
            let existed = state.contains(id);

            let state = reduce(state, Action::ToggleStar(id), now);
            persist(&mut store, user.id, &state)?;

            if existed {
                let starred = state.find(id).map(|t| t.starred).unwrap_or(false);
                let label = if starred { "starred" } else { "unstarred" };
                println!("{} Task {} {}", "✓".green(), id, label);
            } else {
                println!("{} No task with id {}", "!".yellow(), id);
            }
        }
        Command::Edit {
            id,
            text,
            category,
            priority,
            due,
            clear_due,
            notes,
        } => {
            let user = require_user(&store)?;
            let state = load_state(&store, user.id)?;

            let mut patch = TaskPatch::default();
            if let Some(text) = text {
                if text.trim().is_empty() {
                    return Err(eyre!("task text must not be empty"));
                }
                patch = patch.text(text);
            }
            if let Some(category) = category {
                patch = patch.category(category);
            }
            if let Some(priority) = priority {
                patch = patch.priority(priority);
            }
            if let Some(due) = due {
                patch = patch.due_date(due);
            }
            if clear_due {
                patch = patch.clear_due_date();
            }
            if let Some(notes) = notes {
                patch = patch.notes(notes);
            }

            if patch.is_empty() {
                println!("Nothing to change");
                return Ok(());
            }

            let existed = state.contains(id);
            let state = reduce(state, Action::UpdateFields { id, patch }, now);
            persist(&mut store, user.id, &state)?;

            if existed {
                println!("{} Updated task {}", "✓".green(), id);
            } else {
                println!("{} No task with id {}", "!".yellow(), id);
            }
        }
        Command::Delete { id } => {
            let user = require_user(&store)?;
            let state = load_state(&store, user.id)?;
            let existed = state.contains(id);

            let state = reduce(state, Action::Delete(id), now);
            persist(&mut store, user.id, &state)?;

            if existed {
                println!("{} Deleted task {}", "✓".green(), id);
            } else {
                println!("{} No task with id {}", "!".yellow(), id);
            }
        }
        Command::Clear => {
            let user = require_user(&store)?;
            let state = load_state(&store, user.id)?;
            let before = state.tasks.len();

            let state = reduce(state, Action::ClearCompleted, now);
            persist(&mut store, user.id, &state)?;

            println!("{} Removed {} completed task(s)", "✓".green(), before - state.tasks.len());
        }
        Command::Stats => {
            let user = require_user(&store)?;
            let state = load_state(&store, user.id)?;
            let s = stats(&state, today);

            println!("Progress: {}%", s.progress.to_string().cyan());
            println!("  Total:       {}", s.total);
            println!("  Completed:   {}", s.completed);
            println!("  Active:      {}", s.active);
            println!("  High prio:   {}", s.high_priority_active);
            println!("  Overdue:     {}", s.overdue_active);
            println!("  Starred:     {}", s.starred);
        }
        Command::History { count } => {
            let user = require_user(&store)?;
            let state = load_state(&store, user.id)?;

            let entries = history::recent(&state.history, count);
            if entries.is_empty() {
                println!("No history yet");
            } else {
                for entry in entries {
                    let what = entry
                        .task
                        .as_ref()
                        .map(|t| format!("{} \"{}\"", t.id, t.text))
                        .or(entry.task_id.map(|id| id.to_string()))
                        .unwrap_or_default();
                    println!(
                        "{:>15}  {}  {}",
                        entry.action.to_string().magenta(),
                        entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
                        what
                    );
                }
                println!("{}", format!("{} total actions", state.history.len()).dimmed());
            }
        }
        Command::Export { path } => {
            let user = require_user(&store)?;
            let state = load_state(&store, user.id)?;
            let snapshot = codec::export_state(&state)?;

            match path {
                Some(path) => {
                    std::fs::write(&path, &snapshot).context("Failed to write export file")?;
                    println!("{} Exported {} task(s) to {}", "✓".green(), state.tasks.len(), path.display());
                }
                None => println!("{snapshot}"),
            }
        }
        Command::Import { path } => {
            let user = require_user(&store)?;
            let state = load_state(&store, user.id)?;

            let content = std::fs::read_to_string(&path).context("Failed to read import file")?;
            // On parse failure the current state stays untouched
            let imported = codec::import_state(&content)?;

            let state = reduce(state, Action::LoadState(imported), now);
            persist(&mut store, user.id, &state)?;
            println!("{} Imported {} task(s)", "✓".green(), state.tasks.len());
        }
    }

    Ok(())
}
