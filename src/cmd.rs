//! Command implementations for the CLI interface.
//!
//! This module contains the command handlers: they parse user input, call
//! into the task store, and reprint the derived view. Every mutating
//! command re-renders through the same path, so what is on screen always
//! matches the current view parameters — reordering included.

use clap::Subcommand;
use clap_complete::{generate, Shell};

use chrono::{Duration, Local, NaiveDate};

use crate::fields::{Filter, Sort};
use crate::store::TaskStore;
use crate::task::Task;

#[derive(Subcommand)]
pub enum Commands {
    /// Add a new task.
    Add {
        /// Task description.
        text: String,
        /// Due date: YYYY-MM-DD, "today", "tomorrow", or "in Nd". Defaults to today.
        #[arg(long)]
        date: Option<String>,
    },

    /// List tasks with optional search, filter, and sort.
    List {
        /// Keep only tasks whose text contains this, case-insensitively.
        #[arg(long, default_value = "")]
        search: String,
        /// Completion filter: all | completed | pending.
        #[arg(long, value_enum, default_value_t = Filter::All)]
        filter: Filter,
        /// Sort order: date-asc | date-desc.
        #[arg(long, value_enum, default_value_t = Sort::DateAsc)]
        sort: Sort,
    },

    /// Toggle completion on a task.
    Done {
        /// Task ID.
        id: u64,
    },

    /// Edit a task's text and/or due date.
    Edit {
        /// Task ID.
        id: u64,
        /// New task description.
        #[arg(long)]
        text: Option<String>,
        /// New due date: YYYY-MM-DD, "today", "tomorrow", or "in Nd".
        #[arg(long)]
        date: Option<String>,
    },

    /// Delete a task.
    Rm {
        /// Task ID.
        id: u64,
    },

    /// Move a task to the slot another task occupies.
    Mv {
        /// Task ID to move.
        id: u64,
        /// Task ID currently at the destination slot.
        target: u64,
    },

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for.
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Parse a due date input: YYYY-MM-DD, "today", "tomorrow", "yesterday",
/// or "in Nd".
pub fn parse_date_input(s: &str) -> Option<NaiveDate> {
    let s = s.trim().to_lowercase();
    let today = Local::now().date_naive();

    match s.as_str() {
        "today" => return Some(today),
        "tomorrow" => return Some(today + Duration::days(1)),
        "yesterday" => return Some(today - Duration::days(1)),
        _ => {}
    }

    if let Some(rest) = s.strip_prefix("in ") {
        if let Some(nd) = rest.strip_suffix('d') {
            if let Ok(days) = nd.trim().parse::<i64>() {
                return Some(today + Duration::days(days));
            }
        }
    }

    NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()
}

fn parse_date_or_exit(input: &str) -> NaiveDate {
    match parse_date_input(input) {
        Some(d) => d,
        None => {
            eprintln!("Unrecognised date '{input}'. Use YYYY-MM-DD, 'today', 'tomorrow', or 'in Nd'.");
            std::process::exit(1);
        }
    }
}

fn require_task(store: &TaskStore, id: u64) -> Task {
    match store.snapshot().iter().find(|t| t.id == id) {
        Some(t) => t.clone(),
        None => {
            eprintln!("Task {id} not found.");
            std::process::exit(1);
        }
    }
}

/// Add a new task, defaulting the due date to today.
pub fn cmd_add(store: &mut TaskStore, text: String, date: Option<String>) {
    let date = date.map_or_else(|| Local::now().date_naive(), |s| parse_date_or_exit(&s));
    match store.add(&text, date) {
        Ok(task) => {
            println!("Added task {}", task.id);
            print_table(&store.derive_view());
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

/// Print the derived view under the given search, filter, and sort.
pub fn cmd_list(store: &mut TaskStore, search: String, filter: Filter, sort: Sort) {
    store.set_search(search);
    store.set_filter(filter);
    store.set_sort(sort);
    print_table(&store.derive_view());
}

/// Toggle completion on a task.
pub fn cmd_done(store: &mut TaskStore, id: u64) {
    require_task(store, id);
    if let Err(e) = store.toggle_complete(id) {
        eprintln!("{e}");
        std::process::exit(1);
    }
    print_table(&store.derive_view());
}

/// Edit a task's text and/or due date; unspecified fields keep their
/// current value.
pub fn cmd_edit(store: &mut TaskStore, id: u64, text: Option<String>, date: Option<String>) {
    let current = require_task(store, id);
    let new_text = text.unwrap_or(current.text);
    let new_date = date.map_or(current.date, |s| parse_date_or_exit(&s));
    if let Err(e) = store.edit(id, &new_text, new_date) {
        eprintln!("{e}");
        std::process::exit(1);
    }
    println!("Updated task {id}");
    print_table(&store.derive_view());
}

/// Delete a task.
pub fn cmd_rm(store: &mut TaskStore, id: u64) {
    require_task(store, id);
    if let Err(e) = store.delete(id) {
        eprintln!("{e}");
        std::process::exit(1);
    }
    println!("Deleted task {id}");
    print_table(&store.derive_view());
}

/// Move a task to the slot another task occupies.
pub fn cmd_mv(store: &mut TaskStore, id: u64, target: u64) {
    require_task(store, id);
    require_task(store, target);
    if let Err(e) = store.reorder(id, target) {
        eprintln!("{e}");
        std::process::exit(1);
    }
    print_table(&store.derive_view());
}

/// Generate shell completion scripts for the given shell.
pub fn cmd_completions(shell: Shell) {
    use clap::CommandFactory;

    use crate::cli::Cli;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut std::io::stdout());
}

/// Print tasks in a formatted table.
pub fn print_table(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("No tasks match the current view.");
        return;
    }
    println!("{:<15} {:<5} {:<12} {}", "ID", "Done", "Due", "Task");
    let today = Local::now().date_naive();
    for t in tasks {
        let done = if t.completed { "[x]" } else { "[ ]" };
        println!(
            "{:<15} {:<5} {:<12} {}",
            t.id,
            done,
            format_due_relative(t.date, today),
            t.text
        );
    }
}

/// Format a due date relative to today ("today", "tomorrow", "in 3d", "2d late").
pub fn format_due_relative(due: NaiveDate, today: NaiveDate) -> String {
    let delta = (due - today).num_days();
    if delta == 0 {
        "today".into()
    } else if delta == 1 {
        "tomorrow".into()
    } else if delta > 1 {
        format!("in {delta}d")
    } else {
        format!("{}d late", -delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_input_handles_iso_and_relative() {
        let today = Local::now().date_naive();
        assert_eq!(
            parse_date_input("2025-06-01"),
            NaiveDate::from_ymd_opt(2025, 6, 1)
        );
        assert_eq!(parse_date_input("today"), Some(today));
        assert_eq!(parse_date_input("Tomorrow"), Some(today + Duration::days(1)));
        assert_eq!(parse_date_input("in 3d"), Some(today + Duration::days(3)));
        assert_eq!(parse_date_input("next century"), None);
    }

    #[test]
    fn format_due_relative_buckets() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        let day = |d: u32| NaiveDate::from_ymd_opt(2025, 6, d).unwrap();
        assert_eq!(format_due_relative(day(10), today), "today");
        assert_eq!(format_due_relative(day(11), today), "tomorrow");
        assert_eq!(format_due_relative(day(13), today), "in 3d");
        assert_eq!(format_due_relative(day(8), today), "2d late");
    }
}
