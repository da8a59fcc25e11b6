//! # todo - File-backed to-do list CLI
//!
//! A small to-do list that keeps short text tasks with due dates in a
//! single local JSON file.
//!
//! ## Key Features
//!
//! - **Add, edit, complete, delete**: plain CRUD over short text tasks
//! - **Search, filter, sort**: a derived view over the list — case-insensitive
//!   text search, completed/pending filtering, and stable date sorting
//! - **Manual ordering**: move any task to another task's slot; the list's
//!   own order is kept independently of the active filter and sort
//! - **Local File Storage**: one JSON file, rewritten in full after every
//!   change; a missing or unreadable file just means an empty list
//!
//! ## Quick Start
//!
//! ```bash
//! # Add a task due today
//! todo add "Buy milk"
//!
//! # Add a task with a due date
//! todo add "Write report" --date 2025-07-01
//!
//! # List pending tasks, soonest first
//! todo list --filter pending --sort date-asc
//!
//! # Mark it done, fix a typo, move it, drop it
//! todo done <id>
//! todo edit <id> --text "Write quarterly report"
//! todo mv <id> <target-id>
//! todo rm <id>
//! ```
//!
//! Data is stored in `~/.todo/tasks.json` unless `--db` points elsewhere.

use std::path::PathBuf;

use clap::Parser;

pub mod cli;
pub mod cmd;
pub mod fields;
pub mod storage;
pub mod store;
pub mod task;
pub mod view;

use cli::Cli;
use cmd::*;
use storage::JsonFileStorage;
use store::TaskStore;

fn main() {
    let cli = Cli::parse();

    // Completions need no task file.
    if let Commands::Completions { shell } = &cli.command {
        cmd_completions(*shell);
        return;
    }

    let db_path = cli.db.unwrap_or_else(|| {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        let todo_dir = PathBuf::from(home).join(".todo");
        if let Err(e) = std::fs::create_dir_all(&todo_dir) {
            eprintln!("Failed to create todo directory {}: {}", todo_dir.display(), e);
            std::process::exit(1);
        }
        todo_dir.join("tasks.json")
    });

    let mut store = TaskStore::load(Box::new(JsonFileStorage::new(db_path)));

    match cli.command {
        Commands::Completions { .. } => unreachable!("completions handled above"),

        Commands::Add { text, date } => cmd_add(&mut store, text, date),

        Commands::List { search, filter, sort } => cmd_list(&mut store, search, filter, sort),

        Commands::Done { id } => cmd_done(&mut store, id),

        Commands::Edit { id, text, date } => cmd_edit(&mut store, id, text, date),

        Commands::Rm { id } => cmd_rm(&mut store, id),

        Commands::Mv { id, target } => cmd_mv(&mut store, id, target),
    }
}
