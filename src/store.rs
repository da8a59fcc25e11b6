//! The task store: canonical task sequence and mutation operations.
//!
//! This module owns the single source-of-truth ordering of tasks and the
//! three view parameters, and pushes the whole collection through the
//! storage adapter after every successful mutation.

use std::io;

use chrono::{NaiveDate, Utc};
use thiserror::Error;

use crate::fields::{Filter, Sort};
use crate::storage::Storage;
use crate::task::Task;
use crate::view;

/// Errors surfaced by store mutations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Add/edit was given empty or whitespace-only text. Nothing changed
    /// and nothing was persisted.
    #[error("task text cannot be empty")]
    EmptyText,

    /// The storage adapter failed to write the collection. The in-memory
    /// state already reflects the attempted change; no rollback is done.
    #[error("failed to persist tasks: {0}")]
    Persist(#[from] io::Error),
}

/// Owns the canonical task sequence and the current view parameters.
///
/// Mutations targeting an id that is no longer present are silent no-ops
/// rather than errors, so a stale caller (a double delete, say) cannot
/// fail the flow. All operations run to completion synchronously.
pub struct TaskStore {
    tasks: Vec<Task>,
    storage: Box<dyn Storage>,
    search: String,
    filter: Filter,
    sort: Sort,
}

impl TaskStore {
    /// Load the persisted collection through the given adapter, falling
    /// back to an empty collection when no usable snapshot exists.
    pub fn load(storage: Box<dyn Storage>) -> Self {
        let tasks = storage.read().unwrap_or_default();
        TaskStore {
            tasks,
            storage,
            search: String::new(),
            filter: Filter::default(),
            sort: Sort::default(),
        }
    }

    /// Next task id: creation time in milliseconds, bumped past the
    /// current maximum so ids stay unique and monotonic even when two
    /// adds land in the same millisecond.
    fn next_id(&self) -> u64 {
        let now_ms = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        self.tasks
            .iter()
            .map(|t| t.id)
            .max()
            .map_or(now_ms, |max| now_ms.max(max + 1))
    }

    /// Append a new task to the end of the canonical sequence and persist.
    /// Returns the created task.
    pub fn add(&mut self, text: &str, date: NaiveDate) -> Result<Task, StoreError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(StoreError::EmptyText);
        }
        let task = Task {
            id: self.next_id(),
            text: text.to_string(),
            completed: false,
            date,
        };
        self.tasks.push(task.clone());
        self.storage.save(&self.tasks)?;
        Ok(task)
    }

    /// Remove the task with `id`. No-op if absent.
    pub fn delete(&mut self, id: u64) -> Result<(), StoreError> {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == before {
            return Ok(());
        }
        self.storage.save(&self.tasks)?;
        Ok(())
    }

    /// Flip the completion flag on the task with `id`. No-op if absent.
    pub fn toggle_complete(&mut self, id: u64) -> Result<(), StoreError> {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(());
        };
        task.completed = !task.completed;
        self.storage.save(&self.tasks)?;
        Ok(())
    }

    /// Overwrite text and date on the task with `id` and persist. Empty
    /// text is rejected with the task left untouched; an absent id is a
    /// no-op.
    pub fn edit(&mut self, id: u64, new_text: &str, new_date: NaiveDate) -> Result<(), StoreError> {
        let new_text = new_text.trim();
        if new_text.is_empty() {
            return Err(StoreError::EmptyText);
        }
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(());
        };
        task.text = new_text.to_string();
        task.date = new_date;
        self.storage.save(&self.tasks)?;
        Ok(())
    }

    /// Move the task with `moved_id` to the slot held by `target_id`
    /// within the canonical sequence: a forward move lands immediately
    /// after the target, a backward move immediately before it. No-op
    /// when the ids match or either is absent.
    pub fn reorder(&mut self, moved_id: u64, target_id: u64) -> Result<(), StoreError> {
        if moved_id == target_id {
            return Ok(());
        }
        let Some(moved_idx) = self.tasks.iter().position(|t| t.id == moved_id) else {
            return Ok(());
        };
        let Some(target_idx) = self.tasks.iter().position(|t| t.id == target_id) else {
            return Ok(());
        };
        let moved = self.tasks.remove(moved_idx);
        // Inserting at the target's pre-removal index yields the
        // after-when-forward, before-when-backward drop rule.
        self.tasks.insert(target_idx, moved);
        self.storage.save(&self.tasks)?;
        Ok(())
    }

    /// The canonical sequence. All mutation goes through the operations
    /// above.
    pub fn snapshot(&self) -> &[Task] {
        &self.tasks
    }

    /// Set the search text. View parameters are per-session and never
    /// persisted.
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    /// Set the completion filter.
    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    /// Set the sort order.
    pub fn set_sort(&mut self, sort: Sort) {
        self.sort = sort;
    }

    /// The derived view under the current search, filter, and sort.
    pub fn derive_view(&self) -> Vec<Task> {
        view::derive_view(&self.tasks, &self.search, self.filter, self.sort)
    }
}
