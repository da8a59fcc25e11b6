//! Task data structure.
//!
//! This module defines the core `Task` struct that represents a single
//! to-do item with its text, completion flag, and due date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single to-do item.
///
/// The `id` is assigned once by the store and never reused, even after
/// deletion. A task's position inside the store's sequence is its canonical
/// order, which is independent of whatever search, filter, or sort the
/// user is currently looking through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub text: String,
    pub completed: bool,
    pub date: NaiveDate,
}
