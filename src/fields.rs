//! View parameter enumerations.
//!
//! This module defines the completion filter and sort-order values that
//! control the derived view of the task list.

use clap::ValueEnum;

/// Completion filter applied to the derived view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Filter {
    #[default]
    All,
    Completed,
    Pending,
}

/// Due-date sort direction applied to the derived view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Sort {
    #[default]
    DateAsc,
    DateDesc,
}
