//! The derived view: search, filter, and sort over a task snapshot.

use crate::fields::{Filter, Sort};
use crate::task::Task;

/// Project a task snapshot through the three view parameters.
///
/// Pure and stateless: each call recomputes from scratch. Stages run in a
/// fixed order — case-insensitive substring search, then the completion
/// filter, then a stable sort by due date. Tasks sharing a date keep
/// their relative order from the canonical sequence, so same-day tasks
/// stay in insertion order.
pub fn derive_view(tasks: &[Task], search: &str, filter: Filter, sort: Sort) -> Vec<Task> {
    let needle = search.to_lowercase();
    let mut result: Vec<Task> = tasks
        .iter()
        .filter(|t| needle.is_empty() || t.text.to_lowercase().contains(&needle))
        .filter(|t| match filter {
            Filter::All => true,
            Filter::Completed => t.completed,
            Filter::Pending => !t.completed,
        })
        .cloned()
        .collect();
    match sort {
        Sort::DateAsc => result.sort_by(|a, b| a.date.cmp(&b.date)),
        Sort::DateDesc => result.sort_by(|a, b| b.date.cmp(&a.date)),
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn task(id: u64, text: &str, completed: bool, d: &str) -> Task {
        Task { id, text: text.into(), completed, date: date(d) }
    }

    fn texts(view: &[Task]) -> Vec<&str> {
        view.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn empty_search_retains_all() {
        let tasks = vec![task(1, "Buy milk", false, "2025-01-01")];
        let view = derive_view(&tasks, "", Filter::All, Sort::DateAsc);
        assert_eq!(view, tasks);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let tasks = vec![
            task(1, "Buy milk", false, "2025-01-01"),
            task(2, "Call mom", false, "2025-01-01"),
        ];
        let view = derive_view(&tasks, "BUY", Filter::All, Sort::DateAsc);
        assert_eq!(texts(&view), ["Buy milk"]);
    }

    #[test]
    fn filter_splits_by_completion() {
        let tasks = vec![
            task(1, "a", true, "2025-01-01"),
            task(2, "b", false, "2025-01-01"),
        ];
        let completed = derive_view(&tasks, "", Filter::Completed, Sort::DateAsc);
        assert_eq!(texts(&completed), ["a"]);
        let pending = derive_view(&tasks, "", Filter::Pending, Sort::DateAsc);
        assert_eq!(texts(&pending), ["b"]);
        let all = derive_view(&tasks, "", Filter::All, Sort::DateAsc);
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn sort_by_date_is_stable() {
        let tasks = vec![
            task(1, "X", false, "2025-01-01"),
            task(2, "Y", false, "2025-01-01"),
            task(3, "Z", false, "2024-12-31"),
        ];
        let asc = derive_view(&tasks, "", Filter::All, Sort::DateAsc);
        assert_eq!(texts(&asc), ["Z", "X", "Y"]);
        let desc = derive_view(&tasks, "", Filter::All, Sort::DateDesc);
        assert_eq!(texts(&desc), ["X", "Y", "Z"]);
    }

    #[test]
    fn repeated_calls_yield_identical_output() {
        let tasks = vec![
            task(1, "Buy milk", true, "2025-03-01"),
            task(2, "Call mom", false, "2025-02-01"),
            task(3, "Buy stamps", false, "2025-02-01"),
        ];
        let first = derive_view(&tasks, "buy", Filter::Pending, Sort::DateDesc);
        let second = derive_view(&tasks, "buy", Filter::Pending, Sort::DateDesc);
        assert_eq!(first, second);
        assert_eq!(texts(&first), ["Buy stamps"]);
    }

    #[test]
    fn stages_compose() {
        let tasks = vec![
            task(1, "Buy milk", false, "2025-01-02"),
            task(2, "Buy bread", true, "2025-01-01"),
            task(3, "Buy eggs", false, "2025-01-01"),
            task(4, "Call mom", false, "2025-01-01"),
        ];
        let view = derive_view(&tasks, "buy", Filter::Pending, Sort::DateAsc);
        assert_eq!(texts(&view), ["Buy eggs", "Buy milk"]);
    }
}
