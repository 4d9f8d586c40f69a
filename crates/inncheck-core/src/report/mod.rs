//! Report aggregation
//!
//! Groups a checklist by category and computes completion figures. Output
//! is deterministic for a given input: categories come out in lexicographic
//! order and tasks keep their checklist order inside each category.
//!
//! The renderers built on top of it live in [`text`] (downloadable plain
//! text) and [`pdf`] (page layout for the inspection PDF).

pub mod pdf;
pub mod text;

use crate::checklist::{Category, Task};
use serde::Serialize;
use std::collections::BTreeMap;

/// One category of a grouped checklist
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryReport<'a> {
    /// Category
    pub category: Category,
    /// Tasks in checklist order
    pub tasks: Vec<&'a Task>,
    /// Tasks marked OK
    pub ok: usize,
}

impl CategoryReport<'_> {
    /// Display label of the category
    #[inline]
    #[must_use]
    pub fn label(&self) -> &'static str {
        self.category.label()
    }

    /// Number of tasks
    #[inline]
    #[must_use]
    pub fn total(&self) -> usize {
        self.tasks.len()
    }

    /// Whether every task is OK
    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.ok == self.total()
    }

    /// Percentage of tasks marked OK
    #[must_use]
    pub fn progress(&self) -> u8 {
        percent(self.ok, self.total())
    }
}

/// Group tasks by category, categories sorted lexicographically
#[must_use]
pub fn group_by_category(tasks: &[Task]) -> BTreeMap<Category, CategoryReport<'_>> {
    let mut groups: BTreeMap<Category, CategoryReport<'_>> = BTreeMap::new();
    for task in tasks {
        let entry = groups
            .entry(task.category)
            .or_insert_with(|| CategoryReport {
                category: task.category,
                tasks: Vec::new(),
                ok: 0,
            });
        entry.tasks.push(task);
        if task.status.is_ok() {
            entry.ok += 1;
        }
    }
    groups
}

/// `(ok, total)` over a checklist
#[must_use]
pub fn completion(tasks: &[Task]) -> (usize, usize) {
    let ok = tasks.iter().filter(|t| t.status.is_ok()).count();
    (ok, tasks.len())
}

/// Rounded percentage of tasks marked OK; 0 for an empty checklist
#[must_use]
pub fn progress(tasks: &[Task]) -> u8 {
    let (ok, total) = completion(tasks);
    percent(ok, total)
}

/// `round(100 * part / total)` with halves rounded up, 0 when `total` is 0
#[must_use]
pub fn percent(part: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let rounded = (200 * part + total) / (2 * total);
    u8::try_from(rounded.min(100)).unwrap_or(100)
}

/// Replace each run of whitespace with a single `_`, for report file names
pub(crate) fn underscore_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join("_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checklist::TaskStatus;

    fn task(title: &str, category: Category, status: TaskStatus) -> Task {
        Task::new(title, category).with_status(status)
    }

    #[test]
    fn progress_edge_cases() {
        assert_eq!(progress(&[]), 0);
        let tasks = vec![
            task("a", Category::Piscina, TaskStatus::Ok),
            task("b", Category::Piscina, TaskStatus::Pending),
        ];
        assert_eq!(progress(&tasks), 50);
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(2, 3), 67);
        assert_eq!(percent(1, 8), 13);
        assert_eq!(percent(5, 5), 100);
    }

    #[test]
    fn failed_tasks_do_not_count_as_done() {
        let tasks = vec![
            task("a", Category::Piscina, TaskStatus::Failed),
            task("b", Category::Piscina, TaskStatus::Ok),
        ];
        assert_eq!(completion(&tasks), (1, 2));
    }

    #[test]
    fn grouping_is_sorted_and_stable() {
        let tasks = vec![
            task("Freezer", Category::AreaGourmet, TaskStatus::Ok),
            task("Boia", Category::Piscina, TaskStatus::Pending),
            task("TV", Category::CasaSede, TaskStatus::Ok),
            task("Airfryer", Category::AreaGourmet, TaskStatus::Failed),
            task("Wi-Fi", Category::CasaSede, TaskStatus::Ok),
        ];
        let grouped = group_by_category(&tasks);

        let order: Vec<_> = grouped.keys().copied().collect();
        assert_eq!(
            order,
            vec![Category::CasaSede, Category::Piscina, Category::AreaGourmet]
        );

        let gourmet = &grouped[&Category::AreaGourmet];
        let titles: Vec<_> = gourmet.tasks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["Freezer", "Airfryer"]);
        assert_eq!(gourmet.ok, 1);
        assert_eq!(gourmet.progress(), 50);

        assert!(grouped[&Category::CasaSede].is_complete());
        assert!(!grouped[&Category::Piscina].is_complete());
    }
}
