use inncheck_core::checklist::{Category, Task, TaskStatus};
use inncheck_core::report::{group_by_category, progress};
use proptest::prelude::*;

fn status() -> impl Strategy<Value = TaskStatus> {
    prop_oneof![
        Just(TaskStatus::Ok),
        Just(TaskStatus::Pending),
        Just(TaskStatus::Failed),
    ]
}

fn category() -> impl Strategy<Value = Category> {
    prop::sample::select(Category::ALL.to_vec())
}

fn tasks() -> impl Strategy<Value = Vec<Task>> {
    prop::collection::vec((category(), status()), 0..40).prop_map(|items| {
        items
            .into_iter()
            .enumerate()
            .map(|(i, (category, status))| {
                Task::new(format!("item {i}"), category).with_status(status)
            })
            .collect()
    })
}

#[test]
fn test_toggle_cycle_from_pending() {
    let mut task = Task::new("Testar Airfryer", Category::AreaGourmet);
    assert_eq!(task.toggle(), TaskStatus::Ok);
    assert_eq!(task.toggle(), TaskStatus::Failed);
    assert_eq!(task.toggle(), TaskStatus::Pending);
}

proptest! {
    #[test]
    fn prop_three_toggles_return_to_start(start in status()) {
        let mut task = Task::new("x", Category::Piscina).with_status(start);
        task.toggle();
        task.toggle();
        task.toggle();
        prop_assert_eq!(task.status, start);
    }

    #[test]
    fn prop_progress_is_bounded(tasks in tasks()) {
        let p = progress(&tasks);
        prop_assert!(p <= 100);
        if tasks.iter().all(|t| t.status == TaskStatus::Ok) && !tasks.is_empty() {
            prop_assert_eq!(p, 100);
        }
        if tasks.iter().all(|t| t.status != TaskStatus::Ok) {
            prop_assert_eq!(p, 0);
        }
    }

    #[test]
    fn prop_grouping_is_ordered_and_complete(tasks in tasks()) {
        let grouped = group_by_category(&tasks);

        let keys: Vec<_> = grouped.keys().map(|c| c.as_str()).collect();
        let mut sorted = keys.clone();
        sorted.sort_unstable();
        prop_assert_eq!(keys, sorted);

        let total: usize = grouped.values().map(|r| r.total()).sum();
        prop_assert_eq!(total, tasks.len());

        for report in grouped.values() {
            let expected: Vec<_> = tasks
                .iter()
                .filter(|t| t.category == report.category)
                .map(|t| t.id.clone())
                .collect();
            let actual: Vec<_> = report.tasks.iter().map(|t| t.id.clone()).collect();
            prop_assert_eq!(actual, expected);
        }
    }

    #[test]
    fn prop_grouping_ignores_input_order(mut tasks in tasks(), seed in any::<u64>()) {
        let before: Vec<_> = group_by_category(&tasks).into_keys().collect();
        if !tasks.is_empty() {
            let len = tasks.len();
            tasks.rotate_left((seed as usize) % len);
        }
        let after: Vec<_> = group_by_category(&tasks).into_keys().collect();
        prop_assert_eq!(before, after);
    }
}
