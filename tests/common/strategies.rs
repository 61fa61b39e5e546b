use proptest::prelude::*;

use workforce_core::constants::TaskStatus;

/// Strategy for generating task statuses
pub fn task_status_strategy() -> impl Strategy<Value = TaskStatus> {
    prop_oneof![
        Just(TaskStatus::ToAssign),
        Just(TaskStatus::InProgress),
        Just(TaskStatus::Completed),
        Just(TaskStatus::Overdue),
    ]
}

/// Shape of one generated task; indexes refer to earlier tasks and to employees
#[derive(Debug, Clone)]
pub struct TaskSpec {
    pub status: TaskStatus,
    pub parent: Option<usize>,
    pub assignee: Option<usize>,
}

/// Strategy for generating a task forest over `employee_count` employees.
/// A task's parent is always an earlier task, so the result is acyclic.
pub fn task_forest_strategy(
    employee_count: usize,
    max_tasks: usize,
) -> impl Strategy<Value = Vec<TaskSpec>> {
    prop::collection::vec(
        (
            task_status_strategy(),
            prop::option::of(any::<prop::sample::Index>()),
            prop::option::weighted(0.6, 0..employee_count.max(1)),
        ),
        0..=max_tasks,
    )
    .prop_map(move |raw| {
        raw.into_iter()
            .enumerate()
            .map(|(position, (status, parent, assignee))| TaskSpec {
                status,
                parent: match (position, parent) {
                    (0, _) | (_, None) => None,
                    (_, Some(index)) => Some(index.index(position)),
                },
                assignee: assignee.filter(|_| employee_count > 0),
            })
            .collect()
    })
}

/// Strategy for (active, total) counts with active <= total
pub fn workload_counts_strategy() -> impl Strategy<Value = (i64, i64)> {
    (0i64..20).prop_flat_map(|active| (Just(active), active..active + 20))
}
