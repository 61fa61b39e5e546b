//! # Important Task Selector
//!
//! Finds unassigned tasks that are holding up work already in progress (a
//! `to_assign` task with at least one child task `in_progress`) and hands each
//! of them to an employee.
//!
//! ## Choosing the employee
//!
//! Two candidates are looked up for every important task:
//!
//! - the **least busy** employee, by number of `in_progress` tasks
//! - the **parent-task worker**: among employees already holding a task that
//!   has a parent task, the one with the fewest tasks overall
//!
//! The parent-task worker gets the task when their total task count is at most
//! the least busy employee's active count plus the slack (2 by default);
//! otherwise the least busy employee does. Ties inside each lookup go to the
//! lowest employee id.
//!
//! Both candidates are looked up again for every task, after the previous
//! assignment has been written, so later tasks see the updated counts. If
//! either lookup comes back empty the whole run fails with
//! [`WorkforceError::NoSuitableEmployee`]; assignments written before that
//! point are kept.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::constants::DEFAULT_ASSIGNMENT_SLACK;
use crate::error::{Result, WorkforceError};
use crate::logging::log_assignment_decision;
use crate::models::{Employee, EmployeeSummary, EmployeeWorkload, Task};
use crate::services::busy_employees::least_busy;
use crate::store::AssignmentStore;

/// Which of the two candidates received the task
#[derive(Debug, Clone, PartialEq)]
pub enum AssigneeChoice {
    ParentTaskWorker(EmployeeWorkload),
    LeastBusy(EmployeeWorkload),
}

impl AssigneeChoice {
    pub fn employee(&self) -> &Employee {
        match self {
            AssigneeChoice::ParentTaskWorker(w) | AssigneeChoice::LeastBusy(w) => &w.employee,
        }
    }

    pub fn rule(&self) -> &'static str {
        match self {
            AssigneeChoice::ParentTaskWorker(_) => "parent_task_worker",
            AssigneeChoice::LeastBusy(_) => "least_busy",
        }
    }
}

/// Keep the work with the parent-task worker unless that would leave them
/// more than `slack` tasks ahead of the least busy employee
pub fn choose_assignee(
    least_busy: &EmployeeWorkload,
    parent_task_worker: &EmployeeWorkload,
    slack: i64,
) -> AssigneeChoice {
    if parent_task_worker.total_tasks_count <= least_busy.active_tasks_count + slack {
        AssigneeChoice::ParentTaskWorker(parent_task_worker.clone())
    } else {
        AssigneeChoice::LeastBusy(least_busy.clone())
    }
}

/// One row of the important tasks response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportantTaskAssignment {
    pub id: i64,
    /// Task name
    pub task: String,
    pub deadline: NaiveDate,
    pub employee: EmployeeSummary,
}

impl ImportantTaskAssignment {
    fn new(task: &Task, employee: &Employee) -> Self {
        Self {
            id: task.id,
            task: task.name.clone(),
            deadline: task.deadline,
            employee: EmployeeSummary::from(employee),
        }
    }
}

/// Runs the important-task assignment over a store
pub struct ImportantTaskSelector<'a, S: ?Sized> {
    store: &'a S,
    slack: i64,
}

impl<'a, S> ImportantTaskSelector<'a, S>
where
    S: AssignmentStore + ?Sized,
{
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            slack: DEFAULT_ASSIGNMENT_SLACK,
        }
    }

    pub fn with_slack(mut self, slack: i64) -> Self {
        self.slack = slack;
        self
    }

    /// Assign every important task, in candidate order
    pub async fn run(&self) -> Result<Vec<ImportantTaskAssignment>> {
        let candidates = self.store.find_blocking_unassigned_tasks().await?;
        info!(
            candidate_count = candidates.len(),
            slack = self.slack,
            "Assigning important tasks"
        );

        let mut assignments = Vec::with_capacity(candidates.len());
        for task in candidates {
            let choice = self.select_for(&task).await?;
            let employee = choice.employee();

            let assigned = self.store.assign_task(task.id, employee.id).await?;
            assignments.push(ImportantTaskAssignment::new(&assigned, employee));
        }

        info!(
            assigned_count = assignments.len(),
            "Important task assignment complete"
        );
        Ok(assignments)
    }

    async fn select_for(&self, task: &Task) -> Result<AssigneeChoice> {
        let workloads = self.store.count_active_tasks_by_employee().await?;
        let parent_task_worker = self
            .store
            .find_employee_with_fewest_total_tasks_among_parent_task_workers()
            .await?;

        let (Some(least_busy), Some(parent_task_worker)) =
            (least_busy(&workloads), parent_task_worker)
        else {
            warn!(
                task_id = task.id,
                employee_count = workloads.len(),
                "No suitable employee for important task"
            );
            return Err(WorkforceError::NoSuitableEmployee);
        };

        let choice = choose_assignee(least_busy, &parent_task_worker, self.slack);
        log_assignment_decision(
            task.id,
            choice.employee().id,
            choice.rule(),
            parent_task_worker.total_tasks_count,
            least_busy.active_tasks_count,
            self.slack,
        );
        Ok(choice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn workload(id: i64, active: i64, total: i64) -> EmployeeWorkload {
        let now = Utc::now().naive_utc();
        EmployeeWorkload {
            employee: Employee {
                id,
                first_name: "Test".to_string(),
                middle_name: None,
                last_name: format!("Employee{id}"),
                position: "Engineer".to_string(),
                experience: 2,
                tasks_completed: 0,
                created_at: now,
                updated_at: now,
            },
            active_tasks_count: active,
            total_tasks_count: total,
        }
    }

    #[test]
    fn test_parent_task_worker_within_slack() {
        let least_busy = workload(2, 0, 0);
        let parent_worker = workload(1, 2, 2);
        let choice = choose_assignee(&least_busy, &parent_worker, 2);
        assert!(matches!(choice, AssigneeChoice::ParentTaskWorker(_)));
        assert_eq!(choice.employee().id, 1);
        assert_eq!(choice.rule(), "parent_task_worker");
    }

    #[test]
    fn test_least_busy_when_parent_worker_overloaded() {
        let least_busy = workload(2, 0, 0);
        let parent_worker = workload(1, 2, 5);
        let choice = choose_assignee(&least_busy, &parent_worker, 2);
        assert!(matches!(choice, AssigneeChoice::LeastBusy(_)));
        assert_eq!(choice.employee().id, 2);
    }

    #[test]
    fn test_boundary_is_inclusive() {
        let least_busy = workload(2, 1, 4);
        assert_eq!(choose_assignee(&least_busy, &workload(1, 0, 3), 2).employee().id, 1);
        assert_eq!(choose_assignee(&least_busy, &workload(1, 0, 4), 2).employee().id, 2);
    }

    #[test]
    fn test_zero_slack() {
        let least_busy = workload(2, 1, 1);
        assert_eq!(choose_assignee(&least_busy, &workload(1, 1, 1), 0).employee().id, 1);
        assert_eq!(choose_assignee(&least_busy, &workload(1, 1, 2), 0).employee().id, 2);
    }

    #[test]
    fn test_assignment_row_shape() {
        let now = Utc::now().naive_utc();
        let task = Task {
            id: 11,
            name: "Unblock release".to_string(),
            description: None,
            priority: crate::constants::TaskPriority::High,
            deadline: NaiveDate::from_ymd_opt(2030, 6, 1).unwrap(),
            status: crate::constants::TaskStatus::ToAssign,
            completion_time: None,
            parent_task_id: None,
            assigned_employee_id: Some(1),
            created_at: now,
            updated_at: now,
        };
        let row = ImportantTaskAssignment::new(&task, &workload(1, 0, 0).employee);
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["id"], 11);
        assert_eq!(json["task"], "Unblock release");
        assert_eq!(json["deadline"], "2030-06-01");
        assert_eq!(json["employee"]["fullname"], "Employee1 Test");
    }
}
