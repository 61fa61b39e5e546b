//! # Busy Employee Ranking
//!
//! Orders employees by how many `in_progress` tasks they hold. The ranking is
//! used most-busy-first by the busy employees view and least-busy-first by the
//! important-task selector. Sorting is stable, so employees with equal counts
//! keep the store's natural (ascending id) order.

use tracing::debug;

use crate::constants::TaskStatus;
use crate::error::Result;
use crate::models::{BusyEmployee, EmployeeWorkload};
use crate::store::{AssignmentStore, TaskRepository};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankOrder {
    MostBusyFirst,
    LeastBusyFirst,
}

/// Sort workloads by active task count
pub fn rank_by_active_tasks(
    mut workloads: Vec<EmployeeWorkload>,
    order: RankOrder,
) -> Vec<EmployeeWorkload> {
    match order {
        RankOrder::LeastBusyFirst => workloads.sort_by_key(|w| w.active_tasks_count),
        RankOrder::MostBusyFirst => {
            workloads.sort_by(|a, b| b.active_tasks_count.cmp(&a.active_tasks_count))
        }
    }
    workloads
}

/// Employee with the fewest active tasks; the first one wins ties
pub fn least_busy(workloads: &[EmployeeWorkload]) -> Option<&EmployeeWorkload> {
    workloads.iter().min_by_key(|w| w.active_tasks_count)
}

/// Builds the busy employees view from a store
pub struct BusyEmployeeRanking<'a, S: ?Sized> {
    store: &'a S,
}

impl<'a, S> BusyEmployeeRanking<'a, S>
where
    S: AssignmentStore + TaskRepository + ?Sized,
{
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Every employee, most busy first, with their current tasks
    pub async fn busy_employees(&self) -> Result<Vec<BusyEmployee>> {
        let workloads = self.store.count_active_tasks_by_employee().await?;
        let ranked = rank_by_active_tasks(workloads, RankOrder::MostBusyFirst);

        let mut view = Vec::with_capacity(ranked.len());
        for workload in ranked {
            let current_tasks = self
                .store
                .find_tasks_by_employee_and_status(workload.employee_id(), TaskStatus::InProgress)
                .await?;
            view.push(BusyEmployee {
                id: workload.employee.id,
                fullname: workload.employee.fullname(),
                active_tasks_count: workload.active_tasks_count,
                current_tasks,
            });
        }

        debug!(employee_count = view.len(), "Built busy employees view");
        Ok(view)
    }
}
