//! Derived per-employee task counts.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::employee::Employee;
use crate::models::task::Task;

/// An employee together with the counts the assignment rules look at
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct EmployeeWorkload {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub employee: Employee,
    /// Tasks assigned to the employee with status `in_progress`
    pub active_tasks_count: i64,
    /// Tasks assigned to the employee in any status
    pub total_tasks_count: i64,
}

impl EmployeeWorkload {
    pub fn employee_id(&self) -> i64 {
        self.employee.id
    }
}

/// Entry of the busy employees view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusyEmployee {
    pub id: i64,
    pub fullname: String,
    pub active_tasks_count: i64,
    pub current_tasks: Vec<Task>,
}
