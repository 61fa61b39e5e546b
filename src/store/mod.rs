//! # Storage Abstraction
//!
//! Repository traits over employees and tasks, plus the narrow
//! [`AssignmentStore`] interface the important-task selector runs against.
//!
//! Two implementations ship with the crate:
//!
//! - [`PgStore`] - Postgres through SQLx, delegating to the model queries
//! - [`InMemoryStore`] - a lock-guarded in-process store for tests, benchmarks
//!   and the `memory` storage backend
//!
//! Both return records in natural order (ascending id); ranking ties are
//! broken on that order.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::constants::TaskStatus;
use crate::error::Result;
use crate::models::{
    Employee, EmployeeWorkload, NewEmployee, NewTask, Page, PageRequest, Task,
};

pub use memory::InMemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    async fn create_employee(&self, new_employee: NewEmployee) -> Result<Employee>;

    async fn find_employee(&self, id: i64) -> Result<Option<Employee>>;

    async fn list_employees(&self, request: PageRequest) -> Result<Page<Employee>>;

    /// Persist every mutable field; `None` when the employee does not exist
    async fn save_employee(&self, employee: &Employee) -> Result<Option<Employee>>;

    /// Delete an employee, unassigning their tasks
    async fn delete_employee(&self, id: i64) -> Result<bool>;
}

#[async_trait]
pub trait TaskRepository: Send + Sync {
    async fn create_task(&self, new_task: NewTask) -> Result<Task>;

    async fn find_task(&self, id: i64) -> Result<Option<Task>>;

    async fn list_tasks(&self, request: PageRequest) -> Result<Page<Task>>;

    /// Persist every mutable field; `None` when the task does not exist
    async fn save_task(&self, task: &Task) -> Result<Option<Task>>;

    /// Delete a task and, transitively, its child tasks
    async fn delete_task(&self, id: i64) -> Result<bool>;

    async fn find_tasks_by_employee_and_status(
        &self,
        employee_id: i64,
        status: TaskStatus,
    ) -> Result<Vec<Task>>;
}

/// Queries and writes the important-task selector depends on
#[async_trait]
pub trait AssignmentStore: Send + Sync {
    /// `to_assign` tasks without an assignee that have a child `in_progress`
    async fn find_blocking_unassigned_tasks(&self) -> Result<Vec<Task>>;

    /// Every employee with active and total task counts, in natural order
    async fn count_active_tasks_by_employee(&self) -> Result<Vec<EmployeeWorkload>>;

    /// Fewest total tasks among employees holding a task that has a parent
    async fn find_employee_with_fewest_total_tasks_among_parent_task_workers(
        &self,
    ) -> Result<Option<EmployeeWorkload>>;

    /// Set the task's assignee and persist it
    async fn assign_task(&self, task_id: i64, employee_id: i64) -> Result<Task>;
}

/// Everything the web layer needs from a backend
#[async_trait]
pub trait Repository: EmployeeRepository + TaskRepository + AssignmentStore {
    fn backend_name(&self) -> &'static str;

    async fn health_check(&self) -> Result<()>;
}
