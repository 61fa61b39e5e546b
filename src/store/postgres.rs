//! Postgres-backed store. Thin wrapper over the model queries that maps
//! SQLx errors into [`WorkforceError`] and adds pagination.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use super::{AssignmentStore, EmployeeRepository, Repository, TaskRepository};
use crate::constants::TaskStatus;
use crate::error::{Result, WorkforceError};
use crate::models::{
    Employee, EmployeeWorkload, NewEmployee, NewTask, Page, PageRequest, Task,
};

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl EmployeeRepository for PgStore {
    async fn create_employee(&self, new_employee: NewEmployee) -> Result<Employee> {
        Ok(Employee::create(&self.pool, new_employee).await?)
    }

    async fn find_employee(&self, id: i64) -> Result<Option<Employee>> {
        Ok(Employee::find_by_id(&self.pool, id).await?)
    }

    async fn list_employees(&self, request: PageRequest) -> Result<Page<Employee>> {
        let count = Employee::count(&self.pool).await?;
        let results = Employee::list_page(&self.pool, request.limit(), request.offset()).await?;
        Page::new(request, count, results)
    }

    async fn save_employee(&self, employee: &Employee) -> Result<Option<Employee>> {
        Ok(Employee::update(&self.pool, employee).await?)
    }

    async fn delete_employee(&self, id: i64) -> Result<bool> {
        Ok(Employee::delete(&self.pool, id).await?)
    }
}

#[async_trait]
impl TaskRepository for PgStore {
    async fn create_task(&self, new_task: NewTask) -> Result<Task> {
        Ok(Task::create(&self.pool, new_task).await?)
    }

    async fn find_task(&self, id: i64) -> Result<Option<Task>> {
        Ok(Task::find_by_id(&self.pool, id).await?)
    }

    async fn list_tasks(&self, request: PageRequest) -> Result<Page<Task>> {
        let count = Task::count(&self.pool).await?;
        let results = Task::list_page(&self.pool, request.limit(), request.offset()).await?;
        Page::new(request, count, results)
    }

    async fn save_task(&self, task: &Task) -> Result<Option<Task>> {
        Ok(Task::update(&self.pool, task).await?)
    }

    async fn delete_task(&self, id: i64) -> Result<bool> {
        Ok(Task::delete(&self.pool, id).await?)
    }

    async fn find_tasks_by_employee_and_status(
        &self,
        employee_id: i64,
        status: TaskStatus,
    ) -> Result<Vec<Task>> {
        Ok(Task::find_by_employee_and_status(&self.pool, employee_id, status).await?)
    }
}

#[async_trait]
impl AssignmentStore for PgStore {
    async fn find_blocking_unassigned_tasks(&self) -> Result<Vec<Task>> {
        let tasks = Task::find_blocking_unassigned(&self.pool).await?;
        debug!(count = tasks.len(), "Loaded blocking unassigned tasks");
        Ok(tasks)
    }

    async fn count_active_tasks_by_employee(&self) -> Result<Vec<EmployeeWorkload>> {
        Ok(Employee::workloads(&self.pool).await?)
    }

    async fn find_employee_with_fewest_total_tasks_among_parent_task_workers(
        &self,
    ) -> Result<Option<EmployeeWorkload>> {
        Ok(Employee::fewest_total_tasks_among_parent_task_workers(&self.pool).await?)
    }

    async fn assign_task(&self, task_id: i64, employee_id: i64) -> Result<Task> {
        Task::assign_employee(&self.pool, task_id, employee_id)
            .await?
            .ok_or_else(|| WorkforceError::task_not_found(task_id))
    }
}

#[async_trait]
impl Repository for PgStore {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn health_check(&self) -> Result<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }
}
