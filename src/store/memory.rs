//! In-process store with the same semantics as the Postgres schema:
//! ascending ids, cascading task deletes, and assignees cleared when an
//! employee is removed.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::BTreeMap;

use super::{AssignmentStore, EmployeeRepository, Repository, TaskRepository};
use crate::constants::TaskStatus;
use crate::error::{Result, WorkforceError};
use crate::models::{
    Employee, EmployeeWorkload, NewEmployee, NewTask, Page, PageRequest, Task,
};

#[derive(Debug, Default)]
struct MemoryState {
    employees: BTreeMap<i64, Employee>,
    tasks: BTreeMap<i64, Task>,
    last_employee_id: i64,
    last_task_id: i64,
}

impl MemoryState {
    fn workload(&self, employee: &Employee) -> EmployeeWorkload {
        let (active, total) = self
            .tasks
            .values()
            .filter(|t| t.assigned_employee_id == Some(employee.id))
            .fold((0, 0), |(active, total), t| {
                (active + i64::from(t.status.is_active()), total + 1)
            });
        EmployeeWorkload {
            employee: employee.clone(),
            active_tasks_count: active,
            total_tasks_count: total,
        }
    }

    fn holds_parent_linked_task(&self, employee_id: i64) -> bool {
        self.tasks
            .values()
            .any(|t| t.assigned_employee_id == Some(employee_id) && t.parent_task_id.is_some())
    }

    fn has_child_in_progress(&self, task_id: i64) -> bool {
        self.tasks
            .values()
            .any(|t| t.parent_task_id == Some(task_id) && t.status == TaskStatus::InProgress)
    }

    fn page_of<T: Clone>(items: Vec<&T>, request: PageRequest) -> Result<Page<T>> {
        let count = items.len() as i64;
        let results = items
            .into_iter()
            .skip(request.offset() as usize)
            .take(request.limit() as usize)
            .cloned()
            .collect();
        Page::new(request, count, results)
    }
}

/// Store kept entirely in memory behind a `parking_lot::RwLock`
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: RwLock<MemoryState>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn employee_count(&self) -> usize {
        self.state.read().employees.len()
    }

    pub fn task_count(&self) -> usize {
        self.state.read().tasks.len()
    }

    /// Snapshot of every task in id order
    pub fn all_tasks(&self) -> Vec<Task> {
        self.state.read().tasks.values().cloned().collect()
    }
}

#[async_trait]
impl EmployeeRepository for InMemoryStore {
    async fn create_employee(&self, new_employee: NewEmployee) -> Result<Employee> {
        let mut state = self.state.write();
        state.last_employee_id += 1;
        let now = Utc::now().naive_utc();
        let employee = Employee {
            id: state.last_employee_id,
            first_name: new_employee.first_name,
            middle_name: new_employee.middle_name,
            last_name: new_employee.last_name,
            position: new_employee.position,
            experience: new_employee.experience,
            tasks_completed: new_employee.tasks_completed,
            created_at: now,
            updated_at: now,
        };
        state.employees.insert(employee.id, employee.clone());
        Ok(employee)
    }

    async fn find_employee(&self, id: i64) -> Result<Option<Employee>> {
        Ok(self.state.read().employees.get(&id).cloned())
    }

    async fn list_employees(&self, request: PageRequest) -> Result<Page<Employee>> {
        let state = self.state.read();
        MemoryState::page_of(state.employees.values().collect(), request)
    }

    async fn save_employee(&self, employee: &Employee) -> Result<Option<Employee>> {
        let mut state = self.state.write();
        let Some(stored) = state.employees.get_mut(&employee.id) else {
            return Ok(None);
        };
        *stored = Employee {
            created_at: stored.created_at,
            updated_at: Utc::now().naive_utc(),
            ..employee.clone()
        };
        Ok(Some(stored.clone()))
    }

    async fn delete_employee(&self, id: i64) -> Result<bool> {
        let mut state = self.state.write();
        if state.employees.remove(&id).is_none() {
            return Ok(false);
        }
        for task in state.tasks.values_mut() {
            if task.assigned_employee_id == Some(id) {
                task.assigned_employee_id = None;
            }
        }
        Ok(true)
    }
}

#[async_trait]
impl TaskRepository for InMemoryStore {
    async fn create_task(&self, new_task: NewTask) -> Result<Task> {
        let mut state = self.state.write();
        if let Some(parent_id) = new_task.parent_task_id {
            if !state.tasks.contains_key(&parent_id) {
                return Err(WorkforceError::task_not_found(parent_id));
            }
        }
        if let Some(employee_id) = new_task.assigned_employee_id {
            if !state.employees.contains_key(&employee_id) {
                return Err(WorkforceError::employee_not_found(employee_id));
            }
        }
        state.last_task_id += 1;
        let now = Utc::now().naive_utc();
        let task = Task {
            id: state.last_task_id,
            name: new_task.name,
            description: new_task.description,
            priority: new_task.priority,
            deadline: new_task.deadline,
            status: new_task.status,
            completion_time: new_task.completion_time,
            parent_task_id: new_task.parent_task_id,
            assigned_employee_id: new_task.assigned_employee_id,
            created_at: now,
            updated_at: now,
        };
        state.tasks.insert(task.id, task.clone());
        Ok(task)
    }

    async fn find_task(&self, id: i64) -> Result<Option<Task>> {
        Ok(self.state.read().tasks.get(&id).cloned())
    }

    async fn list_tasks(&self, request: PageRequest) -> Result<Page<Task>> {
        let state = self.state.read();
        MemoryState::page_of(state.tasks.values().collect(), request)
    }

    async fn save_task(&self, task: &Task) -> Result<Option<Task>> {
        let mut state = self.state.write();
        if let Some(parent_id) = task.parent_task_id {
            if parent_id == task.id {
                return Err(WorkforceError::validation(
                    "parent_task",
                    "A task cannot be its own parent.",
                ));
            }
            if !state.tasks.contains_key(&parent_id) {
                return Err(WorkforceError::task_not_found(parent_id));
            }
        }
        if let Some(employee_id) = task.assigned_employee_id {
            if !state.employees.contains_key(&employee_id) {
                return Err(WorkforceError::employee_not_found(employee_id));
            }
        }
        let Some(stored) = state.tasks.get_mut(&task.id) else {
            return Ok(None);
        };
        *stored = Task {
            created_at: stored.created_at,
            updated_at: Utc::now().naive_utc(),
            ..task.clone()
        };
        Ok(Some(stored.clone()))
    }

    async fn delete_task(&self, id: i64) -> Result<bool> {
        let mut state = self.state.write();
        if !state.tasks.contains_key(&id) {
            return Ok(false);
        }
        let mut pending = vec![id];
        while let Some(current) = pending.pop() {
            state.tasks.remove(&current);
            pending.extend(
                state
                    .tasks
                    .values()
                    .filter(|t| t.parent_task_id == Some(current))
                    .map(|t| t.id),
            );
        }
        Ok(true)
    }

    async fn find_tasks_by_employee_and_status(
        &self,
        employee_id: i64,
        status: TaskStatus,
    ) -> Result<Vec<Task>> {
        Ok(self
            .state
            .read()
            .tasks
            .values()
            .filter(|t| t.assigned_employee_id == Some(employee_id) && t.status == status)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl AssignmentStore for InMemoryStore {
    async fn find_blocking_unassigned_tasks(&self) -> Result<Vec<Task>> {
        let state = self.state.read();
        Ok(state
            .tasks
            .values()
            .filter(|t| {
                t.status == TaskStatus::ToAssign
                    && t.assigned_employee_id.is_none()
                    && state.has_child_in_progress(t.id)
            })
            .cloned()
            .collect())
    }

    async fn count_active_tasks_by_employee(&self) -> Result<Vec<EmployeeWorkload>> {
        let state = self.state.read();
        Ok(state
            .employees
            .values()
            .map(|e| state.workload(e))
            .collect())
    }

    async fn find_employee_with_fewest_total_tasks_among_parent_task_workers(
        &self,
    ) -> Result<Option<EmployeeWorkload>> {
        let state = self.state.read();
        // min_by_key keeps the first of equal minima, i.e. the lowest id
        Ok(state
            .employees
            .values()
            .filter(|e| state.holds_parent_linked_task(e.id))
            .map(|e| state.workload(e))
            .min_by_key(|w| w.total_tasks_count))
    }

    async fn assign_task(&self, task_id: i64, employee_id: i64) -> Result<Task> {
        let mut state = self.state.write();
        if !state.employees.contains_key(&employee_id) {
            return Err(WorkforceError::employee_not_found(employee_id));
        }
        let task = state
            .tasks
            .get_mut(&task_id)
            .ok_or_else(|| WorkforceError::task_not_found(task_id))?;
        task.assigned_employee_id = Some(employee_id);
        task.updated_at = Utc::now().naive_utc();
        Ok(task.clone())
    }
}

#[async_trait]
impl Repository for InMemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::TaskPriority;
    use chrono::NaiveDate;

    fn new_employee(first: &str) -> NewEmployee {
        NewEmployee {
            first_name: first.to_string(),
            middle_name: None,
            last_name: "Tester".to_string(),
            position: "Engineer".to_string(),
            experience: 3,
            tasks_completed: 0,
        }
    }

    fn new_task(name: &str, parent: Option<i64>, assignee: Option<i64>, status: TaskStatus) -> NewTask {
        NewTask {
            name: name.to_string(),
            description: None,
            priority: TaskPriority::Medium,
            deadline: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
            status,
            completion_time: None,
            parent_task_id: parent,
            assigned_employee_id: assignee,
        }
    }

    #[tokio::test]
    async fn test_deleting_parent_cascades_to_descendants() {
        let store = InMemoryStore::new();
        let root = store
            .create_task(new_task("root", None, None, TaskStatus::ToAssign))
            .await
            .unwrap();
        let child = store
            .create_task(new_task("child", Some(root.id), None, TaskStatus::ToAssign))
            .await
            .unwrap();
        store
            .create_task(new_task("grandchild", Some(child.id), None, TaskStatus::ToAssign))
            .await
            .unwrap();
        let other = store
            .create_task(new_task("other", None, None, TaskStatus::ToAssign))
            .await
            .unwrap();

        assert!(store.delete_task(root.id).await.unwrap());
        assert_eq!(store.task_count(), 1);
        assert!(store.find_task(other.id).await.unwrap().is_some());
        assert!(!store.delete_task(root.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_deleting_employee_unassigns_tasks() {
        let store = InMemoryStore::new();
        let employee = store.create_employee(new_employee("Anna")).await.unwrap();
        let task = store
            .create_task(new_task("t", None, Some(employee.id), TaskStatus::InProgress))
            .await
            .unwrap();

        assert!(store.delete_employee(employee.id).await.unwrap());
        let reloaded = store.find_task(task.id).await.unwrap().unwrap();
        assert_eq!(reloaded.assigned_employee_id, None);
    }

    #[tokio::test]
    async fn test_create_rejects_dangling_references() {
        let store = InMemoryStore::new();
        let result = store
            .create_task(new_task("t", Some(99), None, TaskStatus::ToAssign))
            .await;
        assert!(matches!(result, Err(WorkforceError::NotFound { resource: "Task", id: 99 })));

        let result = store
            .create_task(new_task("t", None, Some(5), TaskStatus::ToAssign))
            .await;
        assert!(matches!(
            result,
            Err(WorkforceError::NotFound {
                resource: "Employee",
                id: 5
            })
        ));
    }

    #[tokio::test]
    async fn test_workloads_in_natural_order() {
        let store = InMemoryStore::new();
        let a = store.create_employee(new_employee("Anna")).await.unwrap();
        let b = store.create_employee(new_employee("Boris")).await.unwrap();
        for status in [TaskStatus::InProgress, TaskStatus::Completed] {
            store
                .create_task(new_task("t", None, Some(b.id), status))
                .await
                .unwrap();
        }

        let workloads = store.count_active_tasks_by_employee().await.unwrap();
        assert_eq!(workloads.len(), 2);
        assert_eq!(workloads[0].employee_id(), a.id);
        assert_eq!(workloads[0].active_tasks_count, 0);
        assert_eq!(workloads[1].active_tasks_count, 1);
        assert_eq!(workloads[1].total_tasks_count, 2);
    }

    #[tokio::test]
    async fn test_assign_task_missing_records() {
        let store = InMemoryStore::new();
        let employee = store.create_employee(new_employee("Anna")).await.unwrap();
        assert!(store.assign_task(1, employee.id).await.is_err());

        let task = store
            .create_task(new_task("t", None, None, TaskStatus::ToAssign))
            .await
            .unwrap();
        assert!(store.assign_task(task.id, 42).await.is_err());
        let assigned = store.assign_task(task.id, employee.id).await.unwrap();
        assert_eq!(assigned.assigned_employee_id, Some(employee.id));
        assert_eq!(assigned.status, TaskStatus::ToAssign);
    }

    #[tokio::test]
    async fn test_pagination_over_tasks() {
        let store = InMemoryStore::new();
        for i in 0..12 {
            store
                .create_task(new_task(&format!("t{i}"), None, None, TaskStatus::ToAssign))
                .await
                .unwrap();
        }
        let page = store
            .list_tasks(PageRequest { page: 2, page_size: 5 })
            .await
            .unwrap();
        assert_eq!(page.count, 12);
        assert_eq!(page.results.len(), 5);
        assert_eq!(page.results[0].id, 6);
        assert_eq!(page.next, Some(3));

        let past = store.list_tasks(PageRequest { page: 4, page_size: 5 }).await;
        assert!(matches!(past, Err(WorkforceError::InvalidPage)));
    }
}
