//! # Model Factories
//!
//! Builders for employees and tasks that persist through any store.

use workforce_core::constants::{TaskPriority, TaskStatus};
use workforce_core::error::Result;
use workforce_core::models::{Employee, NewEmployee, NewTask, Task};
use workforce_core::store::{EmployeeRepository, TaskRepository};

use super::valid_deadline;

/// Factory for creating Employee instances
#[derive(Debug, Clone)]
pub struct EmployeeFactory {
    first_name: String,
    middle_name: Option<String>,
    last_name: String,
    position: String,
    experience: i16,
    tasks_completed: i32,
}

impl Default for EmployeeFactory {
    fn default() -> Self {
        Self {
            first_name: "Anna".to_string(),
            middle_name: None,
            last_name: "Ivanova".to_string(),
            position: "Engineer".to_string(),
            experience: 3,
            tasks_completed: 0,
        }
    }
}

impl EmployeeFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(mut self, first_name: &str, last_name: &str) -> Self {
        self.first_name = first_name.to_string();
        self.last_name = last_name.to_string();
        self
    }

    pub fn with_middle_name(mut self, middle_name: &str) -> Self {
        self.middle_name = Some(middle_name.to_string());
        self
    }

    pub fn with_experience(mut self, experience: i16) -> Self {
        self.experience = experience;
        self
    }

    pub fn build(&self) -> NewEmployee {
        NewEmployee {
            first_name: self.first_name.clone(),
            middle_name: self.middle_name.clone(),
            last_name: self.last_name.clone(),
            position: self.position.clone(),
            experience: self.experience,
            tasks_completed: self.tasks_completed,
        }
    }

    pub async fn create<S: EmployeeRepository + ?Sized>(&self, store: &S) -> Result<Employee> {
        store.create_employee(self.build()).await
    }
}

/// Factory for creating Task instances
#[derive(Debug, Clone)]
pub struct TaskFactory {
    name: String,
    priority: TaskPriority,
    status: TaskStatus,
    parent_task_id: Option<i64>,
    assigned_employee_id: Option<i64>,
}

impl Default for TaskFactory {
    fn default() -> Self {
        Self {
            name: "Task".to_string(),
            priority: TaskPriority::Medium,
            status: TaskStatus::ToAssign,
            parent_task_id: None,
            assigned_employee_id: None,
        }
    }
}

impl TaskFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn child_of(mut self, parent: &Task) -> Self {
        self.parent_task_id = Some(parent.id);
        self
    }

    /// Assigned and in progress
    pub fn assigned_to(mut self, employee: &Employee) -> Self {
        self.assigned_employee_id = Some(employee.id);
        self.status = TaskStatus::InProgress;
        self
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn in_progress(self) -> Self {
        self.with_status(TaskStatus::InProgress)
    }

    pub fn completed(self) -> Self {
        self.with_status(TaskStatus::Completed)
    }

    pub fn build(&self) -> NewTask {
        NewTask {
            name: self.name.clone(),
            description: None,
            priority: self.priority,
            deadline: valid_deadline(),
            status: self.status,
            completion_time: None,
            parent_task_id: self.parent_task_id,
            assigned_employee_id: self.assigned_employee_id,
        }
    }

    pub async fn create<S: TaskRepository + ?Sized>(&self, store: &S) -> Result<Task> {
        store.create_task(self.build()).await
    }
}
