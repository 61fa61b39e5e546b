//! # Task Model
//!
//! Maps to the `tasks` table. Tasks form a forest through `parent_task_id`
//! (deleting a parent deletes its children) and optionally point at the
//! employee working on them (deleting the employee clears the link).
//!
//! ## Status rules
//!
//! Status is recomputed by [`Task::recompute_status`] whenever a task is
//! updated through the API:
//!
//! - an assignee puts the task `in_progress`; no assignee sends it back to
//!   `to_assign` and clears the completion date
//! - a completion date marks it `completed`, or `overdue` when it is later
//!   than the deadline

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use super::{deserialize_non_null, deserialize_present};
use crate::constants::{TaskPriority, TaskStatus};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub priority: TaskPriority,
    pub deadline: NaiveDate,
    pub status: TaskStatus,
    pub completion_time: Option<NaiveDate>,
    #[serde(rename = "parent_task")]
    pub parent_task_id: Option<i64>,
    #[serde(rename = "assigned_employee")]
    pub assigned_employee_id: Option<i64>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// New Task for creation (without generated fields)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTask {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub priority: TaskPriority,
    pub deadline: NaiveDate,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub completion_time: Option<NaiveDate>,
    #[serde(default, rename = "parent_task")]
    pub parent_task_id: Option<i64>,
    #[serde(default, rename = "assigned_employee")]
    pub assigned_employee_id: Option<i64>,
}

/// Partial task update; `None` leaves a field untouched, `Some(None)` clears
/// a nullable field
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskChanges {
    #[serde(default, deserialize_with = "deserialize_non_null")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_non_null")]
    pub priority: Option<TaskPriority>,
    #[serde(default, deserialize_with = "deserialize_non_null")]
    pub deadline: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_non_null")]
    pub status: Option<TaskStatus>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub completion_time: Option<Option<NaiveDate>>,
    #[serde(default, rename = "parent_task", deserialize_with = "deserialize_present")]
    pub parent_task_id: Option<Option<i64>>,
    #[serde(
        default,
        rename = "assigned_employee",
        deserialize_with = "deserialize_present"
    )]
    pub assigned_employee_id: Option<Option<i64>>,
}

impl From<NewTask> for TaskChanges {
    fn from(new_task: NewTask) -> Self {
        Self {
            name: Some(new_task.name),
            description: Some(new_task.description),
            priority: Some(new_task.priority),
            deadline: Some(new_task.deadline),
            status: Some(new_task.status),
            completion_time: Some(new_task.completion_time),
            parent_task_id: Some(new_task.parent_task_id),
            assigned_employee_id: Some(new_task.assigned_employee_id),
        }
    }
}

impl Task {
    /// Apply a partial update in place
    pub fn apply_changes(&mut self, changes: TaskChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(priority) = changes.priority {
            self.priority = priority;
        }
        if let Some(deadline) = changes.deadline {
            self.deadline = deadline;
        }
        if let Some(status) = changes.status {
            self.status = status;
        }
        if let Some(completion_time) = changes.completion_time {
            self.completion_time = completion_time;
        }
        if let Some(parent_task_id) = changes.parent_task_id {
            self.parent_task_id = parent_task_id;
        }
        if let Some(assigned_employee_id) = changes.assigned_employee_id {
            self.assigned_employee_id = assigned_employee_id;
        }
    }

    /// Derive status from assignee, completion date and deadline
    pub fn recompute_status(&mut self) {
        if self.assigned_employee_id.is_some() {
            self.status = TaskStatus::InProgress;
        } else {
            self.status = TaskStatus::ToAssign;
            self.completion_time = None;
        }

        if let Some(completed_on) = self.completion_time {
            self.status = if completed_on > self.deadline {
                TaskStatus::Overdue
            } else {
                TaskStatus::Completed
            };
        }
    }

    /// Create a new task
    pub async fn create(pool: &PgPool, new_task: NewTask) -> Result<Task, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (
                name, description, priority, deadline, status, completion_time,
                parent_task_id, assigned_employee_id, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, NOW(), NOW())
            RETURNING id, name, description, priority, deadline, status, completion_time,
                      parent_task_id, assigned_employee_id, created_at, updated_at
            "#,
        )
        .bind(new_task.name)
        .bind(new_task.description)
        .bind(new_task.priority)
        .bind(new_task.deadline)
        .bind(new_task.status)
        .bind(new_task.completion_time)
        .bind(new_task.parent_task_id)
        .bind(new_task.assigned_employee_id)
        .fetch_one(pool)
        .await
    }

    /// Find a task by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Task>, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            r#"
            SELECT id, name, description, priority, deadline, status, completion_time,
                   parent_task_id, assigned_employee_id, created_at, updated_at
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// One page of tasks in natural (id) order
    pub async fn list_page(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Task>, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            r#"
            SELECT id, name, description, priority, deadline, status, completion_time,
                   parent_task_id, assigned_employee_id, created_at, updated_at
            FROM tasks
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM tasks")
            .fetch_one(pool)
            .await
    }

    /// Persist every mutable column of `task`
    pub async fn update(pool: &PgPool, task: &Task) -> Result<Option<Task>, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET
                name = $2,
                description = $3,
                priority = $4,
                deadline = $5,
                status = $6,
                completion_time = $7,
                parent_task_id = $8,
                assigned_employee_id = $9,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, description, priority, deadline, status, completion_time,
                      parent_task_id, assigned_employee_id, created_at, updated_at
            "#,
        )
        .bind(task.id)
        .bind(&task.name)
        .bind(&task.description)
        .bind(task.priority)
        .bind(task.deadline)
        .bind(task.status)
        .bind(task.completion_time)
        .bind(task.parent_task_id)
        .bind(task.assigned_employee_id)
        .fetch_optional(pool)
        .await
    }

    /// Delete a task together with its descendants
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Tasks held by an employee in the given status
    pub async fn find_by_employee_and_status(
        pool: &PgPool,
        employee_id: i64,
        status: TaskStatus,
    ) -> Result<Vec<Task>, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            r#"
            SELECT id, name, description, priority, deadline, status, completion_time,
                   parent_task_id, assigned_employee_id, created_at, updated_at
            FROM tasks
            WHERE assigned_employee_id = $1 AND status = $2
            ORDER BY id
            "#,
        )
        .bind(employee_id)
        .bind(status)
        .fetch_all(pool)
        .await
    }

    /// Unassigned `to_assign` tasks with at least one child `in_progress`
    pub async fn find_blocking_unassigned(pool: &PgPool) -> Result<Vec<Task>, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            r#"
            SELECT t.id, t.name, t.description, t.priority, t.deadline, t.status,
                   t.completion_time, t.parent_task_id, t.assigned_employee_id,
                   t.created_at, t.updated_at
            FROM tasks t
            WHERE t.status = 'to_assign'
              AND t.assigned_employee_id IS NULL
              AND EXISTS (
                  SELECT 1 FROM tasks child
                  WHERE child.parent_task_id = t.id
                    AND child.status = 'in_progress'
              )
            ORDER BY t.id
            "#,
        )
        .fetch_all(pool)
        .await
    }

    /// Point a task at an employee without touching its status
    pub async fn assign_employee(
        pool: &PgPool,
        task_id: i64,
        employee_id: i64,
    ) -> Result<Option<Task>, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET assigned_employee_id = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, description, priority, deadline, status, completion_time,
                      parent_task_id, assigned_employee_id, created_at, updated_at
            "#,
        )
        .bind(task_id)
        .bind(employee_id)
        .fetch_optional(pool)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn task(deadline: NaiveDate) -> Task {
        let now = Utc::now().naive_utc();
        Task {
            id: 7,
            name: "Write report".to_string(),
            description: None,
            priority: TaskPriority::Medium,
            deadline,
            status: TaskStatus::ToAssign,
            completion_time: None,
            parent_task_id: None,
            assigned_employee_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_assignee_moves_task_in_progress() {
        let mut t = task(date(2030, 5, 10));
        t.assigned_employee_id = Some(3);
        t.recompute_status();
        assert_eq!(t.status, TaskStatus::InProgress);
    }

    #[test]
    fn test_unassigning_clears_completion() {
        let mut t = task(date(2030, 5, 10));
        t.status = TaskStatus::Completed;
        t.completion_time = Some(date(2030, 5, 1));
        t.recompute_status();
        assert_eq!(t.status, TaskStatus::ToAssign);
        assert_eq!(t.completion_time, None);
    }

    #[test]
    fn test_completion_against_deadline() {
        let mut on_time = task(date(2030, 5, 10));
        on_time.assigned_employee_id = Some(1);
        on_time.completion_time = Some(date(2030, 5, 10));
        on_time.recompute_status();
        assert_eq!(on_time.status, TaskStatus::Completed);

        let mut late = task(date(2030, 5, 10));
        late.assigned_employee_id = Some(1);
        late.completion_time = Some(date(2030, 5, 11));
        late.recompute_status();
        assert_eq!(late.status, TaskStatus::Overdue);
    }

    #[test]
    fn test_wire_names_for_links() {
        let mut t = task(date(2030, 5, 10));
        t.parent_task_id = Some(2);
        t.assigned_employee_id = Some(5);
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(json["parent_task"], 2);
        assert_eq!(json["assigned_employee"], 5);
        assert_eq!(json["status"], "to_assign");
        assert_eq!(json["deadline"], "2030-05-10");
    }

    #[test]
    fn test_partial_changes_for_links() {
        let changes: TaskChanges =
            serde_json::from_str(r#"{"assigned_employee": null, "parent_task": 4}"#).unwrap();
        assert_eq!(changes.assigned_employee_id, Some(None));
        assert_eq!(changes.parent_task_id, Some(Some(4)));
        assert_eq!(changes.completion_time, None);

        let mut t = task(date(2030, 5, 10));
        t.assigned_employee_id = Some(9);
        t.apply_changes(changes);
        assert_eq!(t.assigned_employee_id, None);
        assert_eq!(t.parent_task_id, Some(4));
    }

    #[test]
    fn test_new_task_defaults_to_unassigned_status() {
        let new_task: NewTask = serde_json::from_str(
            r#"{"name": "Plan", "priority": "high", "deadline": "2030-01-02"}"#,
        )
        .unwrap();
        assert_eq!(new_task.status, TaskStatus::ToAssign);
        assert_eq!(new_task.assigned_employee_id, None);
    }
}
