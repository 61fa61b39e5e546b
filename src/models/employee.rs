//! # Employee Model
//!
//! Maps to the `employees` table. The active task count is never stored; it
//! is derived from `tasks` whenever a workload is requested (see
//! [`crate::models::workload`]).

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use super::{deserialize_non_null, deserialize_present};
use crate::models::workload::EmployeeWorkload;

/// An employee who can be assigned tasks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Employee {
    pub id: i64,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub position: String,
    /// Years of experience, 0..=70
    pub experience: i16,
    pub tasks_completed: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// New Employee for creation (without generated fields)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEmployee {
    pub first_name: String,
    #[serde(default)]
    pub middle_name: Option<String>,
    pub last_name: String,
    pub position: String,
    pub experience: i16,
    pub tasks_completed: i32,
}

/// Partial employee update; `None` leaves a field untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmployeeChanges {
    #[serde(default, deserialize_with = "deserialize_non_null")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub middle_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_non_null")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_non_null")]
    pub position: Option<String>,
    #[serde(default, deserialize_with = "deserialize_non_null")]
    pub experience: Option<i16>,
    #[serde(default, deserialize_with = "deserialize_non_null")]
    pub tasks_completed: Option<i32>,
}

impl From<NewEmployee> for EmployeeChanges {
    fn from(new_employee: NewEmployee) -> Self {
        Self {
            first_name: Some(new_employee.first_name),
            middle_name: Some(new_employee.middle_name),
            last_name: Some(new_employee.last_name),
            position: Some(new_employee.position),
            experience: Some(new_employee.experience),
            tasks_completed: Some(new_employee.tasks_completed),
        }
    }
}

/// Compact employee representation embedded in other payloads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeSummary {
    pub id: i64,
    pub fullname: String,
}

impl From<&Employee> for EmployeeSummary {
    fn from(employee: &Employee) -> Self {
        Self {
            id: employee.id,
            fullname: employee.fullname(),
        }
    }
}

impl Employee {
    /// Display name: "Last F. M." with a middle name, "Last First" without
    pub fn fullname(&self) -> String {
        match self.middle_name.as_deref().filter(|m| !m.is_empty()) {
            Some(middle) => format!(
                "{} {}. {}.",
                self.last_name,
                initial(&self.first_name),
                initial(middle)
            ),
            None => format!("{} {}", self.last_name, self.first_name),
        }
    }

    /// Apply a partial update in place
    pub fn apply_changes(&mut self, changes: EmployeeChanges) {
        if let Some(first_name) = changes.first_name {
            self.first_name = first_name;
        }
        if let Some(middle_name) = changes.middle_name {
            self.middle_name = middle_name;
        }
        if let Some(last_name) = changes.last_name {
            self.last_name = last_name;
        }
        if let Some(position) = changes.position {
            self.position = position;
        }
        if let Some(experience) = changes.experience {
            self.experience = experience;
        }
        if let Some(tasks_completed) = changes.tasks_completed {
            self.tasks_completed = tasks_completed;
        }
    }

    /// Create a new employee
    pub async fn create(pool: &PgPool, new_employee: NewEmployee) -> Result<Employee, sqlx::Error> {
        sqlx::query_as::<_, Employee>(
            r#"
            INSERT INTO employees (
                first_name, middle_name, last_name, position, experience, tasks_completed,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, NOW(), NOW())
            RETURNING id, first_name, middle_name, last_name, position, experience,
                      tasks_completed, created_at, updated_at
            "#,
        )
        .bind(new_employee.first_name)
        .bind(new_employee.middle_name)
        .bind(new_employee.last_name)
        .bind(new_employee.position)
        .bind(new_employee.experience)
        .bind(new_employee.tasks_completed)
        .fetch_one(pool)
        .await
    }

    /// Find an employee by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Employee>, sqlx::Error> {
        sqlx::query_as::<_, Employee>(
            r#"
            SELECT id, first_name, middle_name, last_name, position, experience,
                   tasks_completed, created_at, updated_at
            FROM employees
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// One page of employees in natural (id) order
    pub async fn list_page(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Employee>, sqlx::Error> {
        sqlx::query_as::<_, Employee>(
            r#"
            SELECT id, first_name, middle_name, last_name, position, experience,
                   tasks_completed, created_at, updated_at
            FROM employees
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
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM employees")
            .fetch_one(pool)
            .await
    }

    /// Persist every mutable column of `employee`
    pub async fn update(pool: &PgPool, employee: &Employee) -> Result<Option<Employee>, sqlx::Error> {
        sqlx::query_as::<_, Employee>(
            r#"
            UPDATE employees
            SET
                first_name = $2,
                middle_name = $3,
                last_name = $4,
                position = $5,
                experience = $6,
                tasks_completed = $7,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, first_name, middle_name, last_name, position, experience,
                      tasks_completed, created_at, updated_at
            "#,
        )
        .bind(employee.id)
        .bind(&employee.first_name)
        .bind(&employee.middle_name)
        .bind(&employee.last_name)
        .bind(&employee.position)
        .bind(employee.experience)
        .bind(employee.tasks_completed)
        .fetch_optional(pool)
        .await
    }

    /// Delete an employee; their tasks keep existing with no assignee
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Every employee with their active and total task counts, in id order
    pub async fn workloads(pool: &PgPool) -> Result<Vec<EmployeeWorkload>, sqlx::Error> {
        sqlx::query_as::<_, EmployeeWorkload>(
            r#"
            SELECT e.id, e.first_name, e.middle_name, e.last_name, e.position, e.experience,
                   e.tasks_completed, e.created_at, e.updated_at,
                   COUNT(t.id) FILTER (WHERE t.status = 'in_progress') AS active_tasks_count,
                   COUNT(t.id) AS total_tasks_count
            FROM employees e
            LEFT JOIN tasks t ON t.assigned_employee_id = e.id
            GROUP BY e.id
            ORDER BY e.id
            "#,
        )
        .fetch_all(pool)
        .await
    }

    /// Among employees holding at least one task that has a parent task, the
    /// one with the fewest assigned tasks overall (ties: lowest id)
    pub async fn fewest_total_tasks_among_parent_task_workers(
        pool: &PgPool,
    ) -> Result<Option<EmployeeWorkload>, sqlx::Error> {
        sqlx::query_as::<_, EmployeeWorkload>(
            r#"
            SELECT e.id, e.first_name, e.middle_name, e.last_name, e.position, e.experience,
                   e.tasks_completed, e.created_at, e.updated_at,
                   COUNT(t.id) FILTER (WHERE t.status = 'in_progress') AS active_tasks_count,
                   COUNT(t.id) AS total_tasks_count
            FROM employees e
            JOIN tasks t ON t.assigned_employee_id = e.id
            WHERE EXISTS (
                SELECT 1 FROM tasks linked
                WHERE linked.assigned_employee_id = e.id
                  AND linked.parent_task_id IS NOT NULL
            )
            GROUP BY e.id
            ORDER BY total_tasks_count ASC, e.id ASC
            LIMIT 1
            "#,
        )
        .fetch_optional(pool)
        .await
    }
}

fn initial(name: &str) -> String {
    name.chars().next().map(String::from).unwrap_or_default()
}
