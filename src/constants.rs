//! # System Constants
//!
//! Core enums and numeric bounds that define the operational boundaries of the
//! workforce backend. Status and priority values are stored as Postgres enum
//! types and serialized as snake_case strings on the wire.

use serde::{Deserialize, Serialize};
use sqlx::Type;
use std::fmt;
use std::str::FromStr;

/// Slack allowed in favour of the parent-task worker when picking an assignee
/// for an important task.
pub const DEFAULT_ASSIGNMENT_SLACK: i64 = 2;

/// Inclusive bounds for an employee's experience, in years
pub const MIN_EXPERIENCE_YEARS: i16 = 0;
pub const MAX_EXPERIENCE_YEARS: i16 = 70;

/// Deadlines may be set at most this many days ahead of today
pub const MAX_DEADLINE_HORIZON_DAYS: i64 = 30;

/// Maximum length of short text columns (names, positions, task names)
pub const MAX_TEXT_FIELD_LENGTH: usize = 255;

/// Pagination defaults
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 15;

/// Lifecycle status of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type, Default)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "task_status", rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    ToAssign,
    InProgress,
    Completed,
    Overdue,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::ToAssign => "to_assign",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
            TaskStatus::Overdue => "overdue",
        }
    }

    /// Active tasks are the ones counted towards an employee's current load
    pub fn is_active(&self) -> bool {
        matches!(self, TaskStatus::InProgress)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "to_assign" => Ok(TaskStatus::ToAssign),
            "in_progress" => Ok(TaskStatus::InProgress),
            "completed" => Ok(TaskStatus::Completed),
            "overdue" => Ok(TaskStatus::Overdue),
            other => Err(format!("Unknown task status: {other}")),
        }
    }
}

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "task_priority", rename_all = "snake_case")]
pub enum TaskPriority {
    High,
    Medium,
    Low,
}

impl TaskPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::High => "high",
            TaskPriority::Medium => "medium",
            TaskPriority::Low => "low",
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TaskPriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "high" => Ok(TaskPriority::High),
            "medium" => Ok(TaskPriority::Medium),
            "low" => Ok(TaskPriority::Low),
            other => Err(format!("Unknown task priority: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_status_string_forms() {
        for status in [
            TaskStatus::ToAssign,
            TaskStatus::InProgress,
            TaskStatus::Completed,
            TaskStatus::Overdue,
        ] {
            assert_eq!(status.as_str().parse::<TaskStatus>().unwrap(), status);
            assert_eq!(
                serde_json::to_value(status).unwrap(),
                serde_json::json!(status.as_str())
            );
        }
        assert!("done".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn test_only_in_progress_is_active() {
        assert!(TaskStatus::InProgress.is_active());
        assert!(!TaskStatus::ToAssign.is_active());
        assert!(!TaskStatus::Completed.is_active());
        assert!(!TaskStatus::Overdue.is_active());
    }

    #[test]
    fn test_priority_parsing() {
        assert_eq!("high".parse::<TaskPriority>().unwrap(), TaskPriority::High);
        assert_eq!(TaskPriority::Low.to_string(), "low");
        assert!("urgent".parse::<TaskPriority>().is_err());
    }
}
