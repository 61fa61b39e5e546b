//! Input validation for employees and tasks
//!
//! Field-level checks applied before anything reaches a store. Every failure
//! names the offending field so the web layer can report it.

use chrono::{Duration, NaiveDate};

use crate::constants::{MAX_EXPERIENCE_YEARS, MAX_TEXT_FIELD_LENGTH, MIN_EXPERIENCE_YEARS};
use crate::error::{Result, WorkforceError};
use crate::models::{EmployeeChanges, NewEmployee, NewTask, TaskChanges};

/// Experience must lie within the allowed range of years
pub fn validate_experience(value: i16) -> Result<()> {
    if !(MIN_EXPERIENCE_YEARS..=MAX_EXPERIENCE_YEARS).contains(&value) {
        return Err(WorkforceError::validation(
            "experience",
            format!(
                "Experience must be between {MIN_EXPERIENCE_YEARS} and {MAX_EXPERIENCE_YEARS}."
            ),
        ));
    }
    Ok(())
}

/// Names hold letters and single inner hyphens only
pub fn validate_name(field: &str, value: &str) -> Result<()> {
    validate_text(field, value)?;

    if !value.chars().all(|c| c.is_alphabetic() || c == '-') {
        return Err(WorkforceError::validation(
            field,
            "Names must contain only letters and hyphens.",
        ));
    }
    if value.starts_with('-') || value.ends_with('-') {
        return Err(WorkforceError::validation(
            field,
            "Names cannot start or end with a hyphen.",
        ));
    }
    if value.contains("--") {
        return Err(WorkforceError::validation(
            field,
            "Names cannot contain consecutive hyphens.",
        ));
    }
    Ok(())
}

/// The middle name is optional: an empty one means "none"
pub fn validate_middle_name(value: &str) -> Result<()> {
    if value.is_empty() {
        return Ok(());
    }
    validate_name("middle_name", value)
}

/// Required short text: non-blank and within the column width
pub fn validate_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(WorkforceError::validation(field, "This field may not be blank."));
    }
    if value.chars().count() > MAX_TEXT_FIELD_LENGTH {
        return Err(WorkforceError::validation(
            field,
            format!("Ensure this field has no more than {MAX_TEXT_FIELD_LENGTH} characters."),
        ));
    }
    Ok(())
}

pub fn validate_tasks_completed(value: i32) -> Result<()> {
    if value < 0 {
        return Err(WorkforceError::validation(
            "tasks_completed",
            "Ensure this value is greater than or equal to 0.",
        ));
    }
    Ok(())
}

/// Deadline must fall after `today` and within the horizon
pub fn validate_deadline(deadline: NaiveDate, today: NaiveDate, horizon_days: i64) -> Result<()> {
    if deadline <= today {
        return Err(WorkforceError::validation(
            "deadline",
            "Deadline cannot be in the past.",
        ));
    }
    if deadline > today + Duration::days(horizon_days) {
        return Err(WorkforceError::validation(
            "deadline",
            format!("Deadline cannot be more than {horizon_days} days in the future."),
        ));
    }
    Ok(())
}

/// A task cannot be its own parent
pub fn validate_parent_task(task_id: Option<i64>, parent_task_id: Option<i64>) -> Result<()> {
    if let (Some(id), Some(parent)) = (task_id, parent_task_id) {
        if id == parent {
            return Err(WorkforceError::validation(
                "parent_task",
                "A task cannot be its own parent.",
            ));
        }
    }
    Ok(())
}

pub fn validate_new_employee(new_employee: &NewEmployee) -> Result<()> {
    validate_name("first_name", &new_employee.first_name)?;
    if let Some(middle_name) = new_employee.middle_name.as_deref() {
        validate_middle_name(middle_name)?;
    }
    validate_name("last_name", &new_employee.last_name)?;
    validate_text("position", &new_employee.position)?;
    validate_experience(new_employee.experience)?;
    validate_tasks_completed(new_employee.tasks_completed)
}

/// Validate only the fields present in a partial update
pub fn validate_employee_changes(changes: &EmployeeChanges) -> Result<()> {
    if let Some(first_name) = changes.first_name.as_deref() {
        validate_name("first_name", first_name)?;
    }
    if let Some(Some(middle_name)) = changes.middle_name.as_ref() {
        validate_middle_name(middle_name)?;
    }
    if let Some(last_name) = changes.last_name.as_deref() {
        validate_name("last_name", last_name)?;
    }
    if let Some(position) = changes.position.as_deref() {
        validate_text("position", position)?;
    }
    if let Some(experience) = changes.experience {
        validate_experience(experience)?;
    }
    if let Some(tasks_completed) = changes.tasks_completed {
        validate_tasks_completed(tasks_completed)?;
    }
    Ok(())
}

pub fn validate_new_task(new_task: &NewTask, today: NaiveDate, horizon_days: i64) -> Result<()> {
    validate_text("name", &new_task.name)?;
    validate_deadline(new_task.deadline, today, horizon_days)
}

/// Field checks for a task update; reference existence is checked by the caller
pub fn validate_task_changes(
    task_id: i64,
    changes: &TaskChanges,
    today: NaiveDate,
    horizon_days: i64,
) -> Result<()> {
    if let Some(name) = changes.name.as_deref() {
        validate_text("name", name)?;
    }
    if let Some(deadline) = changes.deadline {
        validate_deadline(deadline, today, horizon_days)?;
    }
    if let Some(parent_task_id) = changes.parent_task_id {
        validate_parent_task(Some(task_id), parent_task_id)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn field_of(result: Result<()>) -> String {
        match result {
            Err(WorkforceError::Validation { field, .. }) => field,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_experience_bounds() {
        assert!(validate_experience(0).is_ok());
        assert!(validate_experience(70).is_ok());
        assert_eq!(field_of(validate_experience(71)), "experience");
        assert_eq!(field_of(validate_experience(-1)), "experience");
    }

    #[test]
    fn test_name_rules() {
        assert!(validate_name("first_name", "Anna-Maria").is_ok());
        assert!(validate_name("first_name", "Иван").is_ok());
        assert!(validate_name("first_name", "Anna1").is_err());
        assert!(validate_name("first_name", "Anna Maria").is_err());
        assert!(validate_name("first_name", "-Anna").is_err());
        assert!(validate_name("first_name", "Anna-").is_err());
        assert!(validate_name("first_name", "Anna--Maria").is_err());
        assert!(validate_name("first_name", "").is_err());
    }

    #[test]
    fn test_empty_middle_name_is_allowed() {
        assert!(validate_middle_name("").is_ok());
        assert!(validate_middle_name("Petrovich").is_ok());
        assert_eq!(field_of(validate_middle_name(" ")), "middle_name");
        assert_eq!(field_of(validate_middle_name("P3trovich")), "middle_name");

        let changes = EmployeeChanges {
            middle_name: Some(Some(String::new())),
            ..Default::default()
        };
        assert!(validate_employee_changes(&changes).is_ok());
    }

    #[test]
    fn test_deadline_window() {
        let today = date(2030, 3, 1);
        assert!(validate_deadline(date(2030, 3, 2), today, 30).is_ok());
        assert!(validate_deadline(date(2030, 3, 31), today, 30).is_ok());

        match validate_deadline(today, today, 30) {
            Err(WorkforceError::Validation { message, .. }) => {
                assert_eq!(message, "Deadline cannot be in the past.")
            }
            other => panic!("unexpected {other:?}"),
        }
        match validate_deadline(date(2030, 4, 1), today, 30) {
            Err(WorkforceError::Validation { message, .. }) => {
                assert_eq!(message, "Deadline cannot be more than 30 days in the future.")
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_self_parenting_is_rejected() {
        assert!(validate_parent_task(Some(3), Some(4)).is_ok());
        assert!(validate_parent_task(None, Some(4)).is_ok());
        assert_eq!(field_of(validate_parent_task(Some(4), Some(4))), "parent_task");
    }

    #[test]
    fn test_employee_changes_only_check_present_fields() {
        let changes = EmployeeChanges {
            experience: Some(10),
            middle_name: Some(None),
            ..Default::default()
        };
        assert!(validate_employee_changes(&changes).is_ok());

        let bad = EmployeeChanges {
            last_name: Some("O'Brien".to_string()),
            ..Default::default()
        };
        assert_eq!(field_of(validate_employee_changes(&bad)), "last_name");
    }

    #[test]
    fn test_task_changes_reject_self_parent() {
        let changes = TaskChanges {
            parent_task_id: Some(Some(12)),
            ..Default::default()
        };
        let today = date(2030, 3, 1);
        assert_eq!(
            field_of(validate_task_changes(12, &changes, today, 30)),
            "parent_task"
        );
        assert!(validate_task_changes(13, &changes, today, 30).is_ok());
    }
}
