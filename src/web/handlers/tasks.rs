//! # Task Management Handlers
//!
//! HTTP handlers for task CRUD and the important tasks endpoint. Updates
//! recompute the task status from the merged record before saving.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::{debug, info};

use crate::error::WorkforceError;
use crate::logging::{log_error, log_task_operation};
use crate::models::{NewTask, Page, PageParams, PageRequest, Task, TaskChanges};
use crate::services::{ImportantTaskAssignment, ImportantTaskSelector};
use crate::validation::{validate_new_task, validate_task_changes};
use crate::web::response_types::{ApiError, ApiResult};
use crate::web::extractors::{ApiJson, ApiPath, ApiQuery};
use crate::web::state::AppState;

/// List tasks: GET /tasks
pub async fn list_tasks(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> ApiResult<Json<Page<Task>>> {
    let request = PageRequest::resolve(params, state.pagination())?;
    debug!(page = request.page, page_size = request.page_size, "Listing tasks");

    let page = state.store.list_tasks(request).await?;
    Ok(Json(page))
}

/// Create a task: POST /tasks
pub async fn create_task(
    State(state): State<AppState>,
    ApiJson(new_task): ApiJson<NewTask>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    info!(task_name = %new_task.name, priority = %new_task.priority, "Creating task");

    validate_new_task(&new_task, state.today(), state.deadline_horizon_days())?;
    ensure_references_exist(&state, new_task.parent_task_id, new_task.assigned_employee_id)
        .await?;

    let task = state.store.create_task(new_task).await?;
    log_task_operation(
        "create",
        Some(task.id),
        Some(&task.name),
        task.status.as_str(),
        None,
    );
    Ok((StatusCode::CREATED, Json(task)))
}

/// Retrieve a task: GET /tasks/{id}
pub async fn get_task(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<Task>> {
    let task = state
        .store
        .find_task(id)
        .await?
        .ok_or_else(|| WorkforceError::task_not_found(id))?;
    Ok(Json(task))
}

/// Replace a task: PUT /tasks/{id}
pub async fn update_task(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(replacement): ApiJson<NewTask>,
) -> ApiResult<Json<Task>> {
    apply_task_changes(&state, id, TaskChanges::from(replacement), "update").await
}

/// Partially update a task: PATCH /tasks/{id}
pub async fn patch_task(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(changes): ApiJson<TaskChanges>,
) -> ApiResult<Json<Task>> {
    apply_task_changes(&state, id, changes, "partial_update").await
}

async fn apply_task_changes(
    state: &AppState,
    id: i64,
    changes: TaskChanges,
    operation: &str,
) -> ApiResult<Json<Task>> {
    validate_task_changes(id, &changes, state.today(), state.deadline_horizon_days())?;
    ensure_references_exist(
        state,
        changes.parent_task_id.flatten(),
        changes.assigned_employee_id.flatten(),
    )
    .await?;

    let mut task = state
        .store
        .find_task(id)
        .await?
        .ok_or_else(|| WorkforceError::task_not_found(id))?;
    let previous_status = task.status;
    task.apply_changes(changes);
    task.recompute_status();

    let saved = state
        .store
        .save_task(&task)
        .await?
        .ok_or_else(|| WorkforceError::task_not_found(id))?;

    let transition = format!("{previous_status} -> {}", saved.status);
    log_task_operation(
        operation,
        Some(saved.id),
        Some(&saved.name),
        saved.status.as_str(),
        Some(&transition),
    );
    Ok(Json(saved))
}

/// Delete a task and its subtasks: DELETE /tasks/{id}
pub async fn delete_task(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<StatusCode> {
    if !state.store.delete_task(id).await? {
        return Err(WorkforceError::task_not_found(id).into());
    }
    log_task_operation("delete", Some(id), None, "deleted", None);
    Ok(StatusCode::NO_CONTENT)
}

/// Assign every important task: GET /tasks/important-tasks
pub async fn important_tasks(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<ImportantTaskAssignment>>> {
    let selector =
        ImportantTaskSelector::new(state.store.as_ref()).with_slack(state.assignment_slack());

    match selector.run().await {
        Ok(assignments) => Ok(Json(assignments)),
        Err(err) => {
            log_error("important_tasks", "run", &err.to_string(), None);
            Err(err.into())
        }
    }
}

/// Referenced parent task and assignee must exist
async fn ensure_references_exist(
    state: &AppState,
    parent_task_id: Option<i64>,
    assigned_employee_id: Option<i64>,
) -> ApiResult<()> {
    if let Some(parent_id) = parent_task_id {
        if state.store.find_task(parent_id).await?.is_none() {
            return Err(ApiError::validation(
                "parent_task",
                "The parent task does not exist.",
            ));
        }
    }
    if let Some(employee_id) = assigned_employee_id {
        if state.store.find_employee(employee_id).await?.is_none() {
            return Err(ApiError::validation(
                "assigned_employee",
                "The assigned employee does not exist.",
            ));
        }
    }
    Ok(())
}
