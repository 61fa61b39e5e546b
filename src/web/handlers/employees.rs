//! # Employee Handlers
//!
//! CRUD endpoints for employees plus the busy employees view.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::{debug, info};

use crate::error::WorkforceError;
use crate::logging::log_employee_operation;
use crate::models::{
    BusyEmployee, Employee, EmployeeChanges, NewEmployee, Page, PageParams, PageRequest,
};
use crate::services::BusyEmployeeRanking;
use crate::validation::{validate_employee_changes, validate_new_employee};
use crate::web::response_types::ApiResult;
use crate::web::extractors::{ApiJson, ApiPath, ApiQuery};
use crate::web::state::AppState;

/// List employees: GET /employees
pub async fn list_employees(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> ApiResult<Json<Page<Employee>>> {
    let request = PageRequest::resolve(params, state.pagination())?;
    debug!(page = request.page, page_size = request.page_size, "Listing employees");

    let page = state.store.list_employees(request).await?;
    Ok(Json(page))
}

/// Create an employee: POST /employees
pub async fn create_employee(
    State(state): State<AppState>,
    ApiJson(new_employee): ApiJson<NewEmployee>,
) -> ApiResult<(StatusCode, Json<Employee>)> {
    validate_new_employee(&new_employee)?;

    let employee = state.store.create_employee(new_employee).await?;
    log_employee_operation(
        "create",
        Some(employee.id),
        Some(&employee.fullname()),
        None,
    );
    Ok((StatusCode::CREATED, Json(employee)))
}

/// Retrieve an employee: GET /employees/{id}
pub async fn get_employee(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<Employee>> {
    let employee = state
        .store
        .find_employee(id)
        .await?
        .ok_or_else(|| WorkforceError::employee_not_found(id))?;
    Ok(Json(employee))
}

/// Replace an employee: PUT /employees/{id}
pub async fn update_employee(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(replacement): ApiJson<NewEmployee>,
) -> ApiResult<Json<Employee>> {
    apply_employee_changes(&state, id, EmployeeChanges::from(replacement), "update").await
}

/// Partially update an employee: PATCH /employees/{id}
pub async fn patch_employee(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(changes): ApiJson<EmployeeChanges>,
) -> ApiResult<Json<Employee>> {
    apply_employee_changes(&state, id, changes, "partial_update").await
}

async fn apply_employee_changes(
    state: &AppState,
    id: i64,
    changes: EmployeeChanges,
    operation: &str,
) -> ApiResult<Json<Employee>> {
    validate_employee_changes(&changes)?;

    let mut employee = state
        .store
        .find_employee(id)
        .await?
        .ok_or_else(|| WorkforceError::employee_not_found(id))?;
    employee.apply_changes(changes);

    let saved = state
        .store
        .save_employee(&employee)
        .await?
        .ok_or_else(|| WorkforceError::employee_not_found(id))?;
    log_employee_operation(operation, Some(saved.id), Some(&saved.fullname()), None);
    Ok(Json(saved))
}

/// Delete an employee: DELETE /employees/{id}
pub async fn delete_employee(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<StatusCode> {
    if !state.store.delete_employee(id).await? {
        return Err(WorkforceError::employee_not_found(id).into());
    }
    log_employee_operation("delete", Some(id), None, None);
    Ok(StatusCode::NO_CONTENT)
}

/// Busy employees, most active tasks first: GET /busy-employees
pub async fn busy_employees(State(state): State<AppState>) -> ApiResult<Json<Vec<BusyEmployee>>> {
    let view = BusyEmployeeRanking::new(state.store.as_ref())
        .busy_employees()
        .await?;
    info!(employee_count = view.len(), "Serving busy employees view");
    Ok(Json(view))
}
