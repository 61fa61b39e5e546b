//! # Web API Route Definitions
//!
//! Plain REST layout: employee and task resources, the two workload views, and
//! a health probe.

use axum::routing::get;
use axum::Router;

use crate::web::handlers;
use crate::web::state::AppState;

/// Employee, task and workload routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Employees API
        .route(
            "/employees",
            get(handlers::employees::list_employees).post(handlers::employees::create_employee),
        )
        .route(
            "/employees/{id}",
            get(handlers::employees::get_employee)
                .put(handlers::employees::update_employee)
                .patch(handlers::employees::patch_employee)
                .delete(handlers::employees::delete_employee),
        )
        .route(
            "/busy-employees",
            get(handlers::employees::busy_employees),
        )
        // Tasks API
        .route(
            "/tasks",
            get(handlers::tasks::list_tasks).post(handlers::tasks::create_task),
        )
        .route(
            "/tasks/important-tasks",
            get(handlers::tasks::important_tasks),
        )
        .route(
            "/tasks/{id}",
            get(handlers::tasks::get_task)
                .put(handlers::tasks::update_task)
                .patch(handlers::tasks::patch_task)
                .delete(handlers::tasks::delete_task),
        )
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health_check))
}
