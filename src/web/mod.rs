//! # Web API Module
//!
//! Axum-based REST API over employees and tasks.
//!
//! ## Core Components
//!
//! - [`routes`] - HTTP route definitions
//! - [`handlers`] - Request handlers per resource
//! - [`state`] - Shared application state (store and configuration)
//! - [`response_types`] - API error type and its JSON rendering
//! - [`extractors`] - `Json` / `Path` / `Query` wrappers rejecting with that error type

pub mod extractors;
pub mod handlers;
pub mod response_types;
pub mod routes;
pub mod state;

use axum::http::StatusCode;
use axum::Router;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub use extractors::{ApiJson, ApiPath, ApiQuery};
pub use response_types::{ApiError, ApiResult};
pub use state::AppState;

/// Create the main Axum application with all routes and middleware
///
/// # Arguments
/// * `app_state` - Shared application state holding the store and configuration
///
/// # Returns
/// * `Router` - Configured Axum router ready for serving
pub fn create_app(app_state: AppState) -> Router {
    let request_timeout = app_state.config.web.request_timeout();

    Router::new()
        .merge(routes::health_routes())
        .merge(routes::api_routes())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
