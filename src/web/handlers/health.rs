//! # Health Check Handlers
//!
//! Liveness endpoint that also probes the storage backend.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, error};

use crate::web::state::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    timestamp: String,
    backend: String,
    environment: String,
    version: String,
    store: StoreCheck,
}

/// Result of probing the store
#[derive(Debug, Serialize)]
pub struct StoreCheck {
    status: String,
    message: Option<String>,
    duration_ms: u64,
}

/// Health check endpoint: GET /health
///
/// Returns 200 while the store answers and 503 otherwise.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let started = Instant::now();
    let probe = state.store.health_check().await;
    let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    let (status_code, status, store) = match probe {
        Ok(()) => {
            debug!(duration_ms, "Store health check passed");
            (
                StatusCode::OK,
                "healthy",
                StoreCheck {
                    status: "healthy".to_string(),
                    message: None,
                    duration_ms,
                },
            )
        }
        Err(err) => {
            error!(error = %err, "Store health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "unhealthy",
                StoreCheck {
                    status: "unhealthy".to_string(),
                    message: Some(err.to_string()),
                    duration_ms,
                },
            )
        }
    };

    let response = HealthResponse {
        status: status.to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        backend: state.store.backend_name().to_string(),
        environment: state.config.environment.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        store,
    };
    (status_code, Json(response))
}
