//! # Web API Error Types
//!
//! Defines error types specific to the web API and their HTTP response conversions.
//! Leverages thiserror for structured error handling and Axum's IntoResponse for HTTP conversion.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::error::WorkforceError;

/// Web API specific errors with HTTP status code mappings
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{message}")]
    NotFound { message: String },

    #[error("Invalid value for {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Invalid request body: {message}")]
    InvalidBody { message: String },

    #[error("No suitable employee found.")]
    NoSuitableEmployee,

    #[error("Service temporarily unavailable")]
    ServiceUnavailable,

    #[error("Database operation failed: {operation}")]
    DatabaseError { operation: String },

    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn invalid_body(message: impl Into<String>) -> Self {
        Self::InvalidBody {
            message: message.into(),
        }
    }

    /// Create a DatabaseError with operation context
    pub fn database_error(operation: impl Into<String>) -> Self {
        Self::DatabaseError {
            operation: operation.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Validation { .. }
            | ApiError::InvalidBody { .. }
            | ApiError::NoSuitableEmployee => StatusCode::BAD_REQUEST,
            ApiError::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::DatabaseError { .. } | ApiError::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        let body = match &self {
            ApiError::NotFound { message } => json!({
                "error": { "code": "NOT_FOUND", "message": message }
            }),
            ApiError::Validation { field, message } => json!({
                "error": { "code": "VALIDATION_ERROR", "message": message, "field": field }
            }),
            ApiError::InvalidBody { message } => json!({
                "error": { "code": "VALIDATION_ERROR", "message": message }
            }),
            ApiError::NoSuitableEmployee => json!({
                "error": { "code": "NO_SUITABLE_EMPLOYEE", "message": "No suitable employee found." }
            }),
            ApiError::ServiceUnavailable => json!({
                "error": { "code": "SERVICE_UNAVAILABLE", "message": "Service temporarily unavailable" }
            }),
            ApiError::DatabaseError { operation } => json!({
                "error": { "code": "DATABASE_ERROR", "message": operation }
            }),
            ApiError::Internal => json!({
                "error": { "code": "INTERNAL_ERROR", "message": "Internal server error" }
            }),
        };

        (status_code, Json(body)).into_response()
    }
}

/// Convert core errors to API errors
impl From<WorkforceError> for ApiError {
    fn from(err: WorkforceError) -> Self {
        match err {
            WorkforceError::NoSuitableEmployee => ApiError::NoSuitableEmployee,
            WorkforceError::NotFound { resource, id } => {
                ApiError::not_found(format!("{resource} {id} not found"))
            }
            WorkforceError::InvalidPage => ApiError::not_found("Invalid page."),
            WorkforceError::Validation { field, message } => ApiError::Validation { field, message },
            WorkforceError::Database(e) => ApiError::from(e),
            WorkforceError::Migration(e) => {
                error!(error = %e, "Migration error surfaced in web layer");
                ApiError::Internal
            }
            WorkforceError::Configuration(message) => {
                error!(error = %message, "Configuration error surfaced in web layer");
                ApiError::Internal
            }
        }
    }
}

/// Convert sqlx errors to API errors
impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        error!(error = %err, "Database error");
        match err {
            sqlx::Error::RowNotFound => ApiError::not_found("Resource not found"),
            sqlx::Error::PoolTimedOut => ApiError::ServiceUnavailable,
            sqlx::Error::Database(_) => ApiError::database_error("Database operation failed"),
            _ => ApiError::database_error("Database error"),
        }
    }
}

/// Result type alias for web API operations
pub type ApiResult<T> = Result<T, ApiError>;
