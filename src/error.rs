use thiserror::Error;

/// Errors raised by the workforce core
#[derive(Debug, Error)]
pub enum WorkforceError {
    #[error("No suitable employee found.")]
    NoSuitableEmployee,

    #[error("{resource} {id} not found")]
    NotFound { resource: &'static str, id: i64 },

    #[error("Invalid page.")]
    InvalidPage,

    #[error("Validation error on {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl WorkforceError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn employee_not_found(id: i64) -> Self {
        Self::NotFound {
            resource: "Employee",
            id,
        }
    }

    pub fn task_not_found(id: i64) -> Self {
        Self::NotFound {
            resource: "Task",
            id,
        }
    }
}

impl From<config::ConfigError> for WorkforceError {
    fn from(err: config::ConfigError) -> Self {
        WorkforceError::Configuration(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, WorkforceError>;
