//! # Structured Logging Module
//!
//! Environment-aware structured logging for the workforce backend. Console
//! output is either human-readable or JSON, selected through configuration.

use chrono::Utc;
use std::process;
use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, LoggingConfig};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize structured logging with environment-specific configuration
pub fn init_structured_logging(environment: &str, logging: &LoggingConfig) {
    LOGGER_INITIALIZED.get_or_init(|| {
        let filter = build_filter(environment, logging);

        let registry = tracing_subscriber::registry().with(filter);
        let result = match logging.format {
            LogFormat::Pretty => registry
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_thread_ids(true)
                        .with_level(true)
                        .with_ansi(true),
                )
                .try_init(),
            LogFormat::Json => registry
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_thread_ids(true)
                        .with_level(true)
                        .with_ansi(false)
                        .json(),
                )
                .try_init(),
        };

        if result.is_err() {
            // A global subscriber is already installed (tests, embedding hosts)
            tracing::debug!("Global tracing subscriber already initialized - continuing with existing subscriber");
        }

        tracing::info!(
            pid = process::id(),
            environment = %environment,
            format = ?logging.format,
            "Structured logging initialized"
        );
    });
}

/// `RUST_LOG` wins, then the configured level, then the environment default
fn build_filter(environment: &str, logging: &LoggingConfig) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    let directive = logging
        .level
        .clone()
        .unwrap_or_else(|| default_log_level(environment).to_string());
    EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(default_log_level(environment)))
}

/// Get log level based on environment
fn default_log_level(environment: &str) -> &'static str {
    match environment {
        "test" => "debug",
        "development" => "debug",
        "production" => "info",
        _ => "debug",
    }
}

/// Log structured data for task operations
pub fn log_task_operation(
    operation: &str,
    task_id: Option<i64>,
    task_name: Option<&str>,
    status: &str,
    details: Option<&str>,
) {
    tracing::info!(
        operation = %operation,
        task_id = task_id,
        task_name = task_name,
        status = %status,
        details = details,
        timestamp = %Utc::now().to_rfc3339(),
        "TASK_OPERATION"
    );
}

/// Log structured data for employee operations
pub fn log_employee_operation(
    operation: &str,
    employee_id: Option<i64>,
    fullname: Option<&str>,
    details: Option<&str>,
) {
    tracing::info!(
        operation = %operation,
        employee_id = employee_id,
        fullname = fullname,
        details = details,
        timestamp = %Utc::now().to_rfc3339(),
        "EMPLOYEE_OPERATION"
    );
}

/// Log one important-task assignment decision
pub fn log_assignment_decision(
    task_id: i64,
    employee_id: i64,
    rule: &str,
    parent_task_worker_total: i64,
    least_busy_active: i64,
    slack: i64,
) {
    tracing::info!(
        task_id = task_id,
        employee_id = employee_id,
        rule = %rule,
        parent_task_worker_total = parent_task_worker_total,
        least_busy_active = least_busy_active,
        slack = slack,
        timestamp = %Utc::now().to_rfc3339(),
        "ASSIGNMENT_DECISION"
    );
}

/// Log error with full context
pub fn log_error(component: &str, operation: &str, error: &str, context: Option<&str>) {
    tracing::error!(
        component = %component,
        operation = %operation,
        error = %error,
        context = context,
        timestamp = %Utc::now().to_rfc3339(),
        "ERROR"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_mapping() {
        assert_eq!(default_log_level("test"), "debug");
        assert_eq!(default_log_level("development"), "debug");
        assert_eq!(default_log_level("production"), "info");
        assert_eq!(default_log_level("unknown"), "debug");
    }

    #[test]
    fn test_init_is_idempotent() {
        let logging = LoggingConfig::default();
        init_structured_logging("test", &logging);
        init_structured_logging("test", &logging);
    }
}
