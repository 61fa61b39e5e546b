//! # Web API Application State
//!
//! Shared state handed to every request handler: the storage backend and the
//! loaded configuration.

use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use tracing::info;

use crate::config::{PaginationConfig, WorkforceConfig};
use crate::store::Repository;

#[derive(Clone)]
pub struct AppState {
    /// Storage backend (Postgres or in-memory)
    pub store: Arc<dyn Repository>,

    pub config: Arc<WorkforceConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn Repository>, config: Arc<WorkforceConfig>) -> Self {
        info!(
            backend = store.backend_name(),
            environment = %config.environment,
            "Creating web API application state"
        );
        Self { store, config }
    }

    pub fn pagination(&self) -> &PaginationConfig {
        &self.config.pagination
    }

    pub fn assignment_slack(&self) -> i64 {
        self.config.assignment.slack
    }

    pub fn deadline_horizon_days(&self) -> i64 {
        self.config.assignment.deadline_horizon_days
    }

    /// Reference date for deadline validation
    pub fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}
