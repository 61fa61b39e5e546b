#![allow(clippy::doc_markdown)] // Allow technical terms like PostgreSQL, SQLx in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Workforce Core
//!
//! Task and employee management backend with workload-aware assignment of
//! blocking tasks.
//!
//! ## Overview
//!
//! Employees hold tasks; tasks may have a parent task. A `to_assign` task with
//! no assignee that has a child task already `in_progress` is *important*: it
//! holds up work someone has started. The important-task selector hands every
//! such task to either the least busy employee or to an employee already
//! working on subtasks, whichever keeps the load balanced within a slack.
//!
//! ## Module Organization
//!
//! - [`models`] - Employee and task records with their SQLx queries
//! - [`store`] - Repository traits with Postgres and in-memory backends
//! - [`services`] - Busy employee ranking and the important-task selector
//! - [`validation`] - Field validation for incoming records
//! - [`web`] - axum REST API
//! - [`database`] - Connection pool and embedded migrations
//! - [`config`] - Layered configuration
//! - [`logging`] - Structured logging setup
//! - [`error`] - Structured error handling
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use workforce_core::services::ImportantTaskSelector;
//! use workforce_core::store::InMemoryStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = InMemoryStore::new();
//! let assignments = ImportantTaskSelector::new(&store).run().await?;
//! for assignment in assignments {
//!     println!("{} -> {}", assignment.task, assignment.employee.fullname);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Testing
//!
//! ```bash
//! cargo test                                   # In-memory and HTTP tests
//! cargo test --features database-tests         # Postgres store tests (needs DATABASE_URL)
//! ```

pub mod config;
pub mod constants;
pub mod database;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
pub mod store;
pub mod validation;
pub mod web;

pub use config::{ConfigManager, WorkforceConfig};
pub use constants::{TaskPriority, TaskStatus};
pub use error::{Result, WorkforceError};
pub use models::{Employee, EmployeeWorkload, Task};
pub use services::{ImportantTaskAssignment, ImportantTaskSelector};
pub use store::{AssignmentStore, InMemoryStore, PgStore, Repository};
