//! # Database Operations
//!
//! Postgres connection management and schema migrations.
//!
//! - [`connection`] - pool construction from [`DatabaseConfig`](crate::config::DatabaseConfig) and health checks
//! - [`migrations`] - embedded SQLx migrator over `migrations/`
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use workforce_core::config::DatabaseConfig;
//! use workforce_core::database::{DatabaseConnection, DatabaseMigrations};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let connection = DatabaseConnection::connect(&DatabaseConfig::default()).await?;
//! DatabaseMigrations::run_all(connection.pool()).await?;
//! assert!(connection.health_check().await?);
//! # Ok(())
//! # }
//! ```

pub mod connection;
pub mod migrations;

pub use connection::DatabaseConnection;
pub use migrations::{DatabaseMigrations, MIGRATOR};
