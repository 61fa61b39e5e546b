//! # Workforce Server
//!
//! Binary serving the workforce REST API.
//!
//! ## Usage
//!
//! ```bash
//! # Run with default configuration (Postgres at database.url)
//! cargo run --bin workforce-server
//!
//! # Run against the in-memory store
//! WORKFORCE_STORAGE__BACKEND=memory cargo run --bin workforce-server
//!
//! # Run with specific environment
//! WORKFORCE_ENV=production cargo run --bin workforce-server
//! ```

use anyhow::Context;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info, warn};

use workforce_core::config::{ConfigManager, StorageBackend, WorkforceConfig};
use workforce_core::database::{DatabaseConnection, DatabaseMigrations};
use workforce_core::logging;
use workforce_core::store::{InMemoryStore, PgStore, Repository};
use workforce_core::web::{create_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let manager = ConfigManager::load().context("Failed to load configuration")?;
    let config = Arc::new(manager.config().clone());

    // Initialize logging first
    logging::init_structured_logging(manager.environment(), &config.logging);

    info!("Starting Workforce Server...");
    info!("   Version: {}", env!("CARGO_PKG_VERSION"));
    info!("   Environment: {}", manager.environment());
    info!(
        "   Config directory: {}",
        manager.config_directory().display()
    );

    let store = build_store(&config).await?;
    info!("   Storage backend: {}", store.backend_name());

    let app = create_app(AppState::new(store, Arc::clone(&config)));

    let listener = TcpListener::bind(&config.web.bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", config.web.bind_address))?;
    info!("   Listening on {}", config.web.bind_address);
    info!("   Press Ctrl+C to shutdown gracefully");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Workforce Server shutdown complete");
    Ok(())
}

async fn build_store(config: &WorkforceConfig) -> anyhow::Result<Arc<dyn Repository>> {
    match config.storage.backend {
        StorageBackend::Memory => {
            if config.is_production() {
                warn!("In-memory store selected in production; data is lost on restart");
            }
            Ok(Arc::new(InMemoryStore::new()))
        }
        StorageBackend::Postgres => {
            let connection = DatabaseConnection::connect(&config.database)
                .await
                .context("Failed to connect to database")?;
            if !connection.health_check().await? {
                anyhow::bail!("Database health check failed");
            }
            if config.database.run_migrations {
                DatabaseMigrations::run_all(connection.pool())
                    .await
                    .context("Failed to run database migrations")?;
            }
            Ok(Arc::new(PgStore::new(connection.into_pool())))
        }
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C");
        },
        _ = terminate => {
            info!("Received SIGTERM");
        },
    }
    info!("Shutdown signal received, initiating graceful shutdown...");
}
