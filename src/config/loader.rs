//! Configuration Loader
//!
//! Environment-aware configuration loading. Handles file discovery, environment
//! detection, and merging of file and environment variable sources.

use config::{Config, Environment, File};
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

use super::WorkforceConfig;
use crate::error::Result;

const CONFIG_FILE_STEM: &str = "workforce";
const ENV_PREFIX: &str = "WORKFORCE";

/// Loaded configuration plus the context it was loaded from
#[derive(Debug)]
pub struct ConfigManager {
    config: WorkforceConfig,
    environment: String,
    config_directory: PathBuf,
}

impl ConfigManager {
    /// Load configuration with environment auto-detection
    pub fn load() -> Result<Arc<ConfigManager>> {
        Self::load_from_directory(None)
    }

    /// Load configuration from a specific directory
    pub fn load_from_directory(config_dir: Option<PathBuf>) -> Result<Arc<ConfigManager>> {
        let environment = Self::detect_environment();
        Self::load_from_directory_with_env(config_dir, &environment)
    }

    /// Load configuration from a specific directory with explicit environment.
    /// Useful for testing without modifying global environment variables.
    pub fn load_from_directory_with_env(
        config_dir: Option<PathBuf>,
        environment: &str,
    ) -> Result<Arc<ConfigManager>> {
        let config_directory = config_dir.unwrap_or_else(Self::default_config_directory);

        debug!(
            environment = %environment,
            directory = %config_directory.display(),
            "Loading configuration"
        );

        let mut config = Self::load_and_merge_config(&config_directory, environment)?;

        if let Ok(database_url) = env::var("DATABASE_URL") {
            config.database.url = database_url;
        }

        config.validate()?;

        info!(
            environment = %config.environment,
            storage_backend = ?config.storage.backend,
            bind_address = %config.web.bind_address,
            assignment_slack = config.assignment.slack,
            "Configuration loaded successfully"
        );

        Ok(Arc::new(ConfigManager {
            config,
            environment: environment.to_string(),
            config_directory,
        }))
    }

    /// Wrap an already-built configuration (tests, embedding)
    pub fn from_config(config: WorkforceConfig) -> Result<Arc<ConfigManager>> {
        config.validate()?;
        let environment = config.environment.clone();
        Ok(Arc::new(ConfigManager {
            config,
            environment,
            config_directory: Self::default_config_directory(),
        }))
    }

    pub fn config(&self) -> &WorkforceConfig {
        &self.config
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn config_directory(&self) -> &Path {
        &self.config_directory
    }

    /// Current environment from `WORKFORCE_ENV`, then `APP_ENV`
    pub fn detect_environment() -> String {
        env::var("WORKFORCE_ENV")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string())
    }

    fn default_config_directory() -> PathBuf {
        env::var("WORKFORCE_CONFIG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config"))
    }

    fn load_and_merge_config(config_directory: &Path, environment: &str) -> Result<WorkforceConfig> {
        let base_file = config_directory.join(format!("{CONFIG_FILE_STEM}.toml"));
        let env_file = config_directory.join(format!("{CONFIG_FILE_STEM}.{environment}.toml"));

        debug!(
            base_file = %base_file.display(),
            base_exists = base_file.exists(),
            env_file = %env_file.display(),
            env_exists = env_file.exists(),
            "Resolving configuration files"
        );

        let settings = Config::builder()
            .set_default("environment", environment)?
            .add_source(File::from(base_file).required(false))
            .add_source(File::from(env_file).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize::<WorkforceConfig>()?)
    }
}
