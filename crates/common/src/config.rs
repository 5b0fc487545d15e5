//! Configuration management for the grading services.
//!
//! Settings are loaded from optional configuration files and environment
//! variables. Grading weights are NOT configured here; they live in the
//! settings store and are edited at runtime.
//!
//! ## Example Configuration
//!
//! ```toml
//! [database]
//! url = "postgres://localhost:5432/peer_grading"
//! pool_size = 10
//!
//! [telemetry]
//! json_logging = true
//! log_level = "info"
//!
//! [grading]
//! min_score = 0.0
//! max_score = 100.0
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    #[serde(default)]
    pub grading: GradingConfig,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL
    pub url: String,

    /// Connection pool size
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,

    /// Connection timeout in seconds
    #[serde(default = "default_db_timeout")]
    pub timeout_seconds: u64,
}

/// Telemetry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Service name for tracing
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Enable JSON logging format
    #[serde(default = "default_json_logging")]
    pub json_logging: bool,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            json_logging: default_json_logging(),
            log_level: default_log_level(),
        }
    }
}

/// Bounds applied to raw criterion scores at the submission boundary
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradingConfig {
    #[serde(default = "default_min_score")]
    pub min_score: f64,

    #[serde(default = "default_max_score")]
    pub max_score: f64,
}

impl Default for GradingConfig {
    fn default() -> Self {
        Self {
            min_score: default_min_score(),
            max_score: default_max_score(),
        }
    }
}

// Default value functions
fn default_pool_size() -> u32 {
    10
}

fn default_db_timeout() -> u64 {
    30
}

fn default_service_name() -> String {
    "peer-grading".to_string()
}

fn default_json_logging() -> bool {
    false
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_min_score() -> f64 {
    0.0
}

fn default_max_score() -> f64 {
    100.0
}

impl AppConfig {
    /// Load configuration from environment variables and configuration files.
    ///
    /// The configuration is loaded in the following order (later sources override earlier ones):
    /// 1. Default values
    /// 2. config/default.toml (if exists)
    /// 3. config/{environment}.toml (if exists, where environment is from APP_ENV)
    /// 4. Environment variables (prefixed with APP_)
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use peer_grading_common::config::AppConfig;
    ///
    /// let config = AppConfig::load().expect("Failed to load configuration");
    /// println!("Scores accepted in [{}, {}]", config.grading.min_score, config.grading.max_score);
    /// ```
    pub fn load() -> Result<Self> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", env)).required(false))
            // Example: APP_DATABASE__POOL_SIZE=20
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to build configuration")?;

        let app_config: AppConfig = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        app_config.validate()?;

        Ok(app_config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.database.url.is_empty() {
            anyhow::bail!("Database URL is required");
        }

        if self.database.pool_size == 0 {
            anyhow::bail!("Database pool size must be greater than 0");
        }

        if self.database.timeout_seconds == 0 {
            anyhow::bail!("Database timeout must be greater than 0");
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.telemetry.log_level.as_str()) {
            anyhow::bail!(
                "Invalid log level '{}'. Must be one of: {}",
                self.telemetry.log_level,
                valid_log_levels.join(", ")
            );
        }

        let grading = &self.grading;
        if !grading.min_score.is_finite() || !grading.max_score.is_finite() {
            anyhow::bail!("Score bounds must be finite numbers");
        }

        if grading.min_score >= grading.max_score {
            anyhow::bail!(
                "Minimum score ({}) must be below maximum score ({})",
                grading.min_score,
                grading.max_score
            );
        }

        Ok(())
    }

    /// Get the database connection timeout as a Duration
    pub fn database_timeout(&self) -> Duration {
        Duration::from_secs(self.database.timeout_seconds)
    }

    /// Create a development configuration with sensible defaults
    pub fn development() -> Self {
        Self {
            database: DatabaseConfig {
                url: "postgres://localhost:5432/peer_grading_dev".to_string(),
                pool_size: 5,
                timeout_seconds: 30,
            },
            telemetry: TelemetryConfig {
                service_name: "peer-grading-dev".to_string(),
                json_logging: false,
                log_level: "debug".to_string(),
            },
            grading: GradingConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_validation() {
        let mut config = AppConfig::development();

        // Valid config should pass
        assert!(config.validate().is_ok());

        // Missing database URL
        config.database.url = String::new();
        assert!(config.validate().is_err());
        config.database.url = "postgres://localhost/test".to_string();

        // Zero pool size
        config.database.pool_size = 0;
        assert!(config.validate().is_err());
        config.database.pool_size = 5;

        // Invalid log level
        config.telemetry.log_level = "verbose".to_string();
        assert!(config.validate().is_err());
        config.telemetry.log_level = "info".to_string();

        // Inverted score bounds
        config.grading.min_score = 100.0;
        config.grading.max_score = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_grading_defaults() {
        let grading = GradingConfig::default();
        assert_eq!(grading.min_score, 0.0);
        assert_eq!(grading.max_score, 100.0);
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: AppConfig = serde_json::from_str(
            r#"{ "database": { "url": "postgres://localhost/grading" } }"#,
        )
        .unwrap();

        assert_eq!(config.database.pool_size, 10);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.grading.max_score, 100.0);
        assert!(config.validate().is_ok());
    }
}
