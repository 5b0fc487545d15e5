//! Shared configuration and telemetry for the peer grading workspace.
//!
//! This crate provides:
//! - Configuration management
//! - Structured logging setup

pub mod config;
pub mod telemetry;

// Re-export commonly used types
pub use config::{AppConfig, DatabaseConfig, GradingConfig, TelemetryConfig};
pub use telemetry::{init_from_config, init_tracing};

/// Common error type used throughout the crate
pub type Result<T> = std::result::Result<T, anyhow::Error>;
