//! Application layer for peer presentation grading
//!
//! This crate holds the grading rules and orchestrates them against the
//! record store.
//!
//! ## Architecture
//!
//! The application layer sits between the domain and infrastructure layers.
//! Services depend only on the repository ports declared here; the
//! infrastructure crate provides PostgreSQL implementations and the testing
//! crate provides in-memory ones.
//!
//! ## Modules
//!
//! - `scoring` - Weighted sub-scores and final grade aggregation
//! - `eligibility` - Who may evaluate which presentation
//! - `validation` - Input validation framework
//! - `services` - SettingsService, EvaluationService, GradingService and their ports

pub mod eligibility;
pub mod scoring;
pub mod services;
pub mod validation;

// Re-export commonly used types
pub use eligibility::EligibilityGuard;
pub use scoring::{round_to_hundredths, AggregationEngine, ScoringEngine, ScoringEngineBuilder};
pub use services::{
    CriterionField, DirectoryPort, EvaluationForm, EvaluationRepositoryPort, EvaluationService,
    EvaluationView, EventPublisher, GradingService, NoOpEventPublisher, PresentationDetail,
    PresentationSummary, ServiceConfig, ServiceContext, ServiceEvent, SettingsRepositoryPort,
    SettingsService, SubmissionOutcome, UNKNOWN_EVALUATOR,
};
pub use validation::{
    ScoreBounds, ScoreInput, SubmitEvaluationRequest, UpdateSettingsRequest, Validatable,
    ValidationResult, ValidationRules,
};

use peer_grading_domain::errors::{DirectoryError, SettingsError};
use thiserror::Error;

/// Application-level errors
#[derive(Error, Debug, Clone)]
pub enum ApplicationError {
    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Permission denied
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// Resource conflict (e.g., duplicate)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Record store unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Request timeout
    #[error("Request timeout: {0}")]
    Timeout(String),
}

impl ApplicationError {
    /// Get HTTP status code for this error
    pub fn http_status(&self) -> u16 {
        match self {
            ApplicationError::NotFound(_) => 404,
            ApplicationError::Forbidden(_) => 403,
            ApplicationError::InvalidInput(_) => 400,
            ApplicationError::ValidationFailed(_) => 422,
            ApplicationError::Conflict(_) => 409,
            ApplicationError::Internal(_) => 500,
            ApplicationError::ServiceUnavailable(_) => 503,
            ApplicationError::Timeout(_) => 504,
        }
    }

    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ApplicationError::ServiceUnavailable(_) | ApplicationError::Timeout(_)
        )
    }

    /// Get error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            ApplicationError::NotFound(_) => "NOT_FOUND",
            ApplicationError::Forbidden(_) => "FORBIDDEN",
            ApplicationError::InvalidInput(_) => "INVALID_INPUT",
            ApplicationError::ValidationFailed(_) => "VALIDATION_FAILED",
            ApplicationError::Conflict(_) => "CONFLICT",
            ApplicationError::Internal(_) => "INTERNAL_ERROR",
            ApplicationError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
            ApplicationError::Timeout(_) => "TIMEOUT",
        }
    }
}

impl From<SettingsError> for ApplicationError {
    fn from(err: SettingsError) -> Self {
        ApplicationError::ValidationFailed(err.to_string())
    }
}

impl From<DirectoryError> for ApplicationError {
    fn from(err: DirectoryError) -> Self {
        ApplicationError::NotFound(err.to_string())
    }
}

pub type ApplicationResult<T> = Result<T, ApplicationError>;
