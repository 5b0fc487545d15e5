//! Application Services
//!
//! Orchestration layer that coordinates the grading rules, repository access,
//! and cross-cutting concerns.

mod evaluation;
mod grading;
mod settings;

pub use evaluation::*;
pub use grading::*;
pub use settings::*;

use crate::validation::ScoreBounds;
use crate::ApplicationError;
use async_trait::async_trait;
use peer_grading_common::config::AppConfig;
use peer_grading_domain::directory::{Instructor, Presentation, Student, Team};
use peer_grading_domain::evaluation::EvaluatorRole;
use peer_grading_domain::identifiers::{
    EvaluationId, InstructorId, PresentationId, SettingsId, StudentId, TeamId,
};

/// Service configuration
#[derive(Debug, Clone, Default)]
pub struct ServiceConfig {
    /// Bounds accepted for each raw criterion score
    pub score_bounds: ScoreBounds,
}

impl ServiceConfig {
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            score_bounds: ScoreBounds::from(&config.grading),
        }
    }
}

/// Service context for request handling
#[derive(Debug, Clone)]
pub struct ServiceContext {
    /// The authenticated user ID (if any)
    pub user_id: Option<String>,
    /// Request correlation ID for tracing
    pub correlation_id: String,
    /// Whether the user may change grading settings
    pub is_admin: bool,
}

impl ServiceContext {
    pub fn anonymous(correlation_id: String) -> Self {
        Self {
            user_id: None,
            correlation_id,
            is_admin: false,
        }
    }

    pub fn authenticated(user_id: String, correlation_id: String) -> Self {
        Self {
            user_id: Some(user_id),
            correlation_id,
            is_admin: false,
        }
    }

    pub fn with_admin(mut self) -> Self {
        self.is_admin = true;
        self
    }

    pub fn require_admin(&self) -> Result<(), ApplicationError> {
        if !self.is_admin {
            return Err(ApplicationError::Forbidden(
                "Admin privileges required".to_string(),
            ));
        }
        Ok(())
    }
}

/// Service event for event-driven architecture
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceEvent {
    EvaluationSubmitted {
        evaluation_id: EvaluationId,
        presentation_id: PresentationId,
        role: EvaluatorRole,
    },
    SettingsUpdated {
        settings_id: SettingsId,
        updated_by: Option<String>,
    },
}

/// Event publisher trait for service events
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, event: ServiceEvent) -> Result<(), ApplicationError>;
}

/// No-op event publisher
pub struct NoOpEventPublisher;

#[async_trait]
impl EventPublisher for NoOpEventPublisher {
    async fn publish(&self, _event: ServiceEvent) -> Result<(), ApplicationError> {
        Ok(())
    }
}

/// Read access to the people and presentations kept by the record store
#[async_trait]
pub trait DirectoryPort: Send + Sync {
    async fn get_presentation(
        &self,
        id: PresentationId,
    ) -> Result<Option<Presentation>, ApplicationError>;
    async fn list_presentations(&self) -> Result<Vec<Presentation>, ApplicationError>;
    async fn get_student(&self, id: StudentId) -> Result<Option<Student>, ApplicationError>;
    async fn list_students(&self) -> Result<Vec<Student>, ApplicationError>;
    async fn get_instructor(&self, id: InstructorId)
        -> Result<Option<Instructor>, ApplicationError>;
    async fn list_instructors(&self) -> Result<Vec<Instructor>, ApplicationError>;
    async fn get_team(&self, id: TeamId) -> Result<Option<Team>, ApplicationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_context() {
        let ctx = ServiceContext::anonymous("corr-123".to_string());
        assert!(ctx.user_id.is_none());
        assert!(ctx.require_admin().is_err());

        let ctx = ServiceContext::authenticated("user-123".to_string(), "corr-123".to_string());
        assert!(ctx.require_admin().is_err());

        let ctx = ctx.with_admin();
        assert!(ctx.require_admin().is_ok());
    }

    #[test]
    fn test_service_config_from_app_config() {
        let mut app = AppConfig::development();
        app.grading.max_score = 10.0;

        let config = ServiceConfig::from_app_config(&app);
        assert_eq!(config.score_bounds, ScoreBounds { min: 0.0, max: 10.0 });
    }
}
