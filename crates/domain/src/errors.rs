//! Error types for the peer grading domain.
//!
//! Each enum covers one concern. The application layer turns the ones that
//! escape a service call into `ApplicationError`; eligibility refusals are
//! reported as submission outcomes and only lend their messages.

use crate::criteria::Criterion;
use crate::identifiers::PresentationId;

/// Reasons an evaluation submission is refused
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvaluationError {
    /// Peer belongs to the team that owns the presentation
    #[error("You cannot evaluate your own team's presentation")]
    SelfTeam,

    /// Evaluator already has an evaluation for the presentation
    #[error("You have already evaluated this presentation")]
    AlreadyEvaluated,
}

/// Grading settings errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SettingsError {
    /// Criterion weights do not sum to 100
    #[error("Criterion weights must sum to 100 (currently {total:.2})")]
    CriteriaWeightSum { total: f64 },

    /// Instructor and peer weights do not sum to 100
    #[error("Instructor and peer weights must sum to 100 (currently {total:.2})")]
    BlendWeightSum { total: f64 },
}

/// Score validation errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// A criterion score was not supplied
    #[error("Score for {criterion} is required")]
    MissingScore { criterion: Criterion },

    /// A criterion score is NaN or infinite
    #[error("Score for {criterion} must be a number")]
    NonFiniteScore { criterion: Criterion },

    /// A criterion score falls outside the accepted bounds
    #[error("Score for {criterion} out of range: {score} not in [{min}, {max}]")]
    ScoreOutOfRange {
        criterion: Criterion,
        score: f64,
        min: f64,
        max: f64,
    },
}

/// Directory lookup errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectoryError {
    /// No presentation with this id
    #[error("Presentation not found: {0}")]
    PresentationNotFound(PresentationId),
}
