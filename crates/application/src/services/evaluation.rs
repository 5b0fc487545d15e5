//! Evaluation Service
//!
//! The submission entry point: validates raw scores, applies the eligibility
//! rules and persists the evaluation. The store's uniqueness constraint is the
//! final guard; a duplicate rejected there is reported like any other repeat
//! submission.

use super::{DirectoryPort, EventPublisher, ServiceConfig, ServiceContext, ServiceEvent};
use crate::eligibility::EligibilityGuard;
use crate::validation::SubmitEvaluationRequest;
use crate::{ApplicationError, ApplicationResult};
use async_trait::async_trait;
use peer_grading_domain::errors::{DirectoryError, EvaluationError};
use peer_grading_domain::evaluation::{Evaluation, Evaluator};
use peer_grading_domain::grading::EligibilityReason;
use peer_grading_domain::identifiers::{PresentationId, TeamId};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Evaluation repository trait
#[async_trait]
pub trait EvaluationRepositoryPort: Send + Sync {
    /// Store a new evaluation.
    ///
    /// Fails with `ApplicationError::Conflict` when the presentation already has
    /// an evaluation from the same evaluator; nothing is written in that case.
    async fn insert(&self, evaluation: &Evaluation) -> Result<(), ApplicationError>;

    /// All evaluations of a presentation, newest first
    async fn list_for_presentation(
        &self,
        presentation_id: PresentationId,
    ) -> Result<Vec<Evaluation>, ApplicationError>;
}

/// Result of a submission attempt
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    Accepted(Evaluation),
    SelfTeam,
    AlreadyEvaluated,
    /// Missing or malformed input, with a user-facing message
    Invalid(String),
}

impl SubmissionOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    /// Message to show the evaluator
    pub fn message(&self) -> String {
        match self {
            Self::Accepted(_) => "Your evaluation has been saved".to_string(),
            Self::SelfTeam => EvaluationError::SelfTeam.to_string(),
            Self::AlreadyEvaluated => EvaluationError::AlreadyEvaluated.to_string(),
            Self::Invalid(message) => message.clone(),
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Accepted(_) => "accepted",
            Self::SelfTeam => "self_team",
            Self::AlreadyEvaluated => "already_evaluated",
            Self::Invalid(_) => "invalid",
        }
    }
}

/// Evaluation service implementation
pub struct EvaluationService<R, D, E>
where
    R: EvaluationRepositoryPort,
    D: DirectoryPort,
    E: EventPublisher,
{
    repository: Arc<R>,
    directory: Arc<D>,
    event_publisher: Arc<E>,
    guard: EligibilityGuard,
    config: ServiceConfig,
}

impl<R, D, E> EvaluationService<R, D, E>
where
    R: EvaluationRepositoryPort,
    D: DirectoryPort,
    E: EventPublisher,
{
    pub fn new(
        repository: Arc<R>,
        directory: Arc<D>,
        event_publisher: Arc<E>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            repository,
            directory,
            event_publisher,
            guard: EligibilityGuard::new(),
            config,
        }
    }

    /// Submit an evaluation.
    ///
    /// Rejections a user can act on come back as `Ok` with a non-accepted
    /// outcome. `Err` is reserved for an unknown presentation and store failures.
    #[instrument(
        skip(self, ctx, request),
        fields(
            correlation_id = %ctx.correlation_id,
            presentation_id = %request.presentation_id,
            evaluator = %request.evaluator,
            outcome = tracing::field::Empty
        )
    )]
    pub async fn submit(
        &self,
        ctx: &ServiceContext,
        request: SubmitEvaluationRequest,
    ) -> ApplicationResult<SubmissionOutcome> {
        let outcome = self.try_submit(request).await?;
        tracing::Span::current().record("outcome", outcome.label());
        Ok(outcome)
    }

    async fn try_submit(
        &self,
        request: SubmitEvaluationRequest,
    ) -> ApplicationResult<SubmissionOutcome> {
        let bounds = self.config.score_bounds;

        let validation = request.validate_with(bounds);
        if !validation.valid {
            return Ok(SubmissionOutcome::Invalid(validation.messages().join("; ")));
        }

        let scores = match request.scores.resolve(bounds) {
            Ok(scores) => scores,
            Err(err) => return Ok(SubmissionOutcome::Invalid(err.to_string())),
        };

        let presentation = self
            .directory
            .get_presentation(request.presentation_id)
            .await?
            .ok_or(DirectoryError::PresentationNotFound(request.presentation_id))?;

        let evaluator_team = match self.resolve_evaluator(&request.evaluator).await? {
            Some(team) => team,
            None => {
                return Ok(SubmissionOutcome::Invalid(
                    "Unknown evaluator".to_string(),
                ))
            }
        };

        let existing = self
            .repository
            .list_for_presentation(presentation.id)
            .await?;

        let decision =
            self.guard
                .can_submit(&request.evaluator, evaluator_team, &presentation, &existing);
        match decision.reason {
            EligibilityReason::SelfTeam => return Ok(SubmissionOutcome::SelfTeam),
            EligibilityReason::AlreadyEvaluated => return Ok(SubmissionOutcome::AlreadyEvaluated),
            EligibilityReason::Ok => {}
        }

        let evaluation = Evaluation::new(
            presentation.id,
            request.evaluator,
            scores,
            request.normalized_comment(),
        );

        match self.repository.insert(&evaluation).await {
            Ok(()) => {}
            Err(ApplicationError::Conflict(reason)) => {
                warn!(%reason, "Store rejected duplicate evaluation");
                return Ok(SubmissionOutcome::AlreadyEvaluated);
            }
            Err(err) => return Err(err),
        }

        info!(evaluation_id = %evaluation.id, "Evaluation submitted");

        if let Err(err) = self
            .event_publisher
            .publish(ServiceEvent::EvaluationSubmitted {
                evaluation_id: evaluation.id,
                presentation_id: evaluation.presentation_id,
                role: evaluation.evaluator.role(),
            })
            .await
        {
            warn!(error = %err, "Failed to publish evaluation event");
        }

        Ok(SubmissionOutcome::Accepted(evaluation))
    }

    /// Look up the evaluator. Outer `None` means unknown; for a known peer the
    /// inner value is their team.
    async fn resolve_evaluator(
        &self,
        evaluator: &Evaluator,
    ) -> ApplicationResult<Option<Option<TeamId>>> {
        match evaluator {
            Evaluator::Peer(id) => Ok(self
                .directory
                .get_student(*id)
                .await?
                .map(|student| student.team_id)),
            Evaluator::Instructor(id) => Ok(self
                .directory
                .get_instructor(*id)
                .await?
                .map(|_| None)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_messages() {
        assert_eq!(
            SubmissionOutcome::SelfTeam.message(),
            "You cannot evaluate your own team's presentation"
        );
        assert_eq!(
            SubmissionOutcome::AlreadyEvaluated.message(),
            "You have already evaluated this presentation"
        );
        assert_eq!(
            SubmissionOutcome::Invalid("Score for delivery is required".to_string()).message(),
            "Score for delivery is required"
        );
        assert!(!SubmissionOutcome::SelfTeam.is_accepted());
    }
}
