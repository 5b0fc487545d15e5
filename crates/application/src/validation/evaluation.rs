//! Evaluation submission validation rules

use super::{Validatable, ValidationResult, ValidationRules, ValidatorExt};
use peer_grading_common::config::GradingConfig;
use peer_grading_domain::criteria::Criterion;
use peer_grading_domain::errors::ValidationError;
use peer_grading_domain::evaluation::{CriterionScores, Evaluator};
use peer_grading_domain::identifiers::PresentationId;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Inclusive bounds accepted for each raw score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBounds {
    pub min: f64,
    pub max: f64,
}

impl Default for ScoreBounds {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 100.0,
        }
    }
}

impl From<&GradingConfig> for ScoreBounds {
    fn from(config: &GradingConfig) -> Self {
        Self {
            min: config.min_score,
            max: config.max_score,
        }
    }
}

/// Raw scores as received from a form; any of them may be absent
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreInput {
    pub subject_mastery: Option<f64>,
    pub delivery: Option<f64>,
    pub attire: Option<f64>,
    pub team_cohesion: Option<f64>,
    pub visuals: Option<f64>,
    pub overall_impression: Option<f64>,
}

impl ScoreInput {
    pub fn get(&self, criterion: Criterion) -> Option<f64> {
        match criterion {
            Criterion::SubjectMastery => self.subject_mastery,
            Criterion::Delivery => self.delivery,
            Criterion::Attire => self.attire,
            Criterion::TeamCohesion => self.team_cohesion,
            Criterion::Visuals => self.visuals,
            Criterion::OverallImpression => self.overall_impression,
        }
    }

    pub fn with(mut self, criterion: Criterion, score: Option<f64>) -> Self {
        let slot = match criterion {
            Criterion::SubjectMastery => &mut self.subject_mastery,
            Criterion::Delivery => &mut self.delivery,
            Criterion::Attire => &mut self.attire,
            Criterion::TeamCohesion => &mut self.team_cohesion,
            Criterion::Visuals => &mut self.visuals,
            Criterion::OverallImpression => &mut self.overall_impression,
        };
        *slot = score;
        self
    }

    /// Convert to checked scores, failing on the first problem in criterion order
    pub fn resolve(&self, bounds: ScoreBounds) -> Result<CriterionScores, ValidationError> {
        let mut scores = CriterionScores::uniform(0.0);

        for criterion in Criterion::all() {
            let criterion = *criterion;
            let score = self
                .get(criterion)
                .ok_or(ValidationError::MissingScore { criterion })?;

            if !score.is_finite() {
                return Err(ValidationError::NonFiniteScore { criterion });
            }

            if score < bounds.min || score > bounds.max {
                return Err(ValidationError::ScoreOutOfRange {
                    criterion,
                    score,
                    min: bounds.min,
                    max: bounds.max,
                });
            }

            scores.set(criterion, score);
        }

        Ok(scores)
    }
}

impl From<CriterionScores> for ScoreInput {
    fn from(scores: CriterionScores) -> Self {
        Criterion::all()
            .iter()
            .fold(Self::default(), |input, c| input.with(*c, Some(scores.get(*c))))
    }
}

/// Submit evaluation request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SubmitEvaluationRequest {
    pub presentation_id: PresentationId,
    pub evaluator: Evaluator,
    pub scores: ScoreInput,
    #[validate(length(max = 2000, message = "Comment must be 2000 characters or less"))]
    pub comment: Option<String>,
}

impl SubmitEvaluationRequest {
    /// Check every score and the comment against the given bounds
    pub fn validate_with(&self, bounds: ScoreBounds) -> ValidationResult {
        let mut result = self.to_validation_result();

        for criterion in Criterion::all() {
            match self.scores.get(*criterion) {
                None => result.add_field_error(
                    criterion.key(),
                    ValidationError::MissingScore {
                        criterion: *criterion,
                    }
                    .to_string(),
                ),
                Some(score) => result.merge(ValidationRules::validate_score(
                    score,
                    criterion.key(),
                    bounds.min,
                    bounds.max,
                )),
            }
        }

        result
    }

    /// Comment with surrounding whitespace removed; blank comments become `None`
    pub fn normalized_comment(&self) -> Option<String> {
        self.comment
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
    }
}

impl Validatable for SubmitEvaluationRequest {
    fn validate_all(&self) -> ValidationResult {
        self.validate_with(ScoreBounds::default())
    }
}
