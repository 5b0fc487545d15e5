//! Scoring Engine - weighted sub-score of a single evaluation
//!
//! Each raw criterion score is multiplied by its weight as a fraction of 100,
//! the six products are summed and the result is rounded to hundredths.
//! Raw scores are not clamped; bounds are enforced at the submission boundary.

use super::round_to_hundredths;
use peer_grading_domain::criteria::{CriteriaConfig, Criterion};
use peer_grading_domain::errors::SettingsError;
use peer_grading_domain::evaluation::{CriterionScores, Evaluation};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Contribution of one criterion to a sub-score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CriterionContribution {
    pub criterion: Criterion,
    pub raw_score: f64,
    pub weight: f64,
    pub weighted: f64,
}

/// Computes weighted sub-scores against one grading configuration
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    config: CriteriaConfig,
}

impl ScoringEngine {
    /// Create an engine bound to the given configuration
    pub fn new(config: CriteriaConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CriteriaConfig {
        &self.config
    }

    /// Unrounded weighted sum of the six scores
    pub fn weighted_sum(&self, scores: &CriterionScores) -> f64 {
        Criterion::all()
            .iter()
            .map(|c| scores.get(*c) * self.config.weight(*c) / 100.0)
            .sum()
    }

    /// Weighted sub-score of an evaluation, rounded to hundredths
    #[instrument(level = "trace", skip_all, fields(evaluation_id = %evaluation.id))]
    pub fn weighted_subscore(&self, evaluation: &Evaluation) -> f64 {
        round_to_hundredths(self.weighted_sum(&evaluation.scores))
    }

    /// Per-criterion breakdown in display order
    pub fn breakdown(&self, scores: &CriterionScores) -> Vec<CriterionContribution> {
        Criterion::all()
            .iter()
            .map(|c| {
                let raw_score = scores.get(*c);
                let weight = self.config.weight(*c);
                CriterionContribution {
                    criterion: *c,
                    raw_score,
                    weight,
                    weighted: raw_score * weight / 100.0,
                }
            })
            .collect()
    }
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new(CriteriaConfig::default_active())
    }
}

/// Builder for ScoringEngine
pub struct ScoringEngineBuilder {
    config: CriteriaConfig,
}

impl ScoringEngineBuilder {
    pub fn new() -> Self {
        Self {
            config: CriteriaConfig::default_active(),
        }
    }

    pub fn config(mut self, config: CriteriaConfig) -> Self {
        self.config = config;
        self
    }

    pub fn weight(mut self, criterion: Criterion, weight: f64) -> Self {
        self.config.set_weight(criterion, weight);
        self
    }

    pub fn blend(mut self, instructor_weight: f64, peer_weight: f64) -> Self {
        self.config.instructor_weight = instructor_weight;
        self.config.peer_weight = peer_weight;
        self
    }

    /// Build the engine, rejecting configurations whose weights do not sum to 100
    pub fn build(self) -> Result<ScoringEngine, SettingsError> {
        self.config.validate()?;
        Ok(ScoringEngine::new(self.config))
    }
}

impl Default for ScoringEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use peer_grading_domain::evaluation::Evaluator;
    use peer_grading_domain::identifiers::{PresentationId, StudentId};

    fn make_evaluation(scores: CriterionScores) -> Evaluation {
        Evaluation::new(
            PresentationId::new(),
            Evaluator::Peer(StudentId::new()),
            scores,
            None,
        )
    }

    #[test]
    fn test_uniform_scores_pass_through() {
        let engine = ScoringEngine::default();
        let evaluation = make_evaluation(CriterionScores::uniform(80.0));
        assert_eq!(engine.weighted_subscore(&evaluation), 80.0);
    }

    #[test]
    fn test_default_weights_subscore() {
        let engine = ScoringEngine::default();
        let scores = CriterionScores {
            subject_mastery: 90.0,
            delivery: 80.0,
            attire: 100.0,
            team_cohesion: 70.0,
            visuals: 60.0,
            overall_impression: 85.0,
        };

        // 13.5 + 12 + 5 + 7 + 21 + 17 = 75.5
        assert_eq!(engine.weighted_subscore(&make_evaluation(scores)), 75.5);
    }

    #[test]
    fn test_subscore_rounds_to_hundredths() {
        let engine = ScoringEngineBuilder::new()
            .weight(Criterion::SubjectMastery, 100.0 / 3.0)
            .weight(Criterion::Delivery, 100.0 / 3.0)
            .weight(Criterion::Attire, 100.0 / 3.0)
            .weight(Criterion::TeamCohesion, 0.0)
            .weight(Criterion::Visuals, 0.0)
            .weight(Criterion::OverallImpression, 0.0)
            .build()
            .unwrap();

        let mut scores = CriterionScores::uniform(0.0);
        scores.subject_mastery = 10.0;

        assert_eq!(engine.weighted_subscore(&make_evaluation(scores)), 3.33);
    }

    #[test]
    fn test_scores_are_not_clamped() {
        let engine = ScoringEngine::default();
        let evaluation = make_evaluation(CriterionScores::uniform(150.0));
        assert_eq!(engine.weighted_subscore(&evaluation), 150.0);
    }

    #[test]
    fn test_breakdown_sums_to_weighted_sum() {
        let engine = ScoringEngine::default();
        let scores = CriterionScores::uniform(50.0);
        let breakdown = engine.breakdown(&scores);

        assert_eq!(breakdown.len(), 6);
        let total: f64 = breakdown.iter().map(|c| c.weighted).sum();
        assert!((total - engine.weighted_sum(&scores)).abs() < 1e-9);
        assert_eq!(breakdown[4].criterion, Criterion::Visuals);
        assert_eq!(breakdown[4].weighted, 17.5);
    }

    #[test]
    fn test_builder_rejects_bad_weights() {
        let result = ScoringEngineBuilder::new()
            .weight(Criterion::Visuals, 50.0)
            .build();

        assert!(matches!(
            result,
            Err(SettingsError::CriteriaWeightSum { .. })
        ));
    }
}
