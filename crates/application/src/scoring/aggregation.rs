//! Aggregation Engine - final grade of a presentation
//!
//! Combines the instructor sub-score with the mean of the peer sub-scores
//! using the instructor/peer blend of the active configuration. Nothing is
//! cached: every call recomputes from the evaluations it is given.

use super::{round_to_hundredths, ScoringEngine};
use peer_grading_domain::criteria::CriteriaConfig;
use peer_grading_domain::evaluation::Evaluation;
use peer_grading_domain::grading::FinalGradeInfo;
use tracing::{debug, instrument};

#[derive(Debug, Clone, Default)]
pub struct AggregationEngine {
    scoring: ScoringEngine,
}

impl AggregationEngine {
    pub fn new(config: CriteriaConfig) -> Self {
        Self {
            scoring: ScoringEngine::new(config),
        }
    }

    pub fn from_scoring(scoring: ScoringEngine) -> Self {
        Self { scoring }
    }

    pub fn scoring(&self) -> &ScoringEngine {
        &self.scoring
    }

    /// Compute the final grade from all evaluations of one presentation.
    ///
    /// Peer scores are reported in the order the evaluations are supplied.
    /// If more than one instructor evaluation is present, the earliest
    /// submitted one is used.
    #[instrument(skip_all, fields(evaluations = evaluations.len()))]
    pub fn final_grade(&self, evaluations: &[Evaluation]) -> FinalGradeInfo {
        let (instructor, peers): (Vec<&Evaluation>, Vec<&Evaluation>) = evaluations
            .iter()
            .partition(|evaluation| evaluation.evaluator.is_instructor());

        let instructor_score = instructor
            .iter()
            .min_by_key(|evaluation| (evaluation.created_at, evaluation.id))
            .map(|evaluation| self.scoring.weighted_subscore(evaluation));

        let peer_scores: Vec<f64> = peers
            .iter()
            .map(|evaluation| self.scoring.weighted_subscore(evaluation))
            .collect();

        let peer_average = mean(&peer_scores).map(round_to_hundredths);

        let config = self.scoring.config();
        let final_score = match (instructor_score, peer_average) {
            (Some(instructor), Some(peer)) => Some(round_to_hundredths(
                instructor * config.instructor_weight / 100.0 + peer * config.peer_weight / 100.0,
            )),
            (Some(instructor), None) => Some(instructor),
            (None, Some(peer)) => Some(peer),
            (None, None) => None,
        };

        debug!(
            instructor_score = ?instructor_score,
            peer_average = ?peer_average,
            final_score = ?final_score,
            "Computed final grade"
        );

        FinalGradeInfo {
            instructor_score,
            peer_average,
            final_score,
            evaluation_count: peer_scores.len(),
            peer_scores,
        }
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}
