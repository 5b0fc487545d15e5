//! Results produced by grading and eligibility checks.

use serde::{Deserialize, Serialize};

/// Final grade breakdown for one presentation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinalGradeInfo {
    /// Weighted sub-score of the instructor evaluation, if one exists
    pub instructor_score: Option<f64>,
    /// Mean of the peer sub-scores rounded to hundredths
    pub peer_average: Option<f64>,
    /// Blended grade; absent when there are no evaluations at all
    pub final_score: Option<f64>,
    /// Peer sub-scores in the order the evaluations were supplied
    pub peer_scores: Vec<f64>,
    /// Number of peer evaluations (the instructor's is not counted)
    pub evaluation_count: usize,
}

impl FinalGradeInfo {
    pub fn is_empty(&self) -> bool {
        self.instructor_score.is_none() && self.peer_scores.is_empty()
    }
}

/// Why an evaluator was or was not allowed to submit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityReason {
    Ok,
    SelfTeam,
    AlreadyEvaluated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityDecision {
    pub allowed: bool,
    pub reason: EligibilityReason,
}

impl EligibilityDecision {
    pub fn allow() -> Self {
        Self {
            allowed: true,
            reason: EligibilityReason::Ok,
        }
    }

    pub fn reject(reason: EligibilityReason) -> Self {
        Self {
            allowed: false,
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grade_is_empty() {
        let info = FinalGradeInfo::default();
        assert!(info.is_empty());
        assert_eq!(info.evaluation_count, 0);
        assert!(info.final_score.is_none());
    }

    #[test]
    fn test_decision_constructors() {
        assert!(EligibilityDecision::allow().allowed);

        let rejected = EligibilityDecision::reject(EligibilityReason::SelfTeam);
        assert!(!rejected.allowed);
        assert_eq!(rejected.reason, EligibilityReason::SelfTeam);
    }
}
