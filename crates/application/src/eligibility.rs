//! Eligibility rules for submitting an evaluation.
//!
//! Rules are checked in order:
//! 1. A peer on the presenting team is rejected with `SelfTeam`.
//! 2. An evaluator who already evaluated the presentation is rejected with
//!    `AlreadyEvaluated`.
//! 3. Anyone else is allowed.
//!
//! The store's uniqueness constraint on (presentation, role, evaluator) remains
//! the authority; these checks only give early feedback and pre-filter the
//! candidate list.

use peer_grading_domain::directory::{Presentation, Student};
use peer_grading_domain::evaluation::{Evaluation, Evaluator};
use peer_grading_domain::grading::{EligibilityDecision, EligibilityReason};
use peer_grading_domain::identifiers::{StudentId, TeamId};
use std::collections::BTreeSet;
use tracing::{debug, instrument};

#[derive(Debug, Clone, Copy, Default)]
pub struct EligibilityGuard;

impl EligibilityGuard {
    pub fn new() -> Self {
        Self
    }

    /// Decide whether `evaluator` may submit for `presentation`.
    ///
    /// `evaluator_team` is the peer's team as recorded in the directory and is
    /// ignored for instructors. `existing` holds the evaluations already stored
    /// for the presentation.
    #[instrument(skip_all, fields(presentation_id = %presentation.id, evaluator = %evaluator))]
    pub fn can_submit(
        &self,
        evaluator: &Evaluator,
        evaluator_team: Option<TeamId>,
        presentation: &Presentation,
        existing: &[Evaluation],
    ) -> EligibilityDecision {
        if evaluator.is_peer() && evaluator_team == Some(presentation.team_id) {
            debug!("Rejected: evaluator belongs to the presenting team");
            return EligibilityDecision::reject(EligibilityReason::SelfTeam);
        }

        let already_evaluated = existing
            .iter()
            .any(|e| e.presentation_id == presentation.id && e.is_by(evaluator));
        if already_evaluated {
            debug!("Rejected: evaluator already submitted");
            return EligibilityDecision::reject(EligibilityReason::AlreadyEvaluated);
        }

        EligibilityDecision::allow()
    }

    /// Students who may still be offered as peer evaluators for `presentation`:
    /// everyone not on the presenting team and not yet evaluated.
    pub fn candidate_peer_pool(
        &self,
        presentation: &Presentation,
        students: &[Student],
        evaluations: &[Evaluation],
    ) -> BTreeSet<StudentId> {
        let evaluated: BTreeSet<StudentId> = evaluations
            .iter()
            .filter(|e| e.presentation_id == presentation.id)
            .filter_map(|e| e.evaluator.student_id())
            .collect();

        students
            .iter()
            .filter(|s| !s.is_member_of(presentation.team_id))
            .map(|s| s.id)
            .filter(|id| !evaluated.contains(id))
            .collect()
    }
}
