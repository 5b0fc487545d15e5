//! Evaluations submitted by instructors and peer students.

use crate::criteria::Criterion;
use crate::identifiers::{EvaluationId, InstructorId, PresentationId, StudentId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who submitted an evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "role", content = "id", rename_all = "snake_case")]
pub enum Evaluator {
    Instructor(InstructorId),
    Peer(StudentId),
}

impl Evaluator {
    pub fn role(&self) -> EvaluatorRole {
        match self {
            Self::Instructor(_) => EvaluatorRole::Instructor,
            Self::Peer(_) => EvaluatorRole::Peer,
        }
    }

    pub fn is_peer(&self) -> bool {
        matches!(self, Self::Peer(_))
    }

    pub fn is_instructor(&self) -> bool {
        matches!(self, Self::Instructor(_))
    }

    /// The peer student, if this is a peer evaluator
    pub fn student_id(&self) -> Option<StudentId> {
        match self {
            Self::Peer(id) => Some(*id),
            Self::Instructor(_) => None,
        }
    }

    /// Raw identity of the evaluator, used as part of the storage key
    pub fn raw_id(&self) -> Uuid {
        match self {
            Self::Instructor(id) => *id.as_uuid(),
            Self::Peer(id) => *id.as_uuid(),
        }
    }

    /// Rebuild an evaluator from its stored role and identity
    pub fn from_parts(role: EvaluatorRole, id: Uuid) -> Self {
        match role {
            EvaluatorRole::Instructor => Self::Instructor(InstructorId::from_uuid(id)),
            EvaluatorRole::Peer => Self::Peer(StudentId::from_uuid(id)),
        }
    }
}

impl std::fmt::Display for Evaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Instructor(id) => write!(f, "instructor:{}", id),
            Self::Peer(id) => write!(f, "peer:{}", id),
        }
    }
}

/// Evaluator role as stored alongside an evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluatorRole {
    Instructor,
    Peer,
}

impl EvaluatorRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Instructor => "instructor",
            Self::Peer => "peer",
        }
    }
}

impl std::str::FromStr for EvaluatorRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "instructor" => Ok(Self::Instructor),
            "peer" => Ok(Self::Peer),
            other => Err(format!("unknown evaluator role: {}", other)),
        }
    }
}

/// The six raw scores of one evaluation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CriterionScores {
    pub subject_mastery: f64,
    pub delivery: f64,
    pub attire: f64,
    pub team_cohesion: f64,
    pub visuals: f64,
    pub overall_impression: f64,
}

impl CriterionScores {
    /// Same score for every criterion
    pub fn uniform(score: f64) -> Self {
        Self {
            subject_mastery: score,
            delivery: score,
            attire: score,
            team_cohesion: score,
            visuals: score,
            overall_impression: score,
        }
    }

    pub fn get(&self, criterion: Criterion) -> f64 {
        match criterion {
            Criterion::SubjectMastery => self.subject_mastery,
            Criterion::Delivery => self.delivery,
            Criterion::Attire => self.attire,
            Criterion::TeamCohesion => self.team_cohesion,
            Criterion::Visuals => self.visuals,
            Criterion::OverallImpression => self.overall_impression,
        }
    }

    pub fn set(&mut self, criterion: Criterion, score: f64) {
        let slot = match criterion {
            Criterion::SubjectMastery => &mut self.subject_mastery,
            Criterion::Delivery => &mut self.delivery,
            Criterion::Attire => &mut self.attire,
            Criterion::TeamCohesion => &mut self.team_cohesion,
            Criterion::Visuals => &mut self.visuals,
            Criterion::OverallImpression => &mut self.overall_impression,
        };
        *slot = score;
    }

    /// Every score multiplied by `k`
    pub fn scaled(&self, k: f64) -> Self {
        Self {
            subject_mastery: self.subject_mastery * k,
            delivery: self.delivery * k,
            attire: self.attire * k,
            team_cohesion: self.team_cohesion * k,
            visuals: self.visuals * k,
            overall_impression: self.overall_impression * k,
        }
    }

    /// (criterion, score) pairs in display order
    pub fn iter(&self) -> impl Iterator<Item = (Criterion, f64)> + '_ {
        Criterion::all().iter().map(move |c| (*c, self.get(*c)))
    }
}

/// One evaluator's scores for one presentation. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub id: EvaluationId,
    pub presentation_id: PresentationId,
    pub evaluator: Evaluator,
    pub scores: CriterionScores,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Evaluation {
    /// Create a new evaluation stamped with the current time
    pub fn new(
        presentation_id: PresentationId,
        evaluator: Evaluator,
        scores: CriterionScores,
        comment: Option<String>,
    ) -> Self {
        Self {
            id: EvaluationId::new(),
            presentation_id,
            evaluator,
            scores,
            comment,
            created_at: Utc::now(),
        }
    }

    pub fn is_by(&self, evaluator: &Evaluator) -> bool {
        self.evaluator == *evaluator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluator_role() {
        let peer = Evaluator::Peer(StudentId::new());
        assert_eq!(peer.role(), EvaluatorRole::Peer);
        assert!(peer.student_id().is_some());

        let instructor = Evaluator::Instructor(InstructorId::new());
        assert_eq!(instructor.role(), EvaluatorRole::Instructor);
        assert!(instructor.student_id().is_none());
    }

    #[test]
    fn test_evaluator_from_parts() {
        let student = StudentId::new();
        let peer = Evaluator::Peer(student);
        let rebuilt = Evaluator::from_parts(peer.role(), peer.raw_id());
        assert_eq!(rebuilt, peer);
    }

    #[test]
    fn test_same_uuid_different_roles_are_distinct() {
        let uuid = Uuid::now_v7();
        let a = Evaluator::Instructor(InstructorId::from_uuid(uuid));
        let b = Evaluator::Peer(StudentId::from_uuid(uuid));
        assert_ne!(a, b);
    }

    #[test]
    fn test_scores_get_set() {
        let mut scores = CriterionScores::uniform(50.0);
        scores.set(Criterion::Visuals, 90.0);
        assert_eq!(scores.get(Criterion::Visuals), 90.0);
        assert_eq!(scores.get(Criterion::Attire), 50.0);
        assert_eq!(scores.iter().count(), 6);
    }

    #[test]
    fn test_evaluator_serialization() {
        let evaluator = Evaluator::Peer(StudentId::new());
        let json = serde_json::to_value(evaluator).unwrap();
        assert_eq!(json["role"], "peer");
    }
}
