//! Fluent builder pattern for constructing test data.
//!
//! This module provides builder structs for evaluations, presentations,
//! students and submission requests with a fluent API for customization.

use chrono::{DateTime, Duration, Utc};
use peer_grading_application::{ScoreInput, SubmitEvaluationRequest};
use peer_grading_domain::{
    criteria::{CriteriaConfig, Criterion},
    directory::{Presentation, Student},
    evaluation::{CriterionScores, Evaluation, Evaluator},
    identifiers::*,
};

/// Builder for creating Evaluation test instances
#[derive(Clone)]
pub struct EvaluationBuilder {
    id: EvaluationId,
    presentation_id: PresentationId,
    evaluator: Evaluator,
    scores: CriterionScores,
    comment: Option<String>,
    created_at: DateTime<Utc>,
}

impl EvaluationBuilder {
    /// Peer evaluation by a fresh student, all criteria scored 75
    pub fn new(presentation_id: PresentationId) -> Self {
        Self {
            id: EvaluationId::new(),
            presentation_id,
            evaluator: Evaluator::Peer(StudentId::new()),
            scores: CriterionScores::uniform(75.0),
            comment: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_id(mut self, id: EvaluationId) -> Self {
        self.id = id;
        self
    }

    pub fn by_peer(mut self, student_id: StudentId) -> Self {
        self.evaluator = Evaluator::Peer(student_id);
        self
    }

    pub fn by_instructor(mut self, instructor_id: InstructorId) -> Self {
        self.evaluator = Evaluator::Instructor(instructor_id);
        self
    }

    pub fn with_uniform_score(mut self, score: f64) -> Self {
        self.scores = CriterionScores::uniform(score);
        self
    }

    pub fn with_score(mut self, criterion: Criterion, score: f64) -> Self {
        self.scores.set(criterion, score);
        self
    }

    pub fn with_scores(mut self, scores: CriterionScores) -> Self {
        self.scores = scores;
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Stamp the evaluation `minutes` before now
    pub fn minutes_ago(self, minutes: i64) -> Self {
        self.created_at(Utc::now() - Duration::minutes(minutes))
    }

    pub fn build(self) -> Evaluation {
        Evaluation {
            id: self.id,
            presentation_id: self.presentation_id,
            evaluator: self.evaluator,
            scores: self.scores,
            comment: self.comment,
            created_at: self.created_at,
        }
    }
}

/// Builder for creating Presentation test instances
#[derive(Clone)]
pub struct PresentationBuilder {
    id: PresentationId,
    title: String,
    description: Option<String>,
    scheduled_at: DateTime<Utc>,
    team_id: TeamId,
}

impl PresentationBuilder {
    pub fn new(team_id: TeamId) -> Self {
        Self {
            id: PresentationId::new(),
            title: "Test Presentation".to_string(),
            description: None,
            scheduled_at: Utc::now(),
            team_id,
        }
    }

    pub fn with_id(mut self, id: PresentationId) -> Self {
        self.id = id;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn scheduled_at(mut self, scheduled_at: DateTime<Utc>) -> Self {
        self.scheduled_at = scheduled_at;
        self
    }

    /// Schedule the presentation `days` from now; negative values lie in the past
    pub fn in_days(self, days: i64) -> Self {
        self.scheduled_at(Utc::now() + Duration::days(days))
    }

    pub fn build(self) -> Presentation {
        Presentation {
            id: self.id,
            title: self.title,
            description: self.description,
            scheduled_at: self.scheduled_at,
            team_id: self.team_id,
        }
    }
}

/// Builder for creating Student test instances
#[derive(Clone)]
pub struct StudentBuilder {
    id: StudentId,
    first_name: String,
    last_name: String,
    student_number: String,
    team_id: Option<TeamId>,
}

impl StudentBuilder {
    pub fn new() -> Self {
        let id = StudentId::new();
        Self {
            id,
            first_name: "Test".to_string(),
            last_name: "Student".to_string(),
            student_number: crate::fixtures::next_student_number(),
            team_id: None,
        }
    }

    pub fn with_id(mut self, id: StudentId) -> Self {
        self.id = id;
        self
    }

    pub fn with_name(mut self, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        self.first_name = first_name.into();
        self.last_name = last_name.into();
        self
    }

    pub fn with_student_number(mut self, student_number: impl Into<String>) -> Self {
        self.student_number = student_number.into();
        self
    }

    pub fn on_team(mut self, team_id: TeamId) -> Self {
        self.team_id = Some(team_id);
        self
    }

    pub fn build(self) -> Student {
        Student {
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
            student_number: self.student_number,
            team_id: self.team_id,
        }
    }
}

impl Default for StudentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for creating SubmitEvaluationRequest test instances
#[derive(Clone)]
pub struct SubmitRequestBuilder {
    presentation_id: PresentationId,
    evaluator: Evaluator,
    scores: ScoreInput,
    comment: Option<String>,
}

impl SubmitRequestBuilder {
    /// Request with every criterion scored 80
    pub fn new(presentation_id: PresentationId, evaluator: Evaluator) -> Self {
        Self {
            presentation_id,
            evaluator,
            scores: ScoreInput::from(CriterionScores::uniform(80.0)),
            comment: None,
        }
    }

    pub fn with_uniform_score(mut self, score: f64) -> Self {
        self.scores = ScoreInput::from(CriterionScores::uniform(score));
        self
    }

    pub fn with_score(mut self, criterion: Criterion, score: f64) -> Self {
        self.scores = self.scores.with(criterion, Some(score));
        self
    }

    pub fn without_score(mut self, criterion: Criterion) -> Self {
        self.scores = self.scores.with(criterion, None);
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn build(self) -> SubmitEvaluationRequest {
        SubmitEvaluationRequest {
            presentation_id: self.presentation_id,
            evaluator: self.evaluator,
            scores: self.scores,
            comment: self.comment,
        }
    }
}

/// Builder for grading configurations.
///
/// Unlike the engine builder this one does not validate, so tests can store
/// configurations that break the weight sums.
#[derive(Clone)]
pub struct CriteriaConfigBuilder {
    config: CriteriaConfig,
}

impl CriteriaConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: CriteriaConfig::default_active(),
        }
    }

    pub fn with_weight(mut self, criterion: Criterion, weight: f64) -> Self {
        self.config.set_weight(criterion, weight);
        self
    }

    pub fn with_label(mut self, criterion: Criterion, label: impl Into<String>) -> Self {
        self.config.set_label(criterion, Some(label.into()));
        self
    }

    pub fn with_blend(mut self, instructor_weight: f64, peer_weight: f64) -> Self {
        self.config.instructor_weight = instructor_weight;
        self.config.peer_weight = peer_weight;
        self
    }

    pub fn build(self) -> CriteriaConfig {
        self.config
    }
}

impl Default for CriteriaConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
