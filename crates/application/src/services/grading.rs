//! Grading Service
//!
//! Read-side views over presentations: final grades, the per-presentation
//! evaluation list and the data needed to render an evaluation form. The
//! active configuration is fetched once per call and threaded through the
//! engines, so a settings change applies to every grade on the next read.

use super::{CriterionField, DirectoryPort, EvaluationRepositoryPort, SettingsRepositoryPort};
use crate::eligibility::EligibilityGuard;
use crate::scoring::{AggregationEngine, CriterionContribution};
use crate::ApplicationResult;
use peer_grading_domain::directory::{Instructor, Presentation, Student, Team};
use peer_grading_domain::errors::DirectoryError;
use peer_grading_domain::evaluation::{Evaluation, Evaluator, EvaluatorRole};
use peer_grading_domain::grading::FinalGradeInfo;
use peer_grading_domain::identifiers::{InstructorId, PresentationId, StudentId};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Shown when an evaluator no longer exists in the directory
pub const UNKNOWN_EVALUATOR: &str = "Unknown";

/// One evaluation with its evaluator's name and weighted sub-score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationView {
    pub evaluation: Evaluation,
    pub evaluator_name: String,
    pub role: EvaluatorRole,
    pub subscore: f64,
    /// What each criterion added to the sub-score, in display order
    pub breakdown: Vec<CriterionContribution>,
}

/// A presentation with its grade and every evaluation, newest first
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PresentationDetail {
    pub presentation: Presentation,
    pub team: Option<Team>,
    pub grade: FinalGradeInfo,
    pub evaluations: Vec<EvaluationView>,
}

/// A row of the presentation board
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PresentationSummary {
    pub presentation: Presentation,
    pub team_name: Option<String>,
    pub grade: FinalGradeInfo,
}

/// Everything needed to render an evaluation form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationForm {
    pub presentation: Presentation,
    /// Students who may still evaluate this presentation
    pub candidates: Vec<Student>,
    pub instructors: Vec<Instructor>,
    pub criteria: Vec<CriterionField>,
}

/// Grading service implementation
pub struct GradingService<S, R, D>
where
    S: SettingsRepositoryPort,
    R: EvaluationRepositoryPort,
    D: DirectoryPort,
{
    settings: Arc<S>,
    evaluations: Arc<R>,
    directory: Arc<D>,
    guard: EligibilityGuard,
}

impl<S, R, D> GradingService<S, R, D>
where
    S: SettingsRepositoryPort,
    R: EvaluationRepositoryPort,
    D: DirectoryPort,
{
    pub fn new(settings: Arc<S>, evaluations: Arc<R>, directory: Arc<D>) -> Self {
        Self {
            settings,
            evaluations,
            directory,
            guard: EligibilityGuard::new(),
        }
    }

    async fn engine(&self) -> ApplicationResult<AggregationEngine> {
        let config = self.settings.get_or_create_default().await?;
        Ok(AggregationEngine::new(config))
    }

    async fn require_presentation(&self, id: PresentationId) -> ApplicationResult<Presentation> {
        self.directory
            .get_presentation(id)
            .await?
            .ok_or_else(|| DirectoryError::PresentationNotFound(id).into())
    }

    /// Final grade of one presentation
    #[instrument(skip(self))]
    pub async fn final_grade(&self, presentation_id: PresentationId) -> ApplicationResult<FinalGradeInfo> {
        let presentation = self.require_presentation(presentation_id).await?;
        let engine = self.engine().await?;
        let evaluations = self.evaluations.list_for_presentation(presentation.id).await?;
        Ok(engine.final_grade(&evaluations))
    }

    /// Presentation, its grade and every evaluation newest first
    #[instrument(skip(self))]
    pub async fn presentation_detail(
        &self,
        presentation_id: PresentationId,
    ) -> ApplicationResult<PresentationDetail> {
        let presentation = self.require_presentation(presentation_id).await?;
        let engine = self.engine().await?;
        let evaluations = self.evaluations.list_for_presentation(presentation.id).await?;
        let team = self.directory.get_team(presentation.team_id).await?;

        let names = self.evaluator_names().await?;
        let views = evaluations
            .iter()
            .map(|evaluation| EvaluationView {
                evaluator_name: names.name_of(&evaluation.evaluator),
                role: evaluation.evaluator.role(),
                subscore: engine.scoring().weighted_subscore(evaluation),
                breakdown: engine.scoring().breakdown(&evaluation.scores),
                evaluation: evaluation.clone(),
            })
            .collect();

        Ok(PresentationDetail {
            grade: engine.final_grade(&evaluations),
            presentation,
            team,
            evaluations: views,
        })
    }

    /// All presentations, latest scheduled first, each with its grade
    #[instrument(skip(self))]
    pub async fn presentation_board(&self) -> ApplicationResult<Vec<PresentationSummary>> {
        let engine = self.engine().await?;
        let mut presentations = self.directory.list_presentations().await?;
        presentations.sort_by(|a, b| b.scheduled_at.cmp(&a.scheduled_at));

        let mut team_names = HashMap::new();
        let mut board = Vec::with_capacity(presentations.len());

        for presentation in presentations {
            if !team_names.contains_key(&presentation.team_id) {
                let name = self
                    .directory
                    .get_team(presentation.team_id)
                    .await?
                    .map(|team| team.name);
                team_names.insert(presentation.team_id, name);
            }

            let evaluations = self.evaluations.list_for_presentation(presentation.id).await?;
            board.push(PresentationSummary {
                team_name: team_names.get(&presentation.team_id).cloned().flatten(),
                grade: engine.final_grade(&evaluations),
                presentation,
            });
        }

        debug!(presentations = board.len(), "Built presentation board");
        Ok(board)
    }

    /// Candidate peers, instructors and criteria for an evaluation form
    #[instrument(skip(self))]
    pub async fn evaluation_form(
        &self,
        presentation_id: PresentationId,
    ) -> ApplicationResult<EvaluationForm> {
        let presentation = self.require_presentation(presentation_id).await?;
        let config = self.settings.get_or_create_default().await?;
        let evaluations = self.evaluations.list_for_presentation(presentation.id).await?;
        let students = self.directory.list_students().await?;

        let pool = self
            .guard
            .candidate_peer_pool(&presentation, &students, &evaluations);
        let candidates = students
            .into_iter()
            .filter(|student| pool.contains(&student.id))
            .collect();

        Ok(EvaluationForm {
            presentation,
            candidates,
            instructors: self.directory.list_instructors().await?,
            criteria: CriterionField::from_config(&config),
        })
    }

    async fn evaluator_names(&self) -> ApplicationResult<EvaluatorNames> {
        let students = self
            .directory
            .list_students()
            .await?
            .into_iter()
            .map(|s| (s.id, s.full_name()))
            .collect();
        let instructors = self
            .directory
            .list_instructors()
            .await?
            .into_iter()
            .map(|i| (i.id, i.full_name()))
            .collect();

        Ok(EvaluatorNames {
            students,
            instructors,
        })
    }
}

struct EvaluatorNames {
    students: HashMap<StudentId, String>,
    instructors: HashMap<InstructorId, String>,
}

impl EvaluatorNames {
    fn name_of(&self, evaluator: &Evaluator) -> String {
        let name = match evaluator {
            Evaluator::Peer(id) => self.students.get(id),
            Evaluator::Instructor(id) => self.instructors.get(id),
        };
        name.cloned()
            .unwrap_or_else(|| UNKNOWN_EVALUATOR.to_string())
    }
}
