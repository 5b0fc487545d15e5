//! Mock implementations for repositories and external services.
//!
//! Provides in-memory implementations of every application port for testing
//! without database dependencies. The evaluation store enforces the same
//! (presentation, role, evaluator) uniqueness as the PostgreSQL schema.

use async_trait::async_trait;
use parking_lot::RwLock;
use peer_grading_application::{
    ApplicationError, DirectoryPort, EvaluationRepositoryPort, EventPublisher, ServiceEvent,
    SettingsRepositoryPort,
};
use peer_grading_domain::{
    criteria::CriteriaConfig,
    directory::{Instructor, Presentation, Student, Team},
    evaluation::Evaluation,
    identifiers::*,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Mock event publisher that records every published event
pub struct MockEventPublisher {
    pub published_events: Arc<RwLock<Vec<ServiceEvent>>>,
}

impl MockEventPublisher {
    pub fn new() -> Self {
        Self {
            published_events: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn get_published_events(&self) -> Vec<ServiceEvent> {
        self.published_events.read().clone()
    }

    pub fn clear(&self) {
        self.published_events.write().clear();
    }

    pub fn event_count(&self) -> usize {
        self.published_events.read().len()
    }
}

impl Default for MockEventPublisher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPublisher for MockEventPublisher {
    async fn publish(&self, event: ServiceEvent) -> Result<(), ApplicationError> {
        self.published_events.write().push(event);
        Ok(())
    }
}

/// In-memory settings store holding at most one active configuration
pub struct InMemorySettingsRepository {
    active: RwLock<Option<CriteriaConfig>>,
    commits: AtomicUsize,
}

impl InMemorySettingsRepository {
    /// Empty store; the default configuration is created on first access
    pub fn new() -> Self {
        Self {
            active: RwLock::new(None),
            commits: AtomicUsize::new(0),
        }
    }

    /// Store seeded with a configuration, which is not re-validated
    pub fn with_config(config: CriteriaConfig) -> Self {
        Self {
            active: RwLock::new(Some(config)),
            commits: AtomicUsize::new(0),
        }
    }

    pub fn commit_count(&self) -> usize {
        self.commits.load(Ordering::SeqCst)
    }
}

impl Default for InMemorySettingsRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SettingsRepositoryPort for InMemorySettingsRepository {
    async fn get_active(&self) -> Result<Option<CriteriaConfig>, ApplicationError> {
        Ok(self.active.read().clone())
    }

    async fn get_or_create_default(&self) -> Result<CriteriaConfig, ApplicationError> {
        let mut active = self.active.write();
        Ok(active
            .get_or_insert_with(CriteriaConfig::default_active)
            .clone())
    }

    async fn commit(&self, config: &CriteriaConfig) -> Result<CriteriaConfig, ApplicationError> {
        config.validate()?;

        let mut committed = config.clone();
        committed.active = true;
        *self.active.write() = Some(committed.clone());
        self.commits.fetch_add(1, Ordering::SeqCst);
        Ok(committed)
    }
}

/// In-memory evaluation store
pub struct InMemoryEvaluationRepository {
    evaluations: RwLock<Vec<Evaluation>>,
    stale_reads: bool,
    insert_failure: RwLock<Option<ApplicationError>>,
}

impl InMemoryEvaluationRepository {
    pub fn new() -> Self {
        Self {
            evaluations: RwLock::new(Vec::new()),
            stale_reads: false,
            insert_failure: RwLock::new(None),
        }
    }

    /// Store whose listings always come back empty, as if every read happened
    /// before a concurrent submission landed. Inserts still enforce uniqueness.
    pub fn with_stale_reads() -> Self {
        Self {
            stale_reads: true,
            ..Self::new()
        }
    }

    /// Make every following insert fail with `error`
    pub fn fail_inserts_with(&self, error: ApplicationError) {
        *self.insert_failure.write() = Some(error);
    }

    /// Insert without the uniqueness check, for seeding test data
    pub fn seed(&self, evaluation: Evaluation) {
        self.evaluations.write().push(evaluation);
    }

    pub fn all(&self) -> Vec<Evaluation> {
        self.evaluations.read().clone()
    }

    pub fn count(&self) -> usize {
        self.evaluations.read().len()
    }
}

impl Default for InMemoryEvaluationRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EvaluationRepositoryPort for InMemoryEvaluationRepository {
    async fn insert(&self, evaluation: &Evaluation) -> Result<(), ApplicationError> {
        if let Some(error) = self.insert_failure.read().clone() {
            return Err(error);
        }

        // Check and insert under one write lock
        let mut evaluations = self.evaluations.write();
        let duplicate = evaluations.iter().any(|existing| {
            existing.presentation_id == evaluation.presentation_id
                && existing.evaluator == evaluation.evaluator
        });
        if duplicate {
            return Err(ApplicationError::Conflict(format!(
                "Evaluation by {} already exists for presentation {}",
                evaluation.evaluator, evaluation.presentation_id
            )));
        }

        evaluations.push(evaluation.clone());
        Ok(())
    }

    async fn list_for_presentation(
        &self,
        presentation_id: PresentationId,
    ) -> Result<Vec<Evaluation>, ApplicationError> {
        if self.stale_reads {
            return Ok(Vec::new());
        }

        let mut evaluations: Vec<Evaluation> = self
            .evaluations
            .read()
            .iter()
            .filter(|e| e.presentation_id == presentation_id)
            .cloned()
            .collect();
        evaluations.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(evaluations)
    }
}

/// In-memory directory of teams, people and presentations.
///
/// Listings preserve insertion order.
pub struct InMemoryDirectory {
    teams: RwLock<Vec<Team>>,
    students: RwLock<Vec<Student>>,
    instructors: RwLock<Vec<Instructor>>,
    presentations: RwLock<Vec<Presentation>>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self {
            teams: RwLock::new(Vec::new()),
            students: RwLock::new(Vec::new()),
            instructors: RwLock::new(Vec::new()),
            presentations: RwLock::new(Vec::new()),
        }
    }

    pub fn add_team(&self, team: Team) {
        self.teams.write().push(team);
    }

    pub fn add_student(&self, student: Student) {
        self.students.write().push(student);
    }

    pub fn add_instructor(&self, instructor: Instructor) {
        self.instructors.write().push(instructor);
    }

    pub fn add_presentation(&self, presentation: Presentation) {
        self.presentations.write().push(presentation);
    }

    pub fn remove_student(&self, id: StudentId) {
        self.students.write().retain(|s| s.id != id);
    }

    pub fn remove_instructor(&self, id: InstructorId) {
        self.instructors.write().retain(|i| i.id != id);
    }
}

impl Default for InMemoryDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DirectoryPort for InMemoryDirectory {
    async fn get_presentation(
        &self,
        id: PresentationId,
    ) -> Result<Option<Presentation>, ApplicationError> {
        Ok(self.presentations.read().iter().find(|p| p.id == id).cloned())
    }

    async fn list_presentations(&self) -> Result<Vec<Presentation>, ApplicationError> {
        Ok(self.presentations.read().clone())
    }

    async fn get_student(&self, id: StudentId) -> Result<Option<Student>, ApplicationError> {
        Ok(self.students.read().iter().find(|s| s.id == id).cloned())
    }

    async fn list_students(&self) -> Result<Vec<Student>, ApplicationError> {
        Ok(self.students.read().clone())
    }

    async fn get_instructor(
        &self,
        id: InstructorId,
    ) -> Result<Option<Instructor>, ApplicationError> {
        Ok(self.instructors.read().iter().find(|i| i.id == id).cloned())
    }

    async fn list_instructors(&self) -> Result<Vec<Instructor>, ApplicationError> {
        Ok(self.instructors.read().clone())
    }

    async fn get_team(&self, id: TeamId) -> Result<Option<Team>, ApplicationError> {
        Ok(self.teams.read().iter().find(|t| t.id == id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use peer_grading_domain::evaluation::{CriterionScores, Evaluator};

    #[tokio::test]
    async fn test_evaluation_store_rejects_duplicates() {
        let repo = InMemoryEvaluationRepository::new();
        let presentation_id = PresentationId::new();
        let evaluator = Evaluator::Peer(StudentId::new());

        let first = Evaluation::new(presentation_id, evaluator, CriterionScores::uniform(70.0), None);
        let second = Evaluation::new(presentation_id, evaluator, CriterionScores::uniform(90.0), None);

        assert!(repo.insert(&first).await.is_ok());
        assert!(matches!(
            repo.insert(&second).await,
            Err(ApplicationError::Conflict(_))
        ));
        assert_eq!(repo.count(), 1);
    }

    #[tokio::test]
    async fn test_settings_default_created_once() {
        let repo = InMemorySettingsRepository::new();
        assert!(repo.get_active().await.unwrap().is_none());

        let first = repo.get_or_create_default().await.unwrap();
        let second = repo.get_or_create_default().await.unwrap();
        assert_eq!(first.id, second.id);
        assert!(repo.get_active().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_mock_event_publisher() {
        let publisher = MockEventPublisher::new();
        publisher
            .publish(ServiceEvent::SettingsUpdated {
                settings_id: SettingsId::new(),
                updated_by: None,
            })
            .await
            .unwrap();
        assert_eq!(publisher.event_count(), 1);

        publisher.clear();
        assert_eq!(publisher.event_count(), 0);
    }
}
