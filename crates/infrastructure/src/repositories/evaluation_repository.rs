//! Evaluation repository implementation.
//!
//! PostgreSQL-backed storage for submitted evaluations. Rows are append-only.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use tracing::{debug, instrument};
use uuid::Uuid;

use peer_grading_application::{ApplicationError, EvaluationRepositoryPort};
use peer_grading_domain::{
    evaluation::{CriterionScores, Evaluation, Evaluator, EvaluatorRole},
    identifiers::{EvaluationId, PresentationId},
};

use crate::{database::TransactionExt, Error, Result};

/// PostgreSQL implementation of EvaluationRepositoryPort.
pub struct PgEvaluationRepository {
    pool: PgPool,
}

impl PgEvaluationRepository {
    /// Create a new PostgreSQL evaluation repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert_row(&self, evaluation: &Evaluation) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;

        let result = sqlx::query(
            r#"
            INSERT INTO evaluations (
                id, presentation_id, evaluator_role, evaluator_id,
                subject_mastery, delivery, attire, team_cohesion, visuals, overall_impression,
                comment, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(evaluation.id.as_uuid())
        .bind(evaluation.presentation_id.as_uuid())
        .bind(evaluation.evaluator.role().as_str())
        .bind(evaluation.evaluator.raw_id())
        .bind(evaluation.scores.subject_mastery)
        .bind(evaluation.scores.delivery)
        .bind(evaluation.scores.attire)
        .bind(evaluation.scores.team_cohesion)
        .bind(evaluation.scores.visuals)
        .bind(evaluation.scores.overall_impression)
        .bind(&evaluation.comment)
        .bind(evaluation.created_at)
        .execute(&mut *tx)
        .await
        .map(|_| ())
        .map_err(Error::from_write);

        tx.commit_or_rollback(result).await
    }

    async fn fetch_for_presentation(&self, presentation_id: PresentationId) -> Result<Vec<Evaluation>> {
        let rows = crate::query_all!(
            &self.pool,
            r#"
            SELECT
                id, presentation_id, evaluator_role, evaluator_id,
                subject_mastery, delivery, attire, team_cohesion, visuals, overall_impression,
                comment, created_at
            FROM evaluations
            WHERE presentation_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
            presentation_id.as_uuid(),
        )?;

        rows.into_iter().map(row_to_evaluation).collect()
    }
}

#[async_trait]
impl EvaluationRepositoryPort for PgEvaluationRepository {
    #[instrument(skip(self, evaluation), fields(
        evaluation_id = %evaluation.id,
        presentation_id = %evaluation.presentation_id,
        evaluator = %evaluation.evaluator
    ))]
    async fn insert(&self, evaluation: &Evaluation) -> std::result::Result<(), ApplicationError> {
        self.insert_row(evaluation).await?;
        debug!("Evaluation stored");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_for_presentation(
        &self,
        presentation_id: PresentationId,
    ) -> std::result::Result<Vec<Evaluation>, ApplicationError> {
        Ok(self.fetch_for_presentation(presentation_id).await?)
    }
}

/// Convert a database row to an Evaluation.
fn row_to_evaluation(row: sqlx::postgres::PgRow) -> Result<Evaluation> {
    let role_str: String = row.get("evaluator_role");
    let role: EvaluatorRole = role_str.parse().map_err(Error::InvalidData)?;

    Ok(Evaluation {
        id: EvaluationId::from(row.get::<Uuid, _>("id")),
        presentation_id: PresentationId::from(row.get::<Uuid, _>("presentation_id")),
        evaluator: Evaluator::from_parts(role, row.get("evaluator_id")),
        scores: CriterionScores {
            subject_mastery: row.get("subject_mastery"),
            delivery: row.get("delivery"),
            attire: row.get("attire"),
            team_cohesion: row.get("team_cohesion"),
            visuals: row.get("visuals"),
            overall_impression: row.get("overall_impression"),
        },
        comment: row.get("comment"),
        created_at: row.get("created_at"),
    })
}
