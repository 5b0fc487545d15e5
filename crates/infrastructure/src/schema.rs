//! Grading schema.
//!
//! Idempotent DDL for the record store. The compound key on `evaluations` is
//! what finally enforces one evaluation per evaluator and presentation; the
//! application only pre-checks it.

use sqlx::PgPool;
use tracing::{info, instrument};

use crate::{Error, Result};

/// Name of the compound unique key on evaluations
pub const EVALUATION_UNIQUE_KEY: &str = "evaluations_one_per_evaluator";

const STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS teams (
        id UUID PRIMARY KEY,
        name TEXT NOT NULL UNIQUE,
        description TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS students (
        id UUID PRIMARY KEY,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        student_number TEXT NOT NULL UNIQUE,
        team_id UUID REFERENCES teams (id) ON DELETE SET NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS instructors (
        id UUID PRIMARY KEY,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        title TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS presentations (
        id UUID PRIMARY KEY,
        title TEXT NOT NULL,
        description TEXT,
        scheduled_at TIMESTAMPTZ NOT NULL,
        team_id UUID NOT NULL REFERENCES teams (id) ON DELETE CASCADE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS grading_settings (
        id UUID PRIMARY KEY,
        criteria JSONB NOT NULL,
        instructor_weight DOUBLE PRECISION NOT NULL,
        peer_weight DOUBLE PRECISION NOT NULL,
        active BOOLEAN NOT NULL DEFAULT FALSE,
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    r#"
    CREATE UNIQUE INDEX IF NOT EXISTS grading_settings_single_active
        ON grading_settings (active) WHERE active
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS evaluations (
        id UUID PRIMARY KEY,
        presentation_id UUID NOT NULL REFERENCES presentations (id) ON DELETE CASCADE,
        evaluator_role TEXT NOT NULL CHECK (evaluator_role IN ('instructor', 'peer')),
        evaluator_id UUID NOT NULL,
        subject_mastery DOUBLE PRECISION NOT NULL,
        delivery DOUBLE PRECISION NOT NULL,
        attire DOUBLE PRECISION NOT NULL,
        team_cohesion DOUBLE PRECISION NOT NULL,
        visuals DOUBLE PRECISION NOT NULL,
        overall_impression DOUBLE PRECISION NOT NULL,
        comment TEXT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        CONSTRAINT evaluations_one_per_evaluator
            UNIQUE (presentation_id, evaluator_role, evaluator_id)
    )
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS evaluations_presentation_created
        ON evaluations (presentation_id, created_at DESC)
    "#,
];

/// Create every grading table and index that does not exist yet
#[instrument(skip(pool))]
pub async fn apply_schema(pool: &PgPool) -> Result<()> {
    let mut tx = pool.begin().await.map_err(Error::Database)?;
    for statement in STATEMENTS {
        sqlx::query(statement)
            .execute(&mut *tx)
            .await
            .map_err(Error::Database)?;
    }
    tx.commit().await.map_err(Error::Database)?;

    info!(statements = STATEMENTS.len(), "Grading schema applied");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluation_key_is_declared() {
        let evaluations = STATEMENTS
            .iter()
            .find(|s| s.contains("CREATE TABLE IF NOT EXISTS evaluations"))
            .unwrap();
        assert!(evaluations.contains(EVALUATION_UNIQUE_KEY));
        assert!(evaluations.contains("UNIQUE (presentation_id, evaluator_role, evaluator_id)"));
        assert!(evaluations.contains("ON DELETE CASCADE"));
    }
}
