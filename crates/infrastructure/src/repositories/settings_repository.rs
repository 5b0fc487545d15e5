//! Settings repository implementation.
//!
//! Stores grading configurations; at most one row is active at a time,
//! enforced by a partial unique index.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use std::collections::BTreeMap;
use tracing::{info, instrument};
use uuid::Uuid;

use peer_grading_application::{ApplicationError, SettingsRepositoryPort};
use peer_grading_domain::{
    criteria::{CriteriaConfig, Criterion, CriterionSetting},
    identifiers::SettingsId,
};

use crate::{database::TransactionExt, Error, Result};

const SELECT_ACTIVE: &str = r#"
    SELECT id, criteria, instructor_weight, peer_weight, active
    FROM grading_settings
    WHERE active
"#;

/// PostgreSQL implementation of SettingsRepositoryPort.
pub struct PgSettingsRepository {
    pool: PgPool,
}

impl PgSettingsRepository {
    /// Create a new PostgreSQL settings repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_active(&self) -> Result<Option<CriteriaConfig>> {
        let row = sqlx::query(SELECT_ACTIVE)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?;

        row.map(row_to_config).transpose()
    }

    async fn insert_default(&self) -> Result<()> {
        let config = CriteriaConfig::default_active();

        // A concurrent caller may have created the active row first
        sqlx::query(
            r#"
            INSERT INTO grading_settings (id, criteria, instructor_weight, peer_weight, active)
            VALUES ($1, $2, $3, $4, TRUE)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(config.id.as_uuid())
        .bind(criteria_to_json(&config)?)
        .bind(config.instructor_weight)
        .bind(config.peer_weight)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(())
    }

    async fn write_active(&self, config: &CriteriaConfig) -> Result<()> {
        let criteria = criteria_to_json(config)?;
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;

        let result = async {
            sqlx::query("UPDATE grading_settings SET active = FALSE WHERE active AND id <> $1")
                .bind(config.id.as_uuid())
                .execute(&mut *tx)
                .await?;

            sqlx::query(
                r#"
                INSERT INTO grading_settings (id, criteria, instructor_weight, peer_weight, active)
                VALUES ($1, $2, $3, $4, TRUE)
                ON CONFLICT (id) DO UPDATE SET
                    criteria = EXCLUDED.criteria,
                    instructor_weight = EXCLUDED.instructor_weight,
                    peer_weight = EXCLUDED.peer_weight,
                    active = TRUE,
                    updated_at = now()
                "#,
            )
            .bind(config.id.as_uuid())
            .bind(&criteria)
            .bind(config.instructor_weight)
            .bind(config.peer_weight)
            .execute(&mut *tx)
            .await?;

            Ok::<(), sqlx::Error>(())
        }
        .await
        .map_err(Error::from_write);

        tx.commit_or_rollback(result).await
    }
}

#[async_trait]
impl SettingsRepositoryPort for PgSettingsRepository {
    #[instrument(skip(self))]
    async fn get_active(&self) -> std::result::Result<Option<CriteriaConfig>, ApplicationError> {
        Ok(self.fetch_active().await?)
    }

    #[instrument(skip(self))]
    async fn get_or_create_default(&self) -> std::result::Result<CriteriaConfig, ApplicationError> {
        if let Some(config) = self.fetch_active().await? {
            return Ok(config);
        }

        self.insert_default().await?;
        info!("Created default grading settings");

        self.fetch_active().await?.ok_or_else(|| {
            ApplicationError::Internal("Active grading settings missing after insert".to_string())
        })
    }

    #[instrument(skip(self, config), fields(settings_id = %config.id))]
    async fn commit(&self, config: &CriteriaConfig) -> std::result::Result<CriteriaConfig, ApplicationError> {
        config.validate()?;

        self.write_active(config).await?;

        let mut committed = config.clone();
        committed.active = true;
        Ok(committed)
    }
}

/// Per-criterion settings keyed by criterion key
fn criteria_to_json(config: &CriteriaConfig) -> Result<serde_json::Value> {
    let settings: BTreeMap<&str, &CriterionSetting> = Criterion::all()
        .iter()
        .map(|c| (c.key(), config.setting(*c)))
        .collect();
    Ok(serde_json::to_value(settings)?)
}

/// Convert a database row to a CriteriaConfig.
fn row_to_config(row: sqlx::postgres::PgRow) -> Result<CriteriaConfig> {
    let criteria_json: serde_json::Value = row.get("criteria");
    let settings: BTreeMap<String, CriterionSetting> = serde_json::from_value(criteria_json)?;

    let mut config = CriteriaConfig::default_active();
    config.id = SettingsId::from(row.get::<Uuid, _>("id"));
    for criterion in Criterion::all() {
        let setting = settings.get(criterion.key()).ok_or_else(|| {
            Error::InvalidData(format!("missing settings for criterion {}", criterion.key()))
        })?;
        config.set_weight(*criterion, setting.weight);
        config.set_label(*criterion, setting.label.clone());
    }
    config.instructor_weight = row.get("instructor_weight");
    config.peer_weight = row.get("peer_weight");
    config.active = row.get("active");

    Ok(config)
}
