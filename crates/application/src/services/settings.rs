//! Settings Service
//!
//! Access to the active grading configuration. A missing configuration is not
//! an error: the default one is created on first access.

use super::{EventPublisher, ServiceContext, ServiceEvent};
use crate::validation::{UpdateSettingsRequest, Validatable};
use crate::{ApplicationError, ApplicationResult};
use async_trait::async_trait;
use peer_grading_domain::criteria::{CriteriaConfig, Criterion};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Settings repository trait
#[async_trait]
pub trait SettingsRepositoryPort: Send + Sync {
    /// The active configuration, if one has been stored
    async fn get_active(&self) -> Result<Option<CriteriaConfig>, ApplicationError>;

    /// The active configuration, storing the default one first if none exists
    async fn get_or_create_default(&self) -> Result<CriteriaConfig, ApplicationError>;

    /// Replace the active configuration.
    ///
    /// Must reject a configuration that violates either weight sum with
    /// `ApplicationError::ValidationFailed` and leave the stored one untouched.
    async fn commit(&self, config: &CriteriaConfig) -> Result<CriteriaConfig, ApplicationError>;
}

/// One criterion as shown on an evaluation form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionField {
    pub criterion: Criterion,
    pub key: String,
    pub label: String,
    pub weight: f64,
}

impl CriterionField {
    /// Fields for all six criteria in display order
    pub fn from_config(config: &CriteriaConfig) -> Vec<Self> {
        Criterion::all()
            .iter()
            .map(|c| Self {
                criterion: *c,
                key: c.key().to_string(),
                label: config.label(*c).to_string(),
                weight: config.weight(*c),
            })
            .collect()
    }
}

/// Settings service implementation
pub struct SettingsService<S, E>
where
    S: SettingsRepositoryPort,
    E: EventPublisher,
{
    repository: Arc<S>,
    event_publisher: Arc<E>,
}

impl<S, E> SettingsService<S, E>
where
    S: SettingsRepositoryPort,
    E: EventPublisher,
{
    pub fn new(repository: Arc<S>, event_publisher: Arc<E>) -> Self {
        Self {
            repository,
            event_publisher,
        }
    }

    /// The active configuration
    #[instrument(skip(self))]
    pub async fn active(&self) -> ApplicationResult<CriteriaConfig> {
        self.repository.get_or_create_default().await
    }

    /// Key, label and weight of every criterion
    #[instrument(skip(self))]
    pub async fn criteria_fields(&self) -> ApplicationResult<Vec<CriterionField>> {
        let config = self.active().await?;
        Ok(CriterionField::from_config(&config))
    }

    /// Replace weights and labels of the active configuration
    #[instrument(skip(self, ctx, request), fields(correlation_id = %ctx.correlation_id))]
    pub async fn update(
        &self,
        ctx: &ServiceContext,
        request: UpdateSettingsRequest,
    ) -> ApplicationResult<CriteriaConfig> {
        ctx.require_admin()?;

        request.validate_all().ensure_valid()?;

        let current = self.active().await?;
        let updated = request.apply_to(&current);
        updated.validate()?;

        let committed = self.repository.commit(&updated).await?;

        info!(
            settings_id = %committed.id,
            updated_by = ctx.user_id.as_deref().unwrap_or("anonymous"),
            instructor_weight = committed.instructor_weight,
            peer_weight = committed.peer_weight,
            "Grading settings updated"
        );

        if let Err(err) = self
            .event_publisher
            .publish(ServiceEvent::SettingsUpdated {
                settings_id: committed.id,
                updated_by: ctx.user_id.clone(),
            })
            .await
        {
            warn!(error = %err, "Failed to publish settings event");
        }

        Ok(committed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_criterion_fields_follow_config() {
        let mut config = CriteriaConfig::default_active();
        config.set_label(Criterion::Visuals, Some("Slides".to_string()));

        let fields = CriterionField::from_config(&config);
        assert_eq!(fields.len(), 6);
        assert_eq!(fields[0].key, "subject_mastery");
        assert_eq!(fields[0].weight, 15.0);
        assert_eq!(fields[4].label, "Slides");
        assert_eq!(fields[4].weight, 35.0);
    }
}
