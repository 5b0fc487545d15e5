//! Grading settings validation rules

use super::{Validatable, ValidationResult, ValidationRules};
use peer_grading_domain::criteria::{CriteriaConfig, Criterion};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Replace the weights and labels of the active configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateSettingsRequest {
    /// Weight per criterion; all six are required
    pub weights: BTreeMap<Criterion, f64>,
    /// Label overrides; a blank label restores the default
    #[serde(default)]
    pub labels: BTreeMap<Criterion, String>,
    pub instructor_weight: f64,
    pub peer_weight: f64,
}

impl UpdateSettingsRequest {
    pub const MAX_LABEL_LENGTH: usize = 100;

    /// Request that reproduces the given configuration
    pub fn from_config(config: &CriteriaConfig) -> Self {
        let weights = Criterion::all()
            .iter()
            .map(|c| (*c, config.weight(*c)))
            .collect();
        let labels = Criterion::all()
            .iter()
            .filter_map(|c| config.setting(*c).label.clone().map(|l| (*c, l)))
            .collect();

        Self {
            weights,
            labels,
            instructor_weight: config.instructor_weight,
            peer_weight: config.peer_weight,
        }
    }

    pub fn with_weight(mut self, criterion: Criterion, weight: f64) -> Self {
        self.weights.insert(criterion, weight);
        self
    }

    pub fn with_label(mut self, criterion: Criterion, label: impl Into<String>) -> Self {
        self.labels.insert(criterion, label.into());
        self
    }

    /// Copy of `base` with this request applied. Does not validate.
    pub fn apply_to(&self, base: &CriteriaConfig) -> CriteriaConfig {
        let mut config = base.clone();

        for (criterion, weight) in &self.weights {
            config.set_weight(*criterion, *weight);
        }

        for criterion in Criterion::all() {
            let label = self
                .labels
                .get(criterion)
                .map(|l| l.trim())
                .filter(|l| !l.is_empty())
                .map(str::to_string);
            config.set_label(*criterion, label);
        }

        config.instructor_weight = self.instructor_weight;
        config.peer_weight = self.peer_weight;
        config
    }
}

impl Validatable for UpdateSettingsRequest {
    fn validate_all(&self) -> ValidationResult {
        let mut result = ValidationResult::success();

        for criterion in Criterion::all() {
            let field = format!("weights.{}", criterion.key());
            match self.weights.get(criterion) {
                None => result.add_field_error(
                    field,
                    format!("Weight for {} is required", criterion.key()),
                ),
                Some(weight) => {
                    result.merge(ValidationRules::validate_score(*weight, &field, 0.0, 100.0))
                }
            }
        }

        for (criterion, label) in &self.labels {
            result.merge(ValidationRules::validate_length(
                label,
                &format!("labels.{}", criterion.key()),
                None,
                Some(Self::MAX_LABEL_LENGTH),
            ));
        }

        result.merge(ValidationRules::validate_score(
            self.instructor_weight,
            "instructor_weight",
            0.0,
            100.0,
        ));
        result.merge(ValidationRules::validate_score(
            self.peer_weight,
            "peer_weight",
            0.0,
            100.0,
        ));

        // Sum checks only make sense once every weight is present and numeric
        if result.valid {
            if let Err(err) = self.apply_to(&CriteriaConfig::default_active()).validate() {
                result.add_object_error(err.to_string());
            }
        }

        result
    }
}
