//! Scoring criteria and the weighting configuration applied to them.

use crate::errors::SettingsError;
use crate::identifiers::SettingsId;
use serde::{Deserialize, Serialize};

/// Distance from 100 at which a weight sum is rejected.
///
/// A sum is accepted when it lies strictly inside the band. Summing decimal
/// weights leaves float error around 1e-14, so a total that is exactly 0.01
/// away (99.99, 100.01) is treated as on the boundary and rejected while
/// 99.995 and 99.9900004 are accepted.
pub const WEIGHT_SUM_TOLERANCE: f64 = 0.01;

/// Margin absorbing float summation error at the tolerance boundary
const BOUNDARY_EPSILON: f64 = 1e-9;

/// One of the six dimensions every evaluator scores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    /// Command of the presented subject
    SubjectMastery,
    /// Clarity of the spoken delivery
    Delivery,
    /// Presentation attire
    Attire,
    /// How well the team shares the work on stage
    TeamCohesion,
    /// Slides and other visual material
    Visuals,
    /// The evaluator's overall impression
    OverallImpression,
}

impl Criterion {
    /// All criteria in display order
    pub fn all() -> &'static [Criterion] {
        &[
            Self::SubjectMastery,
            Self::Delivery,
            Self::Attire,
            Self::TeamCohesion,
            Self::Visuals,
            Self::OverallImpression,
        ]
    }

    /// Stable machine-readable key, used for form fields and storage columns
    pub fn key(&self) -> &'static str {
        match self {
            Self::SubjectMastery => "subject_mastery",
            Self::Delivery => "delivery",
            Self::Attire => "attire",
            Self::TeamCohesion => "team_cohesion",
            Self::Visuals => "visuals",
            Self::OverallImpression => "overall_impression",
        }
    }

    /// Label shown when no override is configured
    pub fn default_label(&self) -> &'static str {
        match self {
            Self::SubjectMastery => "Subject Mastery",
            Self::Delivery => "Delivery",
            Self::Attire => "Attire",
            Self::TeamCohesion => "Team Cohesion and Task Sharing",
            Self::Visuals => "Visuals",
            Self::OverallImpression => "Overall Impression",
        }
    }

    /// Weight used when the default configuration is created
    pub fn default_weight(&self) -> f64 {
        match self {
            Self::SubjectMastery => 15.0,
            Self::Delivery => 15.0,
            Self::Attire => 5.0,
            Self::TeamCohesion => 10.0,
            Self::Visuals => 35.0,
            Self::OverallImpression => 20.0,
        }
    }

    fn index(&self) -> usize {
        match self {
            Self::SubjectMastery => 0,
            Self::Delivery => 1,
            Self::Attire => 2,
            Self::TeamCohesion => 3,
            Self::Visuals => 4,
            Self::OverallImpression => 5,
        }
    }
}

impl std::fmt::Display for Criterion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for Criterion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|c| c.key() == s)
            .ok_or_else(|| format!("unknown criterion: {}", s))
    }
}

/// Weight and optional label override for one criterion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionSetting {
    /// Percentage of the sub-score this criterion contributes (0-100)
    pub weight: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// The active grading configuration.
///
/// Holds the six criterion weights and the instructor/peer blend. Both groups
/// must sum to 100 (within [`WEIGHT_SUM_TOLERANCE`]) whenever the
/// configuration is committed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriteriaConfig {
    pub id: SettingsId,
    criteria: [CriterionSetting; 6],
    /// Share of the final grade taken from the instructor sub-score
    pub instructor_weight: f64,
    /// Share of the final grade taken from the peer average
    pub peer_weight: f64,
    pub active: bool,
}

impl CriteriaConfig {
    /// Default configuration: 15/15/5/10/35/20 criteria, 60/40 instructor/peer
    pub fn default_active() -> Self {
        Self {
            id: SettingsId::new(),
            criteria: std::array::from_fn(|i| CriterionSetting {
                weight: Criterion::all()[i].default_weight(),
                label: None,
            }),
            instructor_weight: 60.0,
            peer_weight: 40.0,
            active: true,
        }
    }

    /// Weight of a criterion as a percentage
    pub fn weight(&self, criterion: Criterion) -> f64 {
        self.criteria[criterion.index()].weight
    }

    /// Display label, falling back to the default when no override is set
    pub fn label(&self, criterion: Criterion) -> &str {
        match self.criteria[criterion.index()].label.as_deref() {
            Some(label) if !label.trim().is_empty() => label,
            _ => criterion.default_label(),
        }
    }

    /// Raw setting for a criterion
    pub fn setting(&self, criterion: Criterion) -> &CriterionSetting {
        &self.criteria[criterion.index()]
    }

    pub fn set_weight(&mut self, criterion: Criterion, weight: f64) {
        self.criteria[criterion.index()].weight = weight;
    }

    pub fn set_label(&mut self, criterion: Criterion, label: Option<String>) {
        self.criteria[criterion.index()].label = label;
    }

    /// Sum of the six criterion weights
    pub fn criteria_total(&self) -> f64 {
        self.criteria.iter().map(|s| s.weight).sum()
    }

    /// Sum of the instructor and peer weights
    pub fn blend_total(&self) -> f64 {
        self.instructor_weight + self.peer_weight
    }

    /// Check both sum invariants, criteria first
    pub fn validate(&self) -> Result<(), SettingsError> {
        let criteria_total = self.criteria_total();
        if !within_tolerance(criteria_total) {
            return Err(SettingsError::CriteriaWeightSum {
                total: criteria_total,
            });
        }

        let blend_total = self.blend_total();
        if !within_tolerance(blend_total) {
            return Err(SettingsError::BlendWeightSum { total: blend_total });
        }

        Ok(())
    }
}

impl Default for CriteriaConfig {
    fn default() -> Self {
        Self::default_active()
    }
}

fn within_tolerance(total: f64) -> bool {
    if !total.is_finite() {
        return false;
    }
    (total - 100.0).abs() < WEIGHT_SUM_TOLERANCE - BOUNDARY_EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights() {
        let config = CriteriaConfig::default_active();
        assert_eq!(config.weight(Criterion::SubjectMastery), 15.0);
        assert_eq!(config.weight(Criterion::Delivery), 15.0);
        assert_eq!(config.weight(Criterion::Attire), 5.0);
        assert_eq!(config.weight(Criterion::TeamCohesion), 10.0);
        assert_eq!(config.weight(Criterion::Visuals), 35.0);
        assert_eq!(config.weight(Criterion::OverallImpression), 20.0);
        assert_eq!(config.instructor_weight, 60.0);
        assert_eq!(config.peer_weight, 40.0);
        assert!(config.active);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_label_fallback() {
        let mut config = CriteriaConfig::default_active();
        assert_eq!(config.label(Criterion::Visuals), "Visuals");

        config.set_label(Criterion::Visuals, Some("Slides".to_string()));
        assert_eq!(config.label(Criterion::Visuals), "Slides");

        config.set_label(Criterion::Visuals, Some("   ".to_string()));
        assert_eq!(config.label(Criterion::Visuals), "Visuals");
    }

    #[test]
    fn test_criteria_sum_violation_reports_total() {
        let mut config = CriteriaConfig::default_active();
        config.set_weight(Criterion::Attire, 10.0);

        match config.validate() {
            Err(SettingsError::CriteriaWeightSum { total }) => assert_eq!(total, 105.0),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_blend_sum_violation_reports_total() {
        let mut config = CriteriaConfig::default_active();
        config.peer_weight = 30.0;

        match config.validate() {
            Err(SettingsError::BlendWeightSum { total }) => assert_eq!(total, 90.0),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_criterion_key_round_trip() {
        for criterion in Criterion::all() {
            let parsed: Criterion = criterion.key().parse().unwrap();
            assert_eq!(parsed, *criterion);
        }
        assert!("posture".parse::<Criterion>().is_err());
    }

    #[test]
    fn test_nan_weight_is_rejected() {
        let mut config = CriteriaConfig::default_active();
        config.set_weight(Criterion::Delivery, f64::NAN);
        assert!(config.validate().is_err());
    }
}
