//! Tests for grading configuration invariants
//!
//! Covers the weight-sum tolerance boundary and label handling.

use peer_grading_domain::{
    errors::SettingsError,
    CriteriaConfig, Criterion,
};
use proptest::prelude::*;

fn config_with_visuals(weight: f64) -> CriteriaConfig {
    let mut config = CriteriaConfig::default_active();
    config.set_weight(Criterion::Visuals, weight);
    config
}

// ============================================================================
// Weight Sum Boundary Tests
// ============================================================================

#[test]
fn test_criteria_sum_just_below_tolerance_is_rejected() {
    // 15 + 15 + 5 + 10 + 34.99 + 20 = 99.99
    let config = config_with_visuals(34.99);
    assert!(matches!(
        config.validate(),
        Err(SettingsError::CriteriaWeightSum { .. })
    ));
}

#[test]
fn test_criteria_sum_above_tolerance_is_rejected() {
    let config = config_with_visuals(35.02);
    assert!(matches!(
        config.validate(),
        Err(SettingsError::CriteriaWeightSum { .. })
    ));
}

#[test]
fn test_criteria_sum_within_tolerance_is_accepted() {
    for weight in [34.995, 34.999, 35.0, 35.001, 35.005] {
        let config = config_with_visuals(weight);
        assert!(
            config.validate().is_ok(),
            "weight {} should be accepted",
            weight
        );
    }
}

#[test]
fn test_criteria_sum_just_inside_tolerance_is_accepted() {
    // Totals 99.9900004 and 100.0099996
    for weight in [34.9900004, 35.0099996] {
        let config = config_with_visuals(weight);
        assert!(
            config.validate().is_ok(),
            "weight {} should be accepted",
            weight
        );
    }
}

#[test]
fn test_criteria_sum_on_upper_boundary_is_rejected() {
    // 100.01, whatever side the float sum lands on
    let mut config = CriteriaConfig::default_active();
    config.set_weight(Criterion::SubjectMastery, 15.01);
    assert!(matches!(
        config.validate(),
        Err(SettingsError::CriteriaWeightSum { .. })
    ));
}

#[test]
fn test_blend_sum_boundary() {
    let mut config = CriteriaConfig::default_active();

    config.instructor_weight = 59.99;
    assert!(matches!(
        config.validate(),
        Err(SettingsError::BlendWeightSum { .. })
    ));

    config.instructor_weight = 60.005;
    assert!(config.validate().is_ok());

    config.instructor_weight = 59.9900004;
    assert!(config.validate().is_ok());
}

#[test]
fn test_criteria_sum_checked_before_blend_sum() {
    let mut config = config_with_visuals(0.0);
    config.peer_weight = 0.0;

    match config.validate() {
        Err(SettingsError::CriteriaWeightSum { total }) => assert_eq!(total, 65.0),
        other => panic!("expected criteria sum error, got {:?}", other),
    }
}

// ============================================================================
// Label Tests
// ============================================================================

#[test]
fn test_every_criterion_has_default_label() {
    let config = CriteriaConfig::default_active();
    for criterion in Criterion::all() {
        assert_eq!(config.label(*criterion), criterion.default_label());
        assert!(!config.label(*criterion).is_empty());
    }
    assert_eq!(
        config.label(Criterion::TeamCohesion),
        "Team Cohesion and Task Sharing"
    );
}

#[test]
fn test_config_serialization_preserves_overrides() {
    let mut config = CriteriaConfig::default_active();
    config.set_label(Criterion::Attire, Some("Dress Code".to_string()));

    let json = serde_json::to_string(&config).unwrap();
    let restored: CriteriaConfig = serde_json::from_str(&json).unwrap();

    assert_eq!(restored, config);
    assert_eq!(restored.label(Criterion::Attire), "Dress Code");
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #[test]
    fn prop_moving_weight_between_criteria_keeps_config_valid(delta in 0.0f64..15.0) {
        let mut config = CriteriaConfig::default_active();
        config.set_weight(Criterion::Delivery, 15.0 - delta);
        config.set_weight(Criterion::Visuals, 35.0 + delta);
        prop_assert!(config.validate().is_ok());
    }

    #[test]
    fn prop_large_deviation_is_always_rejected(deviation in 0.02f64..50.0) {
        let config = config_with_visuals(35.0 + deviation);
        prop_assert!(config.validate().is_err());
    }
}
