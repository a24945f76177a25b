//! Tests for analysis configuration

use super::*;

// =============================================================================
// TEST GROUP 1: Thresholds
// =============================================================================

#[test]
fn test_default_display_threshold() {
    let config = SybilConfig::default();
    assert_eq!(config.block_threshold(), 50.0);
    assert_eq!(config.display_threshold(), 5.0);
}

#[test]
fn test_block_threshold_clamped_to_minimum() {
    let mut config = SybilConfig::default();
    config.report.block_threshold = 3.0;
    config.report.min_display_points = 20.0;

    assert_eq!(config.block_threshold(), MIN_BLOCK_POINTS);
    assert_eq!(config.display_threshold(), MIN_BLOCK_POINTS);
}

// =============================================================================
// TEST GROUP 2: Validation
// =============================================================================

#[test]
fn test_default_and_testing_configs_are_valid() {
    assert!(SybilConfig::default().validate().is_ok());
    assert!(SybilConfig::for_testing().validate().is_ok());
}

#[test]
fn test_zero_rotation_period_rejected() {
    let mut config = SybilConfig::default();
    config.rotation.period_secs = 0;
    assert!(matches!(config.validate(), Err(AnalysisError::Config(_))));
}

#[test]
fn test_negative_penalty_rejected() {
    let mut config = SybilConfig::default();
    config.clusters.same_24 = -1.0;
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("same_24"));
}

#[test]
fn test_threshold_outside_keyspace_rejected() {
    let mut config = SybilConfig::default();
    config.proximity.min_close = 300.0;
    assert!(config.validate().is_err());

    config.proximity.min_close = f64::NAN;
    assert!(config.validate().is_err());
}

#[test]
fn test_tiny_group_minimum_rejected() {
    let mut config = SybilConfig::default();
    config.clusters.min_group_16 = 1;
    assert!(config.validate().is_err());
}

#[test]
fn test_zero_lookup_divisor_rejected() {
    let mut config = SybilConfig::default();
    config.profile.lookup_fail_divisor = 0.0;
    assert!(config.validate().is_err());
}
