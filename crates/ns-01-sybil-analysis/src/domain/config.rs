//! Analysis configuration.
//!
//! One explicitly constructed value carries every weight, threshold and
//! exemption used by a run. Nothing is read from global state.

use serde::{Deserialize, Serialize};

use super::clusters::ClusterWeights;
use super::profile::ProfileConfig;
use super::proximity::ProximityConfig;
use super::routing_key::RotationSchedule;
use super::AnalysisError;

/// Lowest block threshold accepted; anything smaller is raised to this.
pub const MIN_BLOCK_POINTS: f64 = 12.01;

/// Report presentation thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Score at which an operator would consider blocking a router.
    pub block_threshold: f64,
    /// Scores below this are left out of the visible list.
    pub min_display_points: f64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            block_threshold: 50.0,
            min_display_points: 5.0,
        }
    }
}

/// Complete Sybil analysis configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SybilConfig {
    /// Address and family clustering.
    pub clusters: ClusterWeights,
    /// Keyspace proximity.
    pub proximity: ProximityConfig,
    /// Profile and descriptor signals.
    pub profile: ProfileConfig,
    /// Routing key rotation.
    #[serde(rename = "routing")]
    pub rotation: RotationSchedule,
    /// Report thresholds.
    pub report: ReportConfig,
    /// Feed every known router, not only floodfills, to the address,
    /// family and version heuristics.
    pub analyze_all_routers: bool,
}

impl SybilConfig {
    /// Small, fast configuration for tests.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn for_testing() -> Self {
        Self {
            proximity: ProximityConfig {
                baseline_samples: 16,
                baseline_seed: 42,
                ..ProximityConfig::default()
            },
            ..Self::default()
        }
    }

    /// Block threshold after clamping to [`MIN_BLOCK_POINTS`].
    pub fn block_threshold(&self) -> f64 {
        self.report.block_threshold.max(MIN_BLOCK_POINTS)
    }

    /// Lowest total shown in the visible threat list.
    pub fn display_threshold(&self) -> f64 {
        self.block_threshold().min(self.report.min_display_points)
    }

    /// Reject values no analysis could run with.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        self.rotation.validate()?;

        for (name, value) in self.clusters.penalties() {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(format!("clusters.{name} must be a non-negative number")));
            }
        }
        if !self.clusters.our_family.is_finite() {
            return Err(invalid("clusters.our_family must be finite"));
        }
        if self.clusters.min_group_16 < 2 || self.clusters.min_group_48 < 2 {
            return Err(invalid("cluster minimum group sizes must be at least 2"));
        }

        let p = &self.proximity;
        if !(p.min_close > 0.0 && p.min_close <= 256.0) {
            return Err(invalid(format!(
                "proximity.min_close {} must be in (0, 256]",
                p.min_close
            )));
        }
        if !p.pair_distance_factor.is_finite() || p.pair_distance_factor < 0.0 {
            return Err(invalid("proximity.pair_distance_factor must be non-negative"));
        }
        if !p.our_key_factor.is_finite() || p.our_key_factor < 0.0 {
            return Err(invalid("proximity.our_key_factor must be non-negative"));
        }
        if p.pair_max == 0 || p.max_close == 0 {
            return Err(invalid("proximity.pair_max and max_close must be positive"));
        }

        let f = &self.profile;
        if !(f.lookup_fail_divisor > 0.0) {
            return Err(invalid("profile.lookup_fail_divisor must be positive"));
        }
        if !(0.0..=100.0).contains(&f.lookup_fail_floor_pct) {
            return Err(invalid("profile.lookup_fail_floor_pct must be a percentage"));
        }
        let weights = [
            ("banlist", f.banlist),
            ("new_router", f.new_router),
            ("unreachable", f.unreachable),
            ("version_factor", f.version_factor),
            ("bad_version", f.bad_version),
        ];
        for (name, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(format!("profile.{name} must be a non-negative number")));
            }
        }

        if !self.report.block_threshold.is_finite() || !self.report.min_display_points.is_finite() {
            return Err(invalid("report thresholds must be finite"));
        }
        Ok(())
    }
}

fn invalid(msg: impl Into<String>) -> AnalysisError {
    AnalysisError::Config(msg.into())
}
