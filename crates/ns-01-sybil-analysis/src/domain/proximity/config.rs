//! Keyspace proximity thresholds and factors.

use serde::{Deserialize, Serialize};

/// Proximity analysis configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProximityConfig {
    /// Distances below this are suspiciously close (`T`).
    pub min_close: f64,
    /// Points per unit below `min_close` for each member of a close pair.
    pub pair_distance_factor: f64,
    /// Points per unit below `min_close` for closeness to one of our keys.
    pub our_key_factor: f64,
    /// Closest pairs kept.
    pub pair_max: usize,
    /// Closest candidates examined per key of interest.
    pub max_close: usize,
    /// Random keys drawn for the baseline.
    pub baseline_samples: usize,
    /// Seed for the baseline generator, so runs are reproducible.
    pub baseline_seed: u64,
    /// Days before today covered by the victim timeline.
    pub timeline_days_before: u32,
    /// Days after today covered by the victim timeline.
    pub timeline_days_after: u32,
    /// Suspects listed per timeline day.
    pub timeline_limit: usize,
}

impl Default for ProximityConfig {
    fn default() -> Self {
        Self {
            min_close: 242.0,
            pair_distance_factor: 2.0,
            our_key_factor: 4.0,
            pair_max: 20,
            max_close: 10,
            baseline_samples: 200,
            baseline_seed: 0x5eed_f10d,
            timeline_days_before: 3,
            timeline_days_after: 10,
            timeline_limit: 10,
        }
    }
}
