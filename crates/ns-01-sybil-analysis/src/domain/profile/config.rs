//! Profile signal weights.

use serde::{Deserialize, Serialize};

use crate::domain::routing_key::DAY_SECS;

/// Profile and descriptor signal weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    /// Currently banned.
    pub banlist: f64,
    /// Maximum penalty for a router first heard about just now.
    pub new_router: f64,
    /// Age below which a router counts as new, in seconds.
    pub new_window_secs: u64,
    /// Lookup failure percentage above which points accrue.
    pub lookup_fail_floor_pct: f64,
    /// Percentage points above the floor per point of penalty.
    pub lookup_fail_divisor: f64,
    /// Reachable capability missing.
    pub unreachable: f64,
    /// Points per release behind ours.
    pub version_factor: f64,
    /// Releases behind before the version penalty applies.
    pub min_versions_behind: u32,
    /// Unparseable version string.
    pub bad_version: f64,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            banlist: 10.0,
            new_router: 4.0,
            new_window_secs: 2 * DAY_SECS,
            lookup_fail_floor_pct: 40.0,
            lookup_fail_divisor: 6.0,
            unreachable: 4.0,
            version_factor: 1.0,
            min_versions_behind: 3,
            bad_version: 20.0,
        }
    }
}
