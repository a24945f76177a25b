//! Address and family clustering weights.

use serde::{Deserialize, Serialize};

/// Clustering weights and group thresholds.
///
/// Every weight except `our_family` is a penalty and must be non-negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterWeights {
    /// Per other member of an exact-IPv4 group.
    pub same_ip: f64,
    /// Per other member of an IPv4 /24 group.
    pub same_24: f64,
    /// Per other member of an IPv4 /16 group.
    pub same_16: f64,
    /// Minimum /16 group size that is penalized.
    pub min_group_16: usize,
    /// Per other member of an IPv6 /64 group.
    pub same_64: f64,
    /// Per other member of an IPv6 /48 group.
    pub same_48: f64,
    /// Minimum /48 group size that is penalized.
    pub min_group_48: usize,

    /// Same IPv4 address as us.
    pub us_32: f64,
    /// Same IPv4 /24 as us.
    pub us_24: f64,
    /// Same IPv4 /16 as us.
    pub us_16: f64,
    /// Same IPv6 /64 as us.
    pub us_v6_64: f64,
    /// Same IPv6 /48 as us.
    pub us_v6_48: f64,

    /// Member of a family group with at least two members.
    pub family: f64,
    /// Family claim with a bad key or signature.
    pub bad_family: f64,
    /// Claims our family but fails verification.
    pub bad_our_family: f64,
    /// Verified member of our family (signed bonus).
    pub our_family: f64,
    /// Families whose verified members are exempt from /24 penalties.
    pub family_exempt_24: Vec<String>,
}

impl Default for ClusterWeights {
    fn default() -> Self {
        Self {
            same_ip: 5.0,
            same_24: 4.0,
            same_16: 0.25,
            min_group_16: 4,
            same_64: 2.0,
            same_48: 0.5,
            min_group_48: 4,
            us_32: 25.0,
            us_24: 20.0,
            us_16: 10.0,
            us_v6_64: 12.5,
            us_v6_48: 5.0,
            family: 2.0,
            bad_family: 20.0,
            bad_our_family: 100.0,
            our_family: -100.0,
            family_exempt_24: Vec::new(),
        }
    }
}

impl ClusterWeights {
    /// Penalty weights that must stay non-negative, by name.
    pub(crate) fn penalties(&self) -> [(&'static str, f64); 13] {
        [
            ("same_ip", self.same_ip),
            ("same_24", self.same_24),
            ("same_16", self.same_16),
            ("same_64", self.same_64),
            ("same_48", self.same_48),
            ("us_32", self.us_32),
            ("us_24", self.us_24),
            ("us_16", self.us_16),
            ("us_v6_64", self.us_v6_64),
            ("us_v6_48", self.us_v6_48),
            ("family", self.family),
            ("bad_family", self.bad_family),
            ("bad_our_family", self.bad_our_family),
        ]
    }
}
