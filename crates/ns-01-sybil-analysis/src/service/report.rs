//! Result of one analysis run.

use serde::{Deserialize, Serialize};

use crate::domain::{ClusterReport, KeyProximityReport, PairReport, RouterHash, ThreatEntry, Timestamp};

/// Population figures for the report header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloodfillSummary {
    /// Floodfills in the snapshot, ourselves excluded.
    pub known_floodfills: usize,
    /// Routers fed to the address and descriptor heuristics.
    pub analyzed_routers: usize,
    /// Mean distance from a random key to its nearest floodfill.
    pub avg_min_distance: Option<f64>,
    /// Mean distance over every floodfill pair.
    pub avg_pair_distance: Option<f64>,
}

/// Everything one run found.
///
/// Purely informational. `threats` holds every scored router; `visible()`
/// applies the display threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// When the snapshot was taken.
    pub generated_at: Timestamp,
    /// Header figures.
    pub summary: FloodfillSummary,
    /// Address and family groups.
    pub clusters: ClusterReport,
    /// Closest floodfill pairs.
    pub pairs: PairReport,
    /// One entry per key of interest.
    pub key_proximity: Vec<KeyProximityReport>,
    /// Every scored router, highest total first.
    pub threats: Vec<ThreatEntry>,
    /// Lowest total shown by `visible()`.
    pub display_threshold: f64,
    /// Total at which an operator would consider blocking.
    pub block_threshold: f64,
}

impl AnalysisReport {
    /// Threats at or above the display threshold.
    pub fn visible(&self) -> impl Iterator<Item = &ThreatEntry> {
        let threshold = self.display_threshold;
        self.threats.iter().filter(move |t| t.total >= threshold)
    }

    /// Threats at or above the block threshold.
    pub fn blockable(&self) -> impl Iterator<Item = &ThreatEntry> {
        let threshold = self.block_threshold;
        self.threats.iter().filter(move |t| t.total >= threshold)
    }

    /// Threat entry for `hash`, if it scored at all.
    pub fn threat(&self, hash: &RouterHash) -> Option<&ThreatEntry> {
        self.threats.iter().find(|t| &t.hash == hash)
    }

    /// Key report by label.
    pub fn key_report(&self, label: &str) -> Option<&KeyProximityReport> {
        self.key_proximity.iter().find(|r| r.label == label)
    }
}
