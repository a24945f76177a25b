//! Closeness of candidates to a key of interest.

use serde::{Deserialize, Serialize};

use super::config::ProximityConfig;
use crate::domain::keyspace::{distance_log2, SortKey};
use crate::domain::{
    CandidateInfo, KeyspaceDistance, KeyspacePoint, RouterHash, RoutingKey, ScoreBoard,
};

/// How alarming a close candidate is, by rank among those under the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// First candidate under the baseline.
    Informational,
    /// Second.
    Notable,
    /// Third.
    Warning,
    /// Fourth and beyond.
    Major,
}

impl Severity {
    /// Severity for the candidate at `rank` (0-based) under the baseline.
    pub fn for_rank(rank: usize) -> Self {
        match rank {
            0 => Severity::Informational,
            1 => Severity::Notable,
            2 => Severity::Warning,
            _ => Severity::Major,
        }
    }
}

/// One of the candidates closest to a key of interest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyProximityEntry {
    /// Candidate identity.
    pub hash: RouterHash,
    /// Distance to the key.
    pub distance: KeyspaceDistance,
    /// Set when the distance is below the random baseline.
    pub severity: Option<Severity>,
    /// Points awarded for this key.
    pub points: f64,
}

/// Summary statistics of the reported distances.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceStats {
    /// Smallest distance.
    pub min: f64,
    /// Mean distance.
    pub avg: f64,
    /// Middle distance.
    pub median: f64,
    /// Largest distance.
    pub max: f64,
}

impl DistanceStats {
    fn from_sorted(distances: &[f64]) -> Option<Self> {
        let (first, last) = (distances.first()?, distances.last()?);
        let sum: f64 = distances.iter().sum();
        Some(Self {
            min: *first,
            avg: sum / distances.len() as f64,
            median: distances[distances.len() / 2],
            max: *last,
        })
    }
}

/// Candidates closest to one key of interest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyProximityReport {
    /// What the key is, e.g. "our rkey (tomorrow)".
    pub label: String,
    /// The key itself.
    pub key: RouterHash,
    /// Closest candidates, closest first.
    pub entries: Vec<KeyProximityEntry>,
    /// Statistics over `entries`.
    pub stats: Option<DistanceStats>,
}

impl KeyProximityReport {
    /// Entries flagged under the baseline.
    pub fn flagged(&self) -> impl Iterator<Item = &KeyProximityEntry> {
        self.entries.iter().filter(|e| e.severity.is_some())
    }
}

/// Ranks candidates by distance to a key and scores the ones that are too close.
pub struct KeyProximityAnalyzer<'a> {
    config: &'a ProximityConfig,
}

impl<'a> KeyProximityAnalyzer<'a> {
    /// Create an analyzer.
    pub fn new(config: &'a ProximityConfig) -> Self {
        Self { config }
    }

    /// Examine the `max_close` candidates closest to `target`.
    ///
    /// Entries under `baseline` get a severity by rank. Walking outwards,
    /// every entry closer than `min_close` gets
    /// `(min_close - d) * our_key_factor`; the walk stops scoring at the
    /// first entry that is not. A candidate identical to the target is
    /// not compared.
    pub fn analyze<T>(
        &self,
        target: &T,
        label: &str,
        candidates: &[CandidateInfo],
        baseline: Option<f64>,
        board: &mut ScoreBoard,
    ) -> KeyProximityReport
    where
        T: KeyspacePoint + ?Sized,
    {
        let key = RouterHash::new(*target.key_bytes());
        let threshold = self.config.min_close;

        let mut ranked: Vec<&CandidateInfo> = candidates.iter().filter(|c| c.hash != key).collect();
        let by_distance = SortKey::DistanceTo(RoutingKey::new(*target.key_bytes())).comparator();
        ranked.sort_by(|a, b| by_distance(a, b));

        let mut entries = Vec::with_capacity(self.config.max_close);
        let mut scoring = true;
        for c in ranked.into_iter().take(self.config.max_close) {
            let distance = distance_log2(target, &c.hash);
            let rank = entries.len();
            let severity = baseline
                .filter(|b| distance.is_below(*b))
                .map(|_| Severity::for_rank(rank));

            let mut points = 0.0;
            if scoring && distance.is_below(threshold) {
                points = (threshold - distance.value()) * self.config.our_key_factor;
                board.add_points(
                    c.hash,
                    points,
                    format!("Very close ({}) to our key {}: {}", distance, label, key),
                );
            } else {
                scoring = false;
            }

            entries.push(KeyProximityEntry {
                hash: c.hash,
                distance,
                severity,
                points,
            });
        }

        let distances: Vec<f64> = entries.iter().map(|e| e.distance.value()).collect();
        KeyProximityReport {
            label: label.to_string(),
            key,
            stats: DistanceStats::from_sorted(&distances),
            entries,
        }
    }
}
