//! Threat score accumulation and ranking.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::RouterHash;

/// One justified score contribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reason {
    /// Signed delta.
    pub points: f64,
    /// Human-readable justification.
    pub text: String,
}

/// Ranked threat record for one router.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreatEntry {
    /// Router identity.
    pub hash: RouterHash,
    /// Sum of every contribution.
    pub total: f64,
    /// Contributions, largest first.
    pub reasons: Vec<Reason>,
}

#[derive(Debug, Clone, Default)]
struct Accumulator {
    total: f64,
    reasons: Vec<Reason>,
}

/// Per-router score accumulator for one analysis run.
///
/// Contributions are only ever added. Totals equal the sum of all deltas
/// regardless of the order in which analyzers ran.
#[derive(Debug, Clone, Default)]
pub struct ScoreBoard {
    scores: HashMap<RouterHash, Accumulator>,
}

impl ScoreBoard {
    /// Create an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a contribution for `hash`.
    pub fn add_points(&mut self, hash: RouterHash, points: f64, reason: impl Into<String>) {
        let entry = self.scores.entry(hash).or_default();
        entry.total += points;
        entry.reasons.push(Reason {
            points,
            text: reason.into(),
        });
    }

    /// Current total for `hash`, if anything was added.
    pub fn total(&self, hash: &RouterHash) -> Option<f64> {
        self.scores.get(hash).map(|a| a.total)
    }

    /// Contributions for `hash` in the order they were added.
    pub fn reasons(&self, hash: &RouterHash) -> &[Reason] {
        self.scores
            .get(hash)
            .map(|a| a.reasons.as_slice())
            .unwrap_or(&[])
    }

    /// Number of scored routers.
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// True when nothing was scored.
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Fold another board into this one.
    pub fn merge(&mut self, other: ScoreBoard) {
        for (hash, acc) in other.scores {
            let entry = self.scores.entry(hash).or_default();
            entry.total += acc.total;
            entry.reasons.extend(acc.reasons);
        }
    }

    /// Entries by total descending, ties by hash ascending.
    ///
    /// Totals are re-summed from reasons sorted by points, so the float
    /// result does not depend on insertion order.
    pub fn ranked_descending(&self) -> Vec<ThreatEntry> {
        let mut entries: Vec<ThreatEntry> = self
            .scores
            .iter()
            .map(|(hash, acc)| {
                let mut reasons = acc.reasons.clone();
                reasons.sort_by(compare_reasons);
                let total = reasons.iter().map(|r| r.points).sum();
                ThreatEntry {
                    hash: *hash,
                    total,
                    reasons,
                }
            })
            .collect();

        entries.sort_by(|a, b| {
            b.total
                .total_cmp(&a.total)
                .then_with(|| a.hash.cmp(&b.hash))
        });
        entries
    }
}

fn compare_reasons(a: &Reason, b: &Reason) -> Ordering {
    b.points
        .total_cmp(&a.points)
        .then_with(|| a.text.cmp(&b.text))
}
