//! Closest-pair scan over all candidate pairs.

use primitive_types::U256;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::config::ProximityConfig;
use crate::domain::keyspace::{log2_of, xor_distance};
use crate::domain::{CandidateInfo, KeyspaceDistance, RouterHash, ScoreBoard};

/// One of the closest candidate pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClosePair {
    /// Earlier candidate in snapshot order.
    pub first: RouterHash,
    /// Later candidate in snapshot order.
    pub second: RouterHash,
    /// Keyspace distance between the two.
    pub distance: KeyspaceDistance,
}

/// Result of the pairwise scan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PairReport {
    /// Closest pairs, closest first.
    pub pairs: Vec<ClosePair>,
    /// Number of unordered pairs examined.
    pub pair_count: u64,
    /// Mean distance over every pair; `None` with fewer than two candidates.
    pub average_distance: Option<f64>,
}

/// Bounded list of the closest pairs seen so far.
///
/// Equal distances keep insertion order; a full list only accepts a pair
/// strictly closer than its current last entry.
#[derive(Debug)]
struct TopPairs {
    max: usize,
    pairs: Vec<(U256, usize, usize)>,
}

impl TopPairs {
    fn new(max: usize) -> Self {
        Self {
            max,
            pairs: Vec::with_capacity(max),
        }
    }

    fn offer(&mut self, xor: U256, i: usize, j: usize) {
        if self.max == 0 {
            return;
        }
        if self.pairs.len() == self.max {
            match self.pairs.last() {
                Some(last) if xor < last.0 => {
                    self.pairs.pop();
                }
                _ => return,
            }
        }
        let pos = self.pairs.partition_point(|p| p.0 <= xor);
        self.pairs.insert(pos, (xor, i, j));
    }
}

/// Per-row partial result, merged in row order.
struct RowScan {
    top: TopPairs,
    total: f64,
    count: u64,
}

/// Finds the closest candidate pairs and the population mean distance.
pub struct PairwiseProximityAnalyzer<'a> {
    config: &'a ProximityConfig,
    noun: &'static str,
}

impl<'a> PairwiseProximityAnalyzer<'a> {
    /// Create an analyzer.
    pub fn new(config: &'a ProximityConfig) -> Self {
        Self {
            config,
            noun: "floodfill",
        }
    }

    /// Word used for the other peer in reasons.
    #[must_use]
    pub fn with_noun(mut self, noun: &'static str) -> Self {
        self.noun = noun;
        self
    }

    /// Scan every unordered pair of `candidates`.
    ///
    /// Both members of each top pair closer than `min_close` get
    /// `(min_close - d) * pair_distance_factor`. Rows are scanned in
    /// parallel and merged in row order, so the result matches a
    /// sequential scan exactly.
    pub fn analyze(&self, candidates: &[CandidateInfo], board: &mut ScoreBoard) -> PairReport {
        let n = candidates.len();
        let max = self.config.pair_max;

        let rows: Vec<RowScan> = (0..n)
            .into_par_iter()
            .map(|i| {
                let mut row = RowScan {
                    top: TopPairs::new(max),
                    total: 0.0,
                    count: 0,
                };
                for j in (i + 1)..n {
                    let xor = xor_distance(&candidates[i].hash, &candidates[j].hash);
                    row.top.offer(xor, i, j);
                    row.total += log2_of(xor).value();
                    row.count += 1;
                }
                row
            })
            .collect();

        let mut top = TopPairs::new(max);
        let mut total = 0.0;
        let mut count = 0u64;
        for row in rows {
            for (xor, i, j) in row.top.pairs {
                top.offer(xor, i, j);
            }
            total += row.total;
            count += row.count;
        }

        let pairs: Vec<ClosePair> = top
            .pairs
            .iter()
            .map(|&(xor, i, j)| ClosePair {
                first: candidates[i].hash,
                second: candidates[j].hash,
                distance: log2_of(xor),
            })
            .collect();

        let threshold = self.config.min_close;
        for pair in &pairs {
            if !pair.distance.is_below(threshold) {
                break;
            }
            let points = (threshold - pair.distance.value()) * self.config.pair_distance_factor;
            board.add_points(
                pair.first,
                points,
                format!("Very close ({}) to other {} {}", pair.distance, self.noun, pair.second),
            );
            board.add_points(
                pair.second,
                points,
                format!("Very close ({}) to other {} {}", pair.distance, self.noun, pair.first),
            );
        }

        let average_distance = (count > 0).then(|| total / count as f64);
        debug!(
            "[ns-01] Pair scan: {} pairs over {} candidates, closest {:?}",
            count,
            n,
            pairs.first().map(|p| p.distance.value())
        );

        PairReport {
            pairs,
            pair_count: count,
            average_distance,
        }
    }
}
