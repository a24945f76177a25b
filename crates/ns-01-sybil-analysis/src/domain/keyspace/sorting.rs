//! Candidate orderings.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::distance::xor_distance;
use crate::domain::{CandidateInfo, KeyspacePoint, ReleaseVersion, RoutingKey};

/// Closed set of candidate orderings.
///
/// Every variant breaks ties by router hash, so the resulting order is
/// total and independent of the input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Closest to a key first (exact 256-bit XOR comparison).
    DistanceTo(RoutingKey),
    /// Router hash ascending.
    Hash,
    /// Newest release first; unparseable versions last.
    Version,
    /// Most recently published first.
    Published,
}

impl SortKey {
    /// Comparison function for this ordering.
    pub fn comparator(self) -> impl Fn(&CandidateInfo, &CandidateInfo) -> Ordering {
        move |a, b| {
            let primary = match self {
                SortKey::DistanceTo(target) => {
                    xor_distance(&target, &a.hash).cmp(&xor_distance(&target, &b.hash))
                }
                SortKey::Hash => Ordering::Equal,
                SortKey::Version => {
                    let va = ReleaseVersion::parse(&a.version);
                    let vb = ReleaseVersion::parse(&b.version);
                    match (va, vb) {
                        (Some(va), Some(vb)) => vb.cmp(&va),
                        (Some(_), None) => Ordering::Less,
                        (None, Some(_)) => Ordering::Greater,
                        (None, None) => Ordering::Equal,
                    }
                }
                SortKey::Published => b.published.cmp(&a.published),
            };
            primary.then_with(|| a.hash.cmp(&b.hash))
        }
    }
}

/// Sort candidates in place by the given key.
pub fn sort_candidates(candidates: &mut [CandidateInfo], key: SortKey) {
    candidates.sort_by(key.comparator());
}

/// Find the `k` candidates closest to `target`, closest first.
///
/// XOR values are computed once per candidate. Candidates at the same
/// distance keep their input order.
pub fn find_k_closest<'a, T>(
    candidates: &'a [CandidateInfo],
    target: &T,
    k: usize,
) -> Vec<&'a CandidateInfo>
where
    T: KeyspacePoint + ?Sized,
{
    let mut ranked: Vec<_> = candidates
        .iter()
        .map(|c| (xor_distance(target, &c.hash), c))
        .collect();
    ranked.sort_by(|a, b| a.0.cmp(&b.0));
    ranked.into_iter().take(k).map(|(_, c)| c).collect()
}
