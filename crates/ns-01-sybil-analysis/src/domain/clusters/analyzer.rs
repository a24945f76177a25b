//! Address and family clustering.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use super::config::ClusterWeights;
use super::prefix::{SubnetKey, SubnetKind};
use super::report::{counted, others, sort_groups, ClusterGroup, ClusterReport};
use crate::domain::{CandidateInfo, FamilyVerdict, RouterHash, ScoreBoard};
use crate::ports::FamilyVerifier;

/// Our own addresses, used for the near-us tiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OurAddresses {
    /// Our IPv4 address, if known.
    pub ipv4: Option<[u8; 4]>,
    /// Our IPv6 address, if known.
    pub ipv6: Option<[u8; 16]>,
}

impl OurAddresses {
    /// True when neither address is known.
    pub fn is_empty(&self) -> bool {
        self.ipv4.is_none() && self.ipv6.is_none()
    }
}

/// Groups candidates by shared address prefix and declared family.
///
/// Candidates without a usable address are left out of the address
/// heuristics; candidates without a family tag are left out of the family
/// heuristic. Neither case is an error.
pub struct AddressClusterAnalyzer<'a> {
    weights: &'a ClusterWeights,
    noun: &'static str,
}

impl<'a> AddressClusterAnalyzer<'a> {
    /// Create an analyzer over floodfill candidates.
    pub fn new(weights: &'a ClusterWeights) -> Self {
        Self {
            weights,
            noun: "floodfill",
        }
    }

    /// Word used for members in summaries ("floodfill", "router").
    #[must_use]
    pub fn with_noun(mut self, noun: &'static str) -> Self {
        self.noun = noun;
        self
    }

    /// Run every clustering heuristic and add the deltas to `board`.
    pub fn analyze(
        &self,
        candidates: &[CandidateInfo],
        us: &OurAddresses,
        verifier: &dyn FamilyVerifier,
        board: &mut ScoreBoard,
    ) -> ClusterReport {
        let verdicts = verify_families(candidates, verifier);
        let w = self.weights;

        let exempt_24 = |c: &CandidateInfo| {
            c.family.as_ref().is_some_and(|f| {
                w.family_exempt_24.contains(f)
                    && verdicts.get(&c.hash).is_some_and(FamilyVerdict::is_verified)
            })
        };
        let never = |_: &CandidateInfo| false;

        let report = ClusterReport {
            same_family: self.family_groups(candidates, verifier, &verdicts, board),
            near_us: self.near_us(candidates, us, board),
            same_ip: self.prefix_groups(candidates, SubnetKind::V4Slash32, w.same_ip, 2, never, board),
            same_24: self.prefix_groups(candidates, SubnetKind::V4Slash24, w.same_24, 2, exempt_24, board),
            same_16: self.prefix_groups(
                candidates,
                SubnetKind::V4Slash16,
                w.same_16,
                w.min_group_16,
                never,
                board,
            ),
            same_64: self.prefix_groups(candidates, SubnetKind::V6Slash64, w.same_64, 2, never, board),
            same_48: self.prefix_groups(
                candidates,
                SubnetKind::V6Slash48,
                w.same_48,
                w.min_group_48,
                never,
                board,
            ),
        };

        debug!(
            "[ns-01] Clusters: {} /32, {} /24, {} /16, {} /64, {} /48, {} families, {} near us",
            report.same_ip.len(),
            report.same_24.len(),
            report.same_16.len(),
            report.same_64.len(),
            report.same_48.len(),
            report.same_family.len(),
            report.near_us.len()
        );
        report
    }

    /// Groups of at least `min_size` sharing a prefix of `kind`.
    ///
    /// Each member gets `weight * (size - 1)` unless `exempt` says otherwise.
    fn prefix_groups(
        &self,
        candidates: &[CandidateInfo],
        kind: SubnetKind,
        weight: f64,
        min_size: usize,
        exempt: impl Fn(&CandidateInfo) -> bool,
        board: &mut ScoreBoard,
    ) -> Vec<ClusterGroup> {
        let mut groups: BTreeMap<SubnetKey, Vec<&CandidateInfo>> = BTreeMap::new();
        for c in candidates {
            if let Some(key) = subnet_of(c, kind) {
                groups.entry(key).or_default().push(c);
            }
        }

        let mut out = Vec::new();
        for (key, members) in groups {
            let n = members.len();
            if n < min_size.max(2) {
                continue;
            }

            let points = weight * (n - 1) as f64;
            let reason = format!("Same {} with {} ({})", kind.name(), others(n - 1), key);
            for m in &members {
                if !exempt(m) {
                    board.add_points(m.hash, points, reason.clone());
                }
            }

            let summary = match kind {
                SubnetKind::V4Slash32 => format!("{} with IP {}", counted(n, self.noun), key),
                _ => format!("{} in {}", counted(n, self.noun), key),
            };
            out.push(ClusterGroup {
                label: key.to_string(),
                members: sorted_hashes(&members),
                summary,
            });
        }
        sort_groups(&mut out);
        out
    }

    /// Candidates sharing a prefix with us. Exactly one tier per family
    /// of address applies, the most specific one.
    fn near_us(
        &self,
        candidates: &[CandidateInfo],
        us: &OurAddresses,
        board: &mut ScoreBoard,
    ) -> Vec<ClusterGroup> {
        if us.is_empty() {
            return Vec::new();
        }

        let mut tiers: BTreeMap<SubnetKind, Vec<&CandidateInfo>> = BTreeMap::new();
        for c in candidates {
            if let (Some(ours), Some(ip)) = (us.ipv4, c.ipv4()) {
                if ip[..2] == ours[..2] {
                    let kind = if ip[2] != ours[2] {
                        SubnetKind::V4Slash16
                    } else if ip[3] != ours[3] {
                        SubnetKind::V4Slash24
                    } else {
                        SubnetKind::V4Slash32
                    };
                    tiers.entry(kind).or_default().push(c);
                }
            }
            if let (Some(ours), Some(ip)) = (us.ipv6, c.ipv6()) {
                if ip[..6] == ours[..6] {
                    let kind = if ip[6..8] == ours[6..8] {
                        SubnetKind::V6Slash64
                    } else {
                        SubnetKind::V6Slash48
                    };
                    tiers.entry(kind).or_default().push(c);
                }
            }
        }

        let mut out = Vec::new();
        for (kind, members) in tiers {
            let weight = match kind {
                SubnetKind::V4Slash32 => self.weights.us_32,
                SubnetKind::V4Slash24 => self.weights.us_24,
                SubnetKind::V4Slash16 => self.weights.us_16,
                SubnetKind::V6Slash64 => self.weights.us_v6_64,
                SubnetKind::V6Slash48 => self.weights.us_v6_48,
            };
            let Some(key) = our_key(us, kind) else { continue };

            let reason = format!("Same {} as us ({})", kind.name(), key);
            for m in &members {
                board.add_points(m.hash, weight, reason.clone());
            }

            let n = members.len();
            let summary = match kind {
                SubnetKind::V4Slash32 => format!("{} with our IP {}", counted(n, self.noun), key),
                _ => format!("{} in our {} {}", counted(n, self.noun), kind.name(), key),
            };
            out.push(ClusterGroup {
                label: key.to_string(),
                members: sorted_hashes(&members),
                summary,
            });
        }
        out
    }

    /// Family groups, with the signed our-family adjustments.
    fn family_groups(
        &self,
        candidates: &[CandidateInfo],
        verifier: &dyn FamilyVerifier,
        verdicts: &HashMap<RouterHash, FamilyVerdict>,
        board: &mut ScoreBoard,
    ) -> Vec<ClusterGroup> {
        let our_family = verifier.our_family();
        let w = self.weights;

        let mut groups: BTreeMap<&str, Vec<&CandidateInfo>> = BTreeMap::new();
        for c in candidates {
            if let Some(family) = c.family.as_deref() {
                groups.entry(family).or_default().push(c);
            }
        }

        let mut out = Vec::new();
        for (name, members) in groups {
            let n = members.len();
            let ours = our_family.as_deref() == Some(name);
            let with = if n > 1 {
                format!(" with {}", others(n - 1))
            } else {
                String::new()
            };

            let mut scored = false;
            for m in &members {
                let verdict = verdicts
                    .get(&m.hash)
                    .copied()
                    .unwrap_or(FamilyVerdict::Unverified);
                let (points, reason) = if ours {
                    if verdict.is_verified() {
                        (w.our_family, format!("Our family \"{name}\"{with}"))
                    } else {
                        (w.bad_our_family, format!("Spoofed our family \"{name}\"{with}"))
                    }
                } else if verdict == FamilyVerdict::Invalid {
                    (w.bad_family, format!("Bad family config \"{name}\""))
                } else if n >= 2 {
                    let state = if verdict.is_verified() {
                        "verified"
                    } else {
                        "unverified"
                    };
                    (w.family, format!("In {state} family \"{name}\"{with}"))
                } else {
                    continue;
                };
                board.add_points(m.hash, points, reason);
                scored = true;
            }

            if scored || n >= 2 {
                out.push(ClusterGroup {
                    label: name.to_string(),
                    members: sorted_hashes(&members),
                    summary: format!("{} in family \"{}\"", counted(n, self.noun), name),
                });
            }
        }
        sort_groups(&mut out);
        out
    }
}

fn verify_families(
    candidates: &[CandidateInfo],
    verifier: &dyn FamilyVerifier,
) -> HashMap<RouterHash, FamilyVerdict> {
    candidates
        .iter()
        .filter_map(|c| {
            c.family
                .as_deref()
                .map(|family| (c.hash, verifier.verify(family, c)))
        })
        .collect()
}

fn subnet_of(c: &CandidateInfo, kind: SubnetKind) -> Option<SubnetKey> {
    if kind.is_ipv6() {
        c.ipv6().map(|ip| SubnetKey::from_v6(kind, &ip))
    } else {
        c.ipv4().map(|ip| SubnetKey::from_v4(kind, &ip))
    }
}

fn our_key(us: &OurAddresses, kind: SubnetKind) -> Option<SubnetKey> {
    if kind.is_ipv6() {
        us.ipv6.map(|ip| SubnetKey::from_v6(kind, &ip))
    } else {
        us.ipv4.map(|ip| SubnetKey::from_v4(kind, &ip))
    }
}

fn sorted_hashes(members: &[&CandidateInfo]) -> Vec<RouterHash> {
    let mut hashes: Vec<_> = members.iter().map(|c| c.hash).collect();
    hashes.sort();
    hashes
}
