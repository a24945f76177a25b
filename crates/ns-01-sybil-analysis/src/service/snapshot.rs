//! Point-in-time copy of everything a run reads.

use std::collections::HashMap;

use tracing::debug;

use super::core::Collaborators;
use crate::domain::{
    AuxiliarySignal, CandidateInfo, IpAddr, LocalDestination, OurAddresses, RouterHash, Timestamp,
};

/// Owned inputs for one analysis run.
///
/// Collaborators hand out owned data, so nothing they guard stays locked
/// while the quadratic scans run.
pub(crate) struct Snapshot {
    pub now: Timestamp,
    pub us: RouterHash,
    pub our_version: Option<String>,
    pub our_addresses: OurAddresses,
    /// Routers fed to the address, family and descriptor heuristics.
    pub candidates: Vec<CandidateInfo>,
    /// Floodfill subset of `candidates`.
    pub floodfills: Vec<CandidateInfo>,
    pub signals: HashMap<RouterHash, AuxiliarySignal>,
    pub destinations: Vec<LocalDestination>,
}

impl Snapshot {
    /// Copy the current state out of `deps`.
    ///
    /// Our own router is excluded. Candidates are sorted by hash so the
    /// pair scan visits them in the same order on every run.
    pub fn take(deps: &Collaborators, analyze_all: bool) -> Self {
        let now = deps.time_source.now();
        let us = deps.local.router_hash();
        let our_info = deps.local.router_info();

        let mut candidates = if analyze_all {
            deps.netdb.all_routers()
        } else {
            deps.netdb.floodfills()
        };
        candidates.retain(|c| c.hash != us);
        candidates.sort_by(|a, b| a.hash.cmp(&b.hash));
        candidates.dedup_by(|a, b| a.hash == b.hash);

        let floodfills: Vec<CandidateInfo> = if analyze_all {
            candidates.iter().filter(|c| c.is_floodfill()).cloned().collect()
        } else {
            candidates.clone()
        };

        let our_addresses = OurAddresses {
            ipv4: our_info
                .as_ref()
                .and_then(CandidateInfo::ipv4)
                .or_else(|| deps.local.last_known_ipv4().and_then(v4_octets)),
            ipv6: our_info
                .as_ref()
                .and_then(CandidateInfo::ipv6)
                .or_else(|| deps.local.last_known_ipv6().and_then(v6_octets)),
        };
        let our_version = our_info
            .map(|info| info.version)
            .filter(|v| !v.trim().is_empty());

        let signals = collect_signals(deps, &candidates);
        let destinations = deps.destinations.published();

        debug!(
            "[ns-01] Snapshot: {} candidates, {} floodfills, {} profiled, {} destinations",
            candidates.len(),
            floodfills.len(),
            signals.len(),
            destinations.len()
        );

        Self {
            now,
            us,
            our_version,
            our_addresses,
            candidates,
            floodfills,
            signals,
            destinations,
        }
    }
}

/// Profile store and ban list merged per candidate.
fn collect_signals(
    deps: &Collaborators,
    candidates: &[CandidateInfo],
) -> HashMap<RouterHash, AuxiliarySignal> {
    let mut signals = HashMap::new();
    for c in candidates {
        let profile = deps.profiles.signal(&c.hash);
        let banned = deps.banlist.ban_entry(&c.hash);
        if profile.is_none() && banned.is_none() {
            continue;
        }
        let mut signal = profile.unwrap_or_default();
        if banned.is_some() {
            signal.banned = banned;
        }
        signals.insert(c.hash, signal);
    }
    signals
}

fn v4_octets(ip: IpAddr) -> Option<[u8; 4]> {
    match ip {
        IpAddr::V4(octets) => Some(octets),
        IpAddr::V6(_) => None,
    }
}

fn v6_octets(ip: IpAddr) -> Option<[u8; 16]> {
    match ip {
        IpAddr::V6(octets) if !ip.is_v6_loopback() => Some(octets),
        _ => None,
    }
}
