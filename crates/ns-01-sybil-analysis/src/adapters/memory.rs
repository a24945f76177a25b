//! In-memory host state.
//!
//! Backs the service in tests, in the offline report tool, and in hosts
//! that keep their network database in process.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::domain::{
    AuxiliarySignal, BanEntry, CandidateInfo, FamilyVerdict, IpAddr, LocalDestination, RouterHash,
};
use crate::ports::{
    Banlist, CandidateSource, FamilyVerifier, LocalDestinations, LocalRouter, ProfileSource,
};

// ============================================================================
// InMemoryNetDb
// ============================================================================

/// Router descriptors keyed by hash.
///
/// Cloning shares the underlying table, so a host can keep inserting while
/// the service holds another handle.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNetDb {
    routers: Arc<RwLock<HashMap<RouterHash, CandidateInfo>>>,
}

impl InMemoryNetDb {
    /// Empty database.
    pub fn new() -> Self {
        Self::default()
    }

    /// Database holding `routers`. Later duplicates replace earlier ones.
    pub fn with_routers(routers: impl IntoIterator<Item = CandidateInfo>) -> Self {
        let db = Self::new();
        for r in routers {
            db.store(r);
        }
        db
    }

    /// Insert or replace a descriptor.
    pub fn store(&self, info: CandidateInfo) {
        self.routers.write().insert(info.hash, info);
    }

    /// Drop a descriptor.
    pub fn remove(&self, hash: &RouterHash) -> Option<CandidateInfo> {
        self.routers.write().remove(hash)
    }

    /// Number of stored descriptors.
    pub fn len(&self) -> usize {
        self.routers.read().len()
    }

    /// True when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.routers.read().is_empty()
    }
}

impl CandidateSource for InMemoryNetDb {
    fn floodfills(&self) -> Vec<CandidateInfo> {
        self.routers
            .read()
            .values()
            .filter(|r| r.is_floodfill())
            .cloned()
            .collect()
    }

    fn all_routers(&self) -> Vec<CandidateInfo> {
        self.routers.read().values().cloned().collect()
    }
}

// ============================================================================
// InMemoryProfiles
// ============================================================================

#[derive(Debug, Default)]
struct ProfileTables {
    signals: HashMap<RouterHash, AuxiliarySignal>,
    bans: HashMap<RouterHash, BanEntry>,
}

/// Peer profiles and ban list.
///
/// One handle serves as both `ProfileSource` and `Banlist`; clone it to
/// hand the same tables to both collaborator slots.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProfiles {
    tables: Arc<RwLock<ProfileTables>>,
}

impl InMemoryProfiles {
    /// No profiles, no bans.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the profile of `hash`.
    pub fn set_signal(&self, hash: RouterHash, signal: AuxiliarySignal) {
        self.tables.write().signals.insert(hash, signal);
    }

    /// Ban `hash`.
    pub fn ban(&self, hash: RouterHash, cause: Option<String>) {
        self.tables.write().bans.insert(hash, BanEntry { cause });
    }

    /// Lift a ban.
    pub fn unban(&self, hash: &RouterHash) {
        self.tables.write().bans.remove(hash);
    }
}

impl ProfileSource for InMemoryProfiles {
    fn signal(&self, hash: &RouterHash) -> Option<AuxiliarySignal> {
        self.tables.read().signals.get(hash).cloned()
    }
}

impl Banlist for InMemoryProfiles {
    fn ban_entry(&self, hash: &RouterHash) -> Option<BanEntry> {
        let tables = self.tables.read();
        tables
            .bans
            .get(hash)
            .cloned()
            .or_else(|| tables.signals.get(hash).and_then(|s| s.banned.clone()))
    }
}

// ============================================================================
// StaticLocalRouter
// ============================================================================

/// Our router as a fixed value.
#[derive(Debug, Clone)]
pub struct StaticLocalRouter {
    hash: RouterHash,
    info: Option<CandidateInfo>,
    last_ipv4: Option<IpAddr>,
    last_ipv6: Option<IpAddr>,
}

impl StaticLocalRouter {
    /// Router with identity `hash` and no published descriptor.
    pub fn new(hash: RouterHash) -> Self {
        Self {
            hash,
            info: None,
            last_ipv4: None,
            last_ipv6: None,
        }
    }

    /// Attach our published descriptor.
    #[must_use]
    pub fn with_info(mut self, info: CandidateInfo) -> Self {
        self.info = Some(info);
        self
    }

    /// Fallback addresses seen by the transports.
    #[must_use]
    pub fn with_last_known(mut self, ipv4: Option<IpAddr>, ipv6: Option<IpAddr>) -> Self {
        self.last_ipv4 = ipv4;
        self.last_ipv6 = ipv6;
        self
    }
}

impl LocalRouter for StaticLocalRouter {
    fn router_hash(&self) -> RouterHash {
        self.hash
    }

    fn router_info(&self) -> Option<CandidateInfo> {
        self.info.clone()
    }

    fn last_known_ipv4(&self) -> Option<IpAddr> {
        self.last_ipv4
    }

    fn last_known_ipv6(&self) -> Option<IpAddr> {
        self.last_ipv6
    }
}

// ============================================================================
// StaticDestinations
// ============================================================================

/// Fixed list of published destinations.
#[derive(Debug, Clone, Default)]
pub struct StaticDestinations(pub Vec<LocalDestination>);

impl LocalDestinations for StaticDestinations {
    fn published(&self) -> Vec<LocalDestination> {
        self.0.clone()
    }
}

// ============================================================================
// StaticFamilyVerifier
// ============================================================================

/// Family verdicts decided up front.
///
/// Claims not listed as verified or invalid come back `Unverified`.
#[derive(Debug, Clone, Default)]
pub struct StaticFamilyVerifier {
    ours: Option<String>,
    verified: HashSet<(String, RouterHash)>,
    invalid: HashSet<(String, RouterHash)>,
}

impl StaticFamilyVerifier {
    /// Verifier with no family of our own and no known verdicts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare our own family.
    #[must_use]
    pub fn with_our_family(mut self, family: impl Into<String>) -> Self {
        self.ours = Some(family.into());
        self
    }

    /// Accept `member`'s claim to `family`.
    #[must_use]
    pub fn verified(mut self, family: impl Into<String>, member: RouterHash) -> Self {
        self.verified.insert((family.into(), member));
        self
    }

    /// Reject `member`'s claim to `family` as badly signed.
    #[must_use]
    pub fn invalid(mut self, family: impl Into<String>, member: RouterHash) -> Self {
        self.invalid.insert((family.into(), member));
        self
    }
}

impl FamilyVerifier for StaticFamilyVerifier {
    fn our_family(&self) -> Option<String> {
        self.ours.clone()
    }

    fn verify(&self, family: &str, candidate: &CandidateInfo) -> FamilyVerdict {
        let key = (family.to_string(), candidate.hash);
        if self.invalid.contains(&key) {
            FamilyVerdict::Invalid
        } else if self.verified.contains(&key) {
            FamilyVerdict::Verified
        } else {
            FamilyVerdict::Unverified
        }
    }
}
