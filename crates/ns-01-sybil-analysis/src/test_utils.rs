//! Test utilities for Sybil analysis.
//!
//! Builders for candidate descriptors and a ready-made set of in-memory
//! collaborators. Enable with the `test-utils` feature flag.
//!
//! # Example
//!
//! ```rust,ignore
//! use ns_01_sybil_analysis::test_utils::{hash, CandidateBuilder};
//!
//! let ff = CandidateBuilder::floodfill(hash(7)).ipv4(203, 0, 113, 5).build();
//! assert!(ff.is_floodfill());
//! ```

use crate::adapters::{
    InMemoryNetDb, InMemoryProfiles, StaticDestinations, StaticFamilyVerifier, StaticLocalRouter,
};
use crate::domain::{CandidateInfo, IpAddr, LocalDestination, RouterAddress, RouterHash, Timestamp};
use crate::service::Collaborators;

pub use crate::adapters::FixedTimeSource;

/// Hash with every byte set to `byte`.
pub fn hash(byte: u8) -> RouterHash {
    RouterHash::new([byte; 32])
}

/// Fluent builder for `CandidateInfo`.
#[derive(Debug, Clone)]
pub struct CandidateBuilder {
    info: CandidateInfo,
}

impl CandidateBuilder {
    /// Reachable floodfill on the current release.
    pub fn floodfill(hash: RouterHash) -> Self {
        let mut info = CandidateInfo::new(hash);
        info.capabilities = "fR".to_string();
        info.version = "0.9.62".to_string();
        Self { info }
    }

    /// Reachable router that is not a floodfill.
    pub fn router(hash: RouterHash) -> Self {
        let mut b = Self::floodfill(hash);
        b.info.capabilities = "R".to_string();
        b
    }

    /// Add an SSU2 address.
    pub fn ipv4(mut self, a: u8, b: u8, c: u8, d: u8) -> Self {
        self.info
            .addresses
            .push(RouterAddress::new(IpAddr::v4(a, b, c, d), "SSU2", 8));
        self
    }

    /// Add an NTCP2 IPv6 address.
    pub fn ipv6(mut self, bytes: [u8; 16]) -> Self {
        self.info
            .addresses
            .push(RouterAddress::new(IpAddr::v6(bytes), "NTCP2", 10));
        self
    }

    /// Declare a family.
    pub fn family(mut self, name: &str) -> Self {
        self.info.family = Some(name.to_string());
        self
    }

    /// Replace the capability string.
    pub fn caps(mut self, caps: &str) -> Self {
        self.info.capabilities = caps.to_string();
        self
    }

    /// Replace the version string.
    pub fn version(mut self, version: &str) -> Self {
        self.info.version = version.to_string();
        self
    }

    /// Set the publication time.
    pub fn published(mut self, secs: u64) -> Self {
        self.info.published = Timestamp::new(secs);
        self
    }

    /// Finish.
    pub fn build(self) -> CandidateInfo {
        self.info
    }
}

/// In-memory host state for service tests.
///
/// Fields are public so tests can seed whatever they need before turning
/// the network into collaborators.
#[derive(Debug, Clone)]
pub struct TestNetwork {
    /// Network database.
    pub netdb: InMemoryNetDb,
    /// Profiles and bans.
    pub profiles: InMemoryProfiles,
    /// Family verdicts.
    pub families: StaticFamilyVerifier,
    /// Our router.
    pub local: StaticLocalRouter,
    /// Our published destinations.
    pub destinations: Vec<LocalDestination>,
    /// Fixed clock reading.
    pub now: u64,
}

impl TestNetwork {
    /// Empty network seen by router `us` at `now`.
    pub fn new(us: RouterHash, now: u64) -> Self {
        Self {
            netdb: InMemoryNetDb::new(),
            profiles: InMemoryProfiles::new(),
            families: StaticFamilyVerifier::new(),
            local: StaticLocalRouter::new(us),
            destinations: Vec::new(),
            now,
        }
    }

    /// Store descriptors in the network database.
    pub fn with_routers(self, routers: impl IntoIterator<Item = CandidateInfo>) -> Self {
        for r in routers {
            self.netdb.store(r);
        }
        self
    }

    /// Collaborators serving this network.
    pub fn collaborators(&self) -> Collaborators {
        Collaborators {
            netdb: Box::new(self.netdb.clone()),
            local: Box::new(self.local.clone()),
            profiles: Box::new(self.profiles.clone()),
            banlist: Box::new(self.profiles.clone()),
            families: Box::new(self.families.clone()),
            destinations: Box::new(StaticDestinations(self.destinations.clone())),
            time_source: Box::new(FixedTimeSource::new(self.now)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::TimeSource;

    #[test]
    fn test_fixed_time_source_returns_configured_value() {
        let source = FixedTimeSource::new(1000);
        assert_eq!(source.now().as_secs(), 1000);
    }

    #[test]
    fn test_builder_defaults_to_reachable_floodfill() {
        let info = CandidateBuilder::floodfill(hash(1)).build();
        assert!(info.is_floodfill());
        assert!(info.is_reachable());
        assert!(!CandidateBuilder::router(hash(2)).build().is_floodfill());
    }
}
