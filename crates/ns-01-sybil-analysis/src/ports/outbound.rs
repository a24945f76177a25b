//! # Driven Ports (Outbound SPI)
//!
//! Interfaces the host router implements so the engine can read its state.

use crate::domain::{
    AuxiliarySignal, BanEntry, CandidateInfo, FamilyVerdict, IpAddr, LocalDestination,
    RouterHash, RoutingKey, SybilConfig, Timestamp,
};

/// Source of router descriptors from the network database.
pub trait CandidateSource: Send + Sync {
    /// Every known floodfill.
    fn floodfills(&self) -> Vec<CandidateInfo>;

    /// Every known router, floodfill or not.
    fn all_routers(&self) -> Vec<CandidateInfo>;
}

/// Our own router.
pub trait LocalRouter: Send + Sync {
    /// Our identity hash.
    fn router_hash(&self) -> RouterHash;

    /// Our current descriptor, if one has been published.
    fn router_info(&self) -> Option<CandidateInfo>;

    /// Last IPv4 address seen by the transports, used when the descriptor
    /// has none (firewalled or hidden).
    fn last_known_ipv4(&self) -> Option<IpAddr> {
        None
    }

    /// Last IPv6 address seen by the transports.
    fn last_known_ipv6(&self) -> Option<IpAddr> {
        None
    }
}

/// Derives the key a router or destination is stored under in the
/// network database.
///
/// # Example Implementation
///
/// ```rust,ignore
/// impl RoutingKeyTransform for FixedKeys {
///     fn key_at(&self, identity: &RouterHash, _at: Timestamp) -> RoutingKey {
///         RoutingKey::new(*identity.as_bytes())
///     }
///     fn next_key(&self, identity: &RouterHash, now: Timestamp) -> RoutingKey {
///         self.key_at(identity, now)
///     }
/// }
/// ```
pub trait RoutingKeyTransform: Send + Sync {
    /// Key of `identity` during the rotation period containing `at`.
    fn key_at(&self, identity: &RouterHash, at: Timestamp) -> RoutingKey;

    /// Key of `identity` during the period after the one containing `now`.
    fn next_key(&self, identity: &RouterHash, now: Timestamp) -> RoutingKey;

    /// Key of `identity` right now.
    fn current_key(&self, identity: &RouterHash, now: Timestamp) -> RoutingKey {
        self.key_at(identity, now)
    }
}

/// Peer profile store.
pub trait ProfileSource: Send + Sync {
    /// Profile-derived signals for `hash`. `None` when we never profiled it.
    fn signal(&self, hash: &RouterHash) -> Option<AuxiliarySignal>;
}

/// Ban list.
pub trait Banlist: Send + Sync {
    /// Ban entry for `hash`, if it is currently banned.
    fn ban_entry(&self, hash: &RouterHash) -> Option<BanEntry>;
}

/// Verifies family membership claims.
///
/// A family claim is signed with the family key; only the host holds the
/// keys and certificates needed to check it.
pub trait FamilyVerifier: Send + Sync {
    /// Name of the family we belong to, if any.
    fn our_family(&self) -> Option<String>;

    /// Check `candidate`'s claim to belong to `family`.
    fn verify(&self, family: &str, candidate: &CandidateInfo) -> FamilyVerdict;
}

/// Client destinations published by this router.
pub trait LocalDestinations: Send + Sync {
    /// Currently published destinations.
    fn published(&self) -> Vec<LocalDestination>;
}

/// Abstract interface for time-related operations.
///
/// Production uses system time; tests use fixed timestamps.
pub trait TimeSource: Send + Sync {
    /// Get the current timestamp.
    fn now(&self) -> Timestamp;
}

/// Abstract interface for configuration loading.
pub trait ConfigProvider: Send + Sync {
    /// Get the analysis configuration.
    fn get_sybil_config(&self) -> SybilConfig;
}
