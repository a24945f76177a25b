//! # Floodfill Sybil Analysis
//!
//! Threat scoring for floodfill routers in a Kademlia-style network
//! database. An attacker who controls many identities can place them close
//! to a target key in the 256-bit XOR keyspace and take over lookups for it.
//! This crate looks for the traces of that: clustered addresses, shared
//! families, identities packed unusually close together or close to our own
//! keys, and weak profile signals. Every heuristic adds points with a reason;
//! the result is a ranked list of routers.
//!
//! The engine only reports. It never bans, blocks or persists anything.
//!
//! ## Architecture
//!
//! - **Domain Layer:** keyspace metric, routing key rotation and the analyzers
//! - **Ports Layer:** trait definitions for the host router's state
//! - **Service Layer:** snapshot, run every analyzer, rank
//! - **Adapters Layer:** in-memory stores, snapshot files, config providers
//!
//! ## Example
//!
//! ```rust
//! use ns_01_sybil_analysis::{distance_log2, RouterHash};
//!
//! let a = RouterHash::new([0u8; 32]);
//! let mut bytes = [0u8; 32];
//! bytes[31] = 1;
//! let b = RouterHash::new(bytes);
//!
//! assert_eq!(distance_log2(&a, &b).value(), 0.0);
//! assert_eq!(distance_log2(&a, &a).value(), -1.0);
//! ```

// =============================================================================
// CORE MODULES
// =============================================================================

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

/// Test utilities (FixedTimeSource, candidate builders)
/// Requires feature: `test-utils`
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// =============================================================================
// CORE RE-EXPORTS
// =============================================================================

// Domain entities
pub use domain::{
    AnalysisError, AuxiliarySignal, BanEntry, CandidateInfo, FamilyVerdict, IpAddr,
    KeyspaceDistance, LocalDestination, RouterAddress, RouterHash, RoutingKey, Timestamp,
};

// Keyspace metric
pub use domain::{distance_log2, find_k_closest, sort_candidates, xor_distance, SortKey};

// Analyzers and reports
pub use domain::{
    AddressClusterAnalyzer, ClusterGroup, ClusterReport, KeyProximityAnalyzer, KeyProximityReport,
    PairReport, PairwiseProximityAnalyzer, ProfileSignalAnalyzer, Reason, RoutingKeyGenerator,
    ScoreBoard, Severity, SybilConfig, ThreatEntry, TimelineDay,
};

// Port traits
pub use ports::{
    Banlist, CandidateSource, ConfigProvider, FamilyVerifier, LocalDestinations, LocalRouter,
    ProfileSource, RoutingKeyTransform, SybilAnalysisApi, TimeSource,
};

// Service
pub use service::{AnalysisReport, Collaborators, FloodfillSummary, SybilAnalysisService};

// =============================================================================
// ADAPTER RE-EXPORTS
// =============================================================================

pub use adapters::{
    ConfigError, InMemoryNetDb, InMemoryProfiles, SnapshotFile, StaticConfigProvider, StaticDestinations,
    StaticFamilyVerifier, StaticLocalRouter, SystemTimeSource,
};

#[cfg(feature = "toml-config")]
pub use adapters::TomlConfigProvider;
