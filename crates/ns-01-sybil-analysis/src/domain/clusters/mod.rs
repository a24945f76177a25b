//! # Address Cluster Analysis
//!
//! Groups candidates that share an IPv4 /32, /24 or /16, an IPv6 /64 or
//! /48, or a declared family tag. Several identities behind one address
//! block are the cheapest way to run a Sybil attack, so every member of a
//! group is penalized in proportion to the group size. Sharing a prefix with
//! us is weighted higher still.

// Semantic submodules
mod analyzer;
mod config;
mod prefix;
mod report;

// Re-export public API
pub use analyzer::{AddressClusterAnalyzer, OurAddresses};
pub use config::ClusterWeights;
pub use prefix::{SubnetKey, SubnetKind};
pub use report::{ClusterGroup, ClusterReport};
