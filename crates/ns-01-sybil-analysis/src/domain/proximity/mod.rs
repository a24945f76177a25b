//! # Keyspace Proximity Analysis
//!
//! Honest floodfill identities are uniformly distributed in the keyspace.
//! Identities that sit unusually close to each other, or to a key we care
//! about, were most likely ground out on purpose.
//!
//! - `pairwise` - closest candidate pairs and the population mean
//! - `baseline` - expected distance from a random key to its nearest candidate
//! - `key` - closest candidates to our keys and our destinations' keys
//! - `timeline` - suspects against a victim's routing key over several days

// Semantic submodules
mod baseline;
mod config;
mod key;
mod pairwise;
mod timeline;

// Re-export public API
pub use baseline::random_baseline;
pub use config::ProximityConfig;
pub use key::{DistanceStats, KeyProximityAnalyzer, KeyProximityEntry, KeyProximityReport, Severity};
pub use pairwise::{ClosePair, PairReport, PairwiseProximityAnalyzer};
pub use timeline::{victim_timeline, TimelineDay, TimelineEntry};
