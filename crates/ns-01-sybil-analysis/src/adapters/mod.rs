//! # Adapters
//!
//! Concrete implementations of the outbound ports.
//!
//! - `config` - static and TOML configuration providers
//! - `time` - system and fixed clocks
//! - `memory` - in-memory network database, profiles and local state
//! - `snapshot_file` - JSON dump of a network database for offline runs
//!
//! ## Feature Flags
//!
//! - `toml-config` - enables `TomlConfigProvider`

// Semantic submodules
/// Configuration providers
pub mod config;
/// In-memory host state
pub mod memory;
/// Offline snapshot files
pub mod snapshot_file;
/// Time source adapters
pub mod time;

// Re-export public API
pub use config::{ConfigError, StaticConfigProvider};
pub use memory::{
    InMemoryNetDb, InMemoryProfiles, StaticDestinations, StaticFamilyVerifier, StaticLocalRouter,
};
pub use snapshot_file::{FamilyRecord, LocalRecord, ProfileRecord, SnapshotError, SnapshotFile};
pub use time::{FixedTimeSource, SystemTimeSource};

#[cfg(feature = "toml-config")]
pub use config::TomlConfigProvider;

#[cfg(test)]
mod tests;
