//! # Profile Signals
//!
//! Auxiliary evidence from the peer profile store and the router
//! descriptor itself: bans, very new floodfills, failing lookups, missing
//! reachability and outdated or odd version strings.

// Semantic submodules
mod analyzer;
mod config;
mod version;

// Re-export public API
pub use analyzer::ProfileSignalAnalyzer;
pub use config::ProfileConfig;
pub use version::ReleaseVersion;
