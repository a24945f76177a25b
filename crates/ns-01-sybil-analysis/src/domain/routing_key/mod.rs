//! # Routing Key Rotation
//!
//! A router or destination is stored in the network database under a
//! routing key that changes once per rotation period. An attacker who wants
//! to surround a key has to re-position every period, so the analysis looks
//! at both the current and the next period.

// Semantic submodules
mod generator;
mod schedule;

// Re-export public API
pub use generator::RoutingKeyGenerator;
pub use schedule::{RotationSchedule, DAY_SECS};
