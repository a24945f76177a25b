//! Keyspace Metric - Pure functions over the 256-bit XOR keyspace
//!
//! All functions in this module are pure (no I/O, no state mutation)
//! and deterministic (same inputs → same outputs).

// Semantic submodules
mod distance;
mod sorting;

// Re-export public API
pub use distance::{distance_log2, log2_of, xor_distance};
pub use sorting::{find_k_closest, sort_candidates, SortKey};
