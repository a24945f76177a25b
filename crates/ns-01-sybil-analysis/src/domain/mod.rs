//! # Domain Layer
//!
//! Pure analysis logic. Nothing in here performs I/O; every analyzer takes
//! a snapshot slice and writes score deltas into a `ScoreBoard`.
//!
//! - `keyspace` - XOR metric and candidate orderings
//! - `routing_key` - daily routing key rotation
//! - `clusters` - address and family grouping
//! - `proximity` - pairwise, key and timeline distance analysis
//! - `profile` - ban, age, lookup, reachability and version signals
//! - `score` - per-router aggregation and ranking

pub mod clusters;
pub mod config;
pub mod keyspace;
pub mod profile;
pub mod proximity;
pub mod routing_key;
pub mod score;
pub mod types;

pub use clusters::*;
pub use config::*;
pub use keyspace::*;
pub use profile::*;
pub use proximity::*;
pub use routing_key::*;
pub use score::*;
pub use types::*;

#[cfg(test)]
mod tests;
