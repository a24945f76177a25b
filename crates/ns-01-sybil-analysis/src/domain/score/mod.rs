//! # Threat Score Aggregation
//!
//! Every heuristic reports into one `ScoreBoard`; the board ranks routers
//! by accumulated points with the reason trail attached.

// Semantic submodules
mod board;

// Re-export public API
pub use board::{Reason, ScoreBoard, ThreatEntry};

#[cfg(test)]
mod tests;
