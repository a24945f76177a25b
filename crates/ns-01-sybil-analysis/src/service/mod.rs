//! # Sybil Analysis Service
//!
//! High-level service implementing the `SybilAnalysisApi` port.
//!
//! The service owns the configuration and the host collaborators. Each
//! request copies a snapshot out of the collaborators, runs every domain
//! analyzer over it and assembles the ranked report.

// Semantic submodules
mod api;
mod core;
mod report;
mod snapshot;

// Re-export public API
pub use core::{Collaborators, SybilAnalysisService};
pub use report::{AnalysisReport, FloodfillSummary};
