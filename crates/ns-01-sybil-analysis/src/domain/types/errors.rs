//! Domain errors for Sybil analysis.

use thiserror::Error;

/// Errors that can end an analysis run.
///
/// Missing or malformed optional data never produces an error; the affected
/// candidate is simply left out of that one heuristic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// The candidate snapshot was empty, so no averages can be taken.
    #[error("No known floodfills")]
    NoKnownFloodfills,

    /// Configuration rejected by validation.
    #[error("Invalid configuration: {0}")]
    Config(String),
}
