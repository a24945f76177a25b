//! # Integration Flows
//!
//! End-to-end runs through `SybilAnalysisApi` against in-memory and
//! snapshot-backed collaborators.

pub mod flows;
pub mod snapshot_replay;
