//! # Ports Layer - Hexagonal Architecture Boundaries
//!
//! - **Driving Ports (Inbound):** the analysis API this crate exposes
//! - **Driven Ports (Outbound):** the router state it reads from the host
//!
//! Every outbound port returns owned data. The service copies what it needs
//! at the start of a run, so no host lock is held while the analysis runs.

pub mod inbound;
pub mod outbound;

pub use inbound::SybilAnalysisApi;
pub use outbound::{
    Banlist, CandidateSource, ConfigProvider, FamilyVerifier, LocalDestinations, LocalRouter,
    ProfileSource, RoutingKeyTransform, TimeSource,
};
