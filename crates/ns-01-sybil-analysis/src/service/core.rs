use crate::domain::{RoutingKeyGenerator, SybilConfig, Timestamp};
use crate::ports::{
    Banlist, CandidateSource, ConfigProvider, FamilyVerifier, LocalDestinations, LocalRouter,
    ProfileSource, RoutingKeyTransform, TimeSource,
};

/// Host state the service reads from.
pub struct Collaborators {
    /// Network database.
    pub netdb: Box<dyn CandidateSource>,
    /// Our own router.
    pub local: Box<dyn LocalRouter>,
    /// Peer profiles.
    pub profiles: Box<dyn ProfileSource>,
    /// Ban list.
    pub banlist: Box<dyn Banlist>,
    /// Family signature checks.
    pub families: Box<dyn FamilyVerifier>,
    /// Our published client destinations.
    pub destinations: Box<dyn LocalDestinations>,
    /// Time source for operations requiring timestamps.
    pub time_source: Box<dyn TimeSource>,
}

/// Sybil Analysis Service implementing the driving port.
///
/// # Example
///
/// ```rust,ignore
/// use ns_01_sybil_analysis::service::{Collaborators, SybilAnalysisService};
/// use ns_01_sybil_analysis::ports::SybilAnalysisApi;
///
/// let service = SybilAnalysisService::new(SybilConfig::default(), collaborators);
/// let report = service.analyze(None)?;
/// println!("{} threats", report.visible().count());
/// ```
pub struct SybilAnalysisService {
    pub(crate) config: SybilConfig,
    pub(crate) keys: Box<dyn RoutingKeyTransform>,
    pub(crate) deps: Collaborators,
}

impl SybilAnalysisService {
    /// Create a service whose routing keys rotate on `config.rotation`.
    pub fn new(config: SybilConfig, deps: Collaborators) -> Self {
        let keys = Box::new(RoutingKeyGenerator::new(config.rotation));
        Self { config, keys, deps }
    }

    /// Create a service with configuration from `provider`.
    pub fn from_provider(provider: &dyn ConfigProvider, deps: Collaborators) -> Self {
        Self::new(provider.get_sybil_config(), deps)
    }

    /// Use the host's routing key transform instead of the built-in one.
    #[must_use]
    pub fn with_key_transform(mut self, keys: Box<dyn RoutingKeyTransform>) -> Self {
        self.keys = keys;
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &SybilConfig {
        &self.config
    }

    /// Get the current timestamp from the time source.
    pub(crate) fn now(&self) -> Timestamp {
        self.deps.time_source.now()
    }
}
