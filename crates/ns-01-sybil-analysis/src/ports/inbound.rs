//! # Driving Ports (Inbound API)

use crate::domain::{AnalysisError, RouterHash, TimelineDay};
use crate::service::AnalysisReport;

/// Primary API of the Sybil analysis engine.
///
/// Both operations are read-only over a fresh snapshot of the network
/// database. Nothing is banned, blocked or persisted.
///
/// # Example
///
/// ```rust,ignore
/// use ns_01_sybil_analysis::ports::SybilAnalysisApi;
///
/// fn worst<T: SybilAnalysisApi>(api: &T) {
///     let report = api.analyze(None).expect("floodfills known");
///     for threat in report.visible() {
///         println!("{} {:.1}", threat.hash, threat.total);
///     }
/// }
/// ```
pub trait SybilAnalysisApi {
    /// Run every heuristic once and rank the candidates.
    ///
    /// With a `victim`, its routing keys for today and tomorrow are
    /// examined in addition to ours and our destinations'.
    ///
    /// # Errors
    ///
    /// - `NoKnownFloodfills` if the snapshot has no candidates
    /// - `Config` if the configuration fails validation
    fn analyze(&self, victim: Option<RouterHash>) -> Result<AnalysisReport, AnalysisError>;

    /// Track how close `suspects` sit to the victim's routing key over
    /// the days around now.
    ///
    /// # Errors
    ///
    /// - `Config` if the configuration fails validation
    fn victim_timeline(
        &self,
        victim: RouterHash,
        suspects: &[RouterHash],
    ) -> Result<Vec<TimelineDay>, AnalysisError>;
}
