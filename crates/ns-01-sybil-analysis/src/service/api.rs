use tracing::{debug, info, warn};

use super::core::SybilAnalysisService;
use super::report::{AnalysisReport, FloodfillSummary};
use super::snapshot::Snapshot;
use crate::domain::{
    random_baseline, victim_timeline, AddressClusterAnalyzer, AnalysisError, KeyProximityAnalyzer,
    KeyProximityReport, PairwiseProximityAnalyzer, ProfileSignalAnalyzer, RouterHash, RoutingKey,
    ScoreBoard, TimelineDay, MIN_BLOCK_POINTS,
};
use crate::ports::SybilAnalysisApi;

impl SybilAnalysisApi for SybilAnalysisService {
    fn analyze(&self, victim: Option<RouterHash>) -> Result<AnalysisReport, AnalysisError> {
        self.config.validate()?;
        let cfg = &self.config;
        let snap = Snapshot::take(&self.deps, cfg.analyze_all_routers);

        if snap.floodfills.is_empty() {
            warn!("[ns-01] No known floodfills, nothing to analyze");
            return Err(AnalysisError::NoKnownFloodfills);
        }
        info!(
            "[ns-01] Analyzing {} floodfills ({} routers)",
            snap.floodfills.len(),
            snap.candidates.len()
        );

        if cfg.report.block_threshold < MIN_BLOCK_POINTS {
            warn!(
                "[ns-01] Block threshold {:.2} raised to {:.2}",
                cfg.report.block_threshold, MIN_BLOCK_POINTS
            );
        }

        let mut board = ScoreBoard::new();

        let noun = if cfg.analyze_all_routers { "router" } else { "floodfill" };
        let clusters = AddressClusterAnalyzer::new(&cfg.clusters).with_noun(noun).analyze(
            &snap.candidates,
            &snap.our_addresses,
            self.deps.families.as_ref(),
            &mut board,
        );

        let pairs = PairwiseProximityAnalyzer::new(&cfg.proximity).analyze(&snap.floodfills, &mut board);
        let baseline = random_baseline(
            &snap.floodfills,
            cfg.proximity.baseline_samples,
            cfg.proximity.baseline_seed,
        );
        debug!(
            "[ns-01] Pair mean {:?}, random-key baseline {:?}",
            pairs.average_distance, baseline
        );

        let key_proximity = self.key_reports(&snap, victim, baseline, &mut board);

        ProfileSignalAnalyzer::new(&cfg.profile).analyze(
            &snap.candidates,
            &snap.signals,
            snap.our_version.as_deref(),
            snap.now,
            &mut board,
        );

        let threats = board.ranked_descending();
        let report = AnalysisReport {
            generated_at: snap.now,
            summary: FloodfillSummary {
                known_floodfills: snap.floodfills.len(),
                analyzed_routers: snap.candidates.len(),
                avg_min_distance: baseline,
                avg_pair_distance: pairs.average_distance,
            },
            clusters,
            pairs,
            key_proximity,
            threats,
            display_threshold: cfg.display_threshold(),
            block_threshold: cfg.block_threshold(),
        };

        info!(
            "[ns-01] Analysis done: {} scored, {} above display threshold {:.2}",
            report.threats.len(),
            report.visible().count(),
            report.display_threshold
        );
        Ok(report)
    }

    fn victim_timeline(
        &self,
        victim: RouterHash,
        suspects: &[RouterHash],
    ) -> Result<Vec<TimelineDay>, AnalysisError> {
        self.config.validate()?;
        let days = victim_timeline(
            self.keys.as_ref(),
            &victim,
            suspects,
            self.now(),
            &self.config.proximity,
        );
        debug!(
            "[ns-01] Timeline for {}: {} suspects over {} days",
            victim.short(),
            suspects.len(),
            days.len()
        );
        Ok(days)
    }
}

impl SybilAnalysisService {
    /// Keys of interest: our routing key today and tomorrow, our raw
    /// identity, each published destination today and tomorrow, and the
    /// victim's routing key when one was named.
    fn key_reports(
        &self,
        snap: &Snapshot,
        victim: Option<RouterHash>,
        baseline: Option<f64>,
        board: &mut ScoreBoard,
    ) -> Vec<KeyProximityReport> {
        let keys = self.keys.as_ref();
        let mut targets: Vec<(String, RoutingKey)> = vec![
            ("our rkey".to_string(), keys.current_key(&snap.us, snap.now)),
            ("our rkey (tomorrow)".to_string(), keys.next_key(&snap.us, snap.now)),
            ("our router".to_string(), RoutingKey::new(*snap.us.as_bytes())),
        ];
        for dest in &snap.destinations {
            let label = dest.label();
            targets.push((label.clone(), keys.current_key(&dest.hash, snap.now)));
            targets.push((format!("{label} (tomorrow)"), keys.next_key(&dest.hash, snap.now)));
        }
        if let Some(v) = victim.filter(|v| *v != snap.us) {
            targets.push((format!("victim {}", v.short()), keys.current_key(&v, snap.now)));
            targets.push((
                format!("victim {} (tomorrow)", v.short()),
                keys.next_key(&v, snap.now),
            ));
        }

        let analyzer = KeyProximityAnalyzer::new(&self.config.proximity);
        targets
            .iter()
            .map(|(label, key)| analyzer.analyze(key, label, &snap.floodfills, baseline, board))
            .collect()
    }
}
