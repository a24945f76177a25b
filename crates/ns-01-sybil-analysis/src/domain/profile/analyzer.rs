//! Peer health and descriptor signals.

use std::collections::HashMap;

use tracing::debug;

use super::config::ProfileConfig;
use super::version::ReleaseVersion;
use crate::domain::{AuxiliarySignal, CandidateInfo, RouterHash, ScoreBoard, Timestamp};

/// Converts ban status, age, lookup failures, reachability and version
/// skew into score deltas.
///
/// Every signal is optional. A candidate without a profile, without a
/// version string, or when our own version is unknown is simply not scored
/// for that signal.
pub struct ProfileSignalAnalyzer<'a> {
    config: &'a ProfileConfig,
}

impl<'a> ProfileSignalAnalyzer<'a> {
    /// Create an analyzer.
    pub fn new(config: &'a ProfileConfig) -> Self {
        Self { config }
    }

    /// Score every candidate.
    ///
    /// Profile-derived rates (first heard, lookup failures) only apply to
    /// floodfills; descriptor signals apply to every candidate given.
    pub fn analyze(
        &self,
        candidates: &[CandidateInfo],
        signals: &HashMap<RouterHash, AuxiliarySignal>,
        our_version: Option<&str>,
        now: Timestamp,
        board: &mut ScoreBoard,
    ) {
        let ours = our_version.and_then(ReleaseVersion::parse);
        if ours.is_none() {
            debug!("[ns-01] Own version unknown or unparseable, skipping version skew");
        }

        for c in candidates {
            if let Some(signal) = signals.get(&c.hash) {
                self.ban_points(c, signal, board);
                if c.is_floodfill() {
                    self.new_router_points(c, signal, now, board);
                    self.lookup_points(c, signal, board);
                }
            }
            if !c.is_reachable() {
                board.add_points(
                    c.hash,
                    self.config.unreachable,
                    format!("Unreachable: {}", c.capabilities),
                );
            }
            if let Some(ours) = &ours {
                self.version_points(c, ours, board);
            }
        }
    }

    fn ban_points(&self, c: &CandidateInfo, signal: &AuxiliarySignal, board: &mut ScoreBoard) {
        let Some(entry) = &signal.banned else { return };
        let reason = match entry.cause.as_deref() {
            Some(cause) if !cause.is_empty() => format!("Banlisted: {cause}"),
            _ => "Banlisted".to_string(),
        };
        board.add_points(c.hash, self.config.banlist, reason);
    }

    /// Linear from `new_router` at age zero down to nothing at the window edge.
    fn new_router_points(
        &self,
        c: &CandidateInfo,
        signal: &AuxiliarySignal,
        now: Timestamp,
        board: &mut ScoreBoard,
    ) {
        let Some(heard) = signal.first_heard else { return };
        if heard.as_secs() == 0 {
            return;
        }
        let window = self.config.new_window_secs;
        let age = now.secs_since(heard).max(1);
        if age >= window || window == 0 {
            return;
        }
        let per_point = window as f64 / self.config.new_router;
        let points = self.config.new_router.min((window - age) as f64 / per_point);
        board.add_points(
            c.hash,
            points,
            format!("First heard about: {} ago", format_age(age)),
        );
    }

    fn lookup_points(&self, c: &CandidateInfo, signal: &AuxiliarySignal, board: &mut ScoreBoard) {
        let Some(rate) = signal.lookup_failure_rate else { return };
        let pct = 100.0 * rate.clamp(0.0, 1.0);
        if pct > self.config.lookup_fail_floor_pct {
            let points = (pct - self.config.lookup_fail_floor_pct) / self.config.lookup_fail_divisor;
            board.add_points(c.hash, points, format!("Lookup fail rate {}%", pct.round() as u32));
        }
    }

    fn version_points(&self, c: &CandidateInfo, ours: &ReleaseVersion, board: &mut ScoreBoard) {
        let version = c.version.trim();
        if version.is_empty() {
            return;
        }
        match ReleaseVersion::parse(version) {
            None => board.add_points(
                c.hash,
                self.config.bad_version,
                format!("Strange version {version}"),
            ),
            Some(theirs) => {
                let behind = ours.releases_ahead_of(&theirs);
                if behind >= self.config.min_versions_behind {
                    board.add_points(
                        c.hash,
                        f64::from(behind) * self.config.version_factor,
                        format!("{behind} versions behind: {version}"),
                    );
                }
            }
        }
    }
}

/// "2h 5m", "1d 3h", "45s".
fn format_age(secs: u64) -> String {
    let (d, h, m) = (secs / 86_400, (secs % 86_400) / 3600, (secs % 3600) / 60);
    if d > 0 {
        format!("{d}d {h}h")
    } else if h > 0 {
        format!("{h}h {m}m")
    } else if m > 0 {
        format!("{m}m")
    } else {
        format!("{secs}s")
    }
}
