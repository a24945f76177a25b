//! Day-by-day distance of suspects to a victim's routing key.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::config::ProximityConfig;
use crate::domain::keyspace::{distance_log2, xor_distance};
use crate::domain::routing_key::DAY_SECS;
use crate::domain::{KeyspaceDistance, RouterHash, RoutingKey, Timestamp};
use crate::ports::RoutingKeyTransform;

/// One suspect on one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    /// Suspect identity.
    pub hash: RouterHash,
    /// Distance to the victim's routing key that day.
    pub distance: KeyspaceDistance,
    /// Distance to the previous suspect in the list.
    pub from_previous: Option<KeyspaceDistance>,
    /// Closer than `min_close`.
    pub close: bool,
}

/// Suspects ranked against the victim's routing key for one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineDay {
    /// Offset from today in days.
    pub offset_days: i64,
    /// UTC date, `YYYY-MM-DD`.
    pub date: String,
    /// Victim's routing key that day.
    pub routing_key: RoutingKey,
    /// Closest suspects first.
    pub entries: Vec<TimelineEntry>,
}

/// Rank `suspects` against the victim's routing key for each day from
/// `timeline_days_before` days ago to `timeline_days_after` days ahead.
///
/// A group that stays close across rotations has been placed deliberately
/// against the victim rather than landing there by chance.
pub fn victim_timeline(
    transform: &dyn RoutingKeyTransform,
    victim: &RouterHash,
    suspects: &[RouterHash],
    now: Timestamp,
    config: &ProximityConfig,
) -> Vec<TimelineDay> {
    let before = i64::from(config.timeline_days_before);
    let after = i64::from(config.timeline_days_after);

    (-before..=after)
        .map(|offset| {
            let shift = offset.unsigned_abs() * DAY_SECS;
            let at = if offset < 0 {
                now.sub_secs(shift)
            } else {
                now.add_secs(shift)
            };
            let routing_key = transform.key_at(victim, at);

            let mut ranked = suspects.to_vec();
            ranked.sort_by_cached_key(|h| xor_distance(&routing_key, h));
            ranked.truncate(config.timeline_limit);

            let mut previous: Option<RouterHash> = None;
            let entries = ranked
                .into_iter()
                .map(|hash| {
                    let distance = distance_log2(&routing_key, &hash);
                    let from_previous = previous.map(|p| distance_log2(&p, &hash));
                    previous = Some(hash);
                    TimelineEntry {
                        hash,
                        distance,
                        from_previous,
                        close: distance.is_below(config.min_close),
                    }
                })
                .collect();

            TimelineDay {
                offset_days: offset,
                date: utc_date(at),
                routing_key,
                entries,
            }
        })
        .collect()
}

fn utc_date(at: Timestamp) -> String {
    i64::try_from(at.as_secs())
        .ok()
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| at.as_secs().to_string())
}
