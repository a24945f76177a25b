//! Rotation schedule for routing keys.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{AnalysisError, Timestamp};

/// Seconds per day.
pub const DAY_SECS: u64 = 24 * 60 * 60;

/// When the routing-key modifier changes.
///
/// Epoch `n` covers `[offset + n * period, offset + (n + 1) * period)`.
/// The default is one rotation per UTC day at midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationSchedule {
    /// Rotation period in seconds.
    pub period_secs: u64,
    /// Offset of the rotation instant from the Unix epoch, in seconds.
    pub offset_secs: u64,
}

impl Default for RotationSchedule {
    fn default() -> Self {
        Self {
            period_secs: DAY_SECS,
            offset_secs: 0,
        }
    }
}

impl RotationSchedule {
    /// Reject a zero period or an offset not smaller than the period.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.period_secs == 0 {
            return Err(AnalysisError::Config(
                "rotation period must be positive".to_string(),
            ));
        }
        if self.offset_secs >= self.period_secs {
            return Err(AnalysisError::Config(format!(
                "rotation offset {}s must be smaller than the period {}s",
                self.offset_secs, self.period_secs
            )));
        }
        Ok(())
    }

    /// Rotation epoch containing `at`.
    ///
    /// Instants before the first rotation belong to epoch 0.
    pub fn epoch(&self, at: Timestamp) -> u64 {
        let period = self.period_secs.max(1);
        at.as_secs().saturating_sub(self.offset_secs) / period
    }

    /// First second of `epoch`.
    pub fn epoch_start(&self, epoch: u64) -> Timestamp {
        let period = self.period_secs.max(1);
        Timestamp::new(
            epoch
                .saturating_mul(period)
                .saturating_add(self.offset_secs),
        )
    }

    /// Start of the epoch after the one containing `at`.
    pub fn next_rotation(&self, at: Timestamp) -> Timestamp {
        self.epoch_start(self.epoch(at).saturating_add(1))
    }

    /// ASCII modifier mixed into the key for `epoch`.
    ///
    /// `yyyyMMdd` of the epoch start in UTC when the period is whole days,
    /// otherwise `yyyyMMddHHmmss` so that sub-day epochs stay distinct.
    pub fn modifier(&self, epoch: u64) -> String {
        let start = self.epoch_start(epoch).as_secs();
        let pattern = if self.period_secs % DAY_SECS == 0 {
            "%Y%m%d"
        } else {
            "%Y%m%d%H%M%S"
        };
        match i64::try_from(start)
            .ok()
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        {
            Some(date) => date.format(pattern).to_string(),
            // Out of calendar range; the epoch number still keeps keys distinct.
            None => format!("epoch{epoch}"),
        }
    }
}
