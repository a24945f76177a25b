use crate::domain::Timestamp;
use crate::ports::TimeSource;

// ============================================================================
// SystemTimeSource - Production Time Source
// ============================================================================

/// Production time source using the system clock.
///
/// # Example
///
/// ```rust
/// use ns_01_sybil_analysis::adapters::SystemTimeSource;
/// use ns_01_sybil_analysis::ports::TimeSource;
///
/// let time_source = SystemTimeSource::new();
/// let now = time_source.now();
/// assert!(now.as_secs() > 0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl SystemTimeSource {
    /// Create a new system time source.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Timestamp {
        use std::time::{SystemTime, UNIX_EPOCH};

        let duration = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();

        Timestamp::new(duration.as_secs())
    }
}

// ============================================================================
// FixedTimeSource - Replays and tests
// ============================================================================

/// Time source pinned to one instant.
///
/// Used to replay a snapshot as of the moment it was taken.
#[derive(Debug, Clone, Copy)]
pub struct FixedTimeSource(Timestamp);

impl FixedTimeSource {
    /// Clock that always reads `secs`.
    #[must_use]
    pub fn new(secs: u64) -> Self {
        Self(Timestamp::new(secs))
    }

    /// Clock that always reads `at`.
    #[must_use]
    pub fn at(at: Timestamp) -> Self {
        Self(at)
    }
}

impl TimeSource for FixedTimeSource {
    fn now(&self) -> Timestamp {
        self.0
    }
}
