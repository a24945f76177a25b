//! Routing key derivation with a cached rotation modifier.

use parking_lot::RwLock;
use sha2::{Digest, Sha256};
use tracing::debug;

use super::schedule::RotationSchedule;
use crate::domain::{RouterHash, RoutingKey, Timestamp};
use crate::ports::RoutingKeyTransform;

/// Modifier of the most recent epoch seen by a reader.
#[derive(Debug)]
struct ModifierCache {
    epoch: u64,
    modifier: String,
}

/// Derives routing keys as `SHA-256(identity || modifier)`.
///
/// The modifier for the current epoch is kept in a cache that is replaced
/// the first time a caller observes a newer epoch. Readers of an older or
/// future epoch compute their modifier on the fly and leave the cache
/// alone, so the current value stays consistent for the whole period.
#[derive(Debug)]
pub struct RoutingKeyGenerator {
    schedule: RotationSchedule,
    current: RwLock<Option<ModifierCache>>,
}

impl RoutingKeyGenerator {
    /// Create a generator for the given schedule.
    pub fn new(schedule: RotationSchedule) -> Self {
        Self {
            schedule,
            current: RwLock::new(None),
        }
    }

    /// The rotation schedule in use.
    pub fn schedule(&self) -> &RotationSchedule {
        &self.schedule
    }

    /// Routing key of `identity` for the epoch containing `at`.
    pub fn effective_key(&self, identity: &RouterHash, at: Timestamp) -> RoutingKey {
        let modifier = self.modifier_at(at);
        derive(identity, &modifier)
    }

    /// Routing key of `identity` for the epoch after the one containing `now`.
    pub fn next_rotation_key(&self, identity: &RouterHash, now: Timestamp) -> RoutingKey {
        let epoch = self.schedule.epoch(now).saturating_add(1);
        derive(identity, &self.schedule.modifier(epoch))
    }

    /// Modifier string for the epoch containing `at`.
    pub fn modifier_at(&self, at: Timestamp) -> String {
        let epoch = self.schedule.epoch(at);

        {
            let cache = self.current.read();
            match cache.as_ref() {
                Some(c) if c.epoch == epoch => return c.modifier.clone(),
                Some(c) if c.epoch > epoch => return self.schedule.modifier(epoch),
                _ => {}
            }
        }

        let modifier = self.schedule.modifier(epoch);
        let mut cache = self.current.write();
        // Another reader may have advanced the cache while we waited.
        let stale = cache.as_ref().map_or(true, |c| c.epoch < epoch);
        if stale {
            debug!("[ns-01] Routing key modifier rotated to {} (epoch {})", modifier, epoch);
            *cache = Some(ModifierCache {
                epoch,
                modifier: modifier.clone(),
            });
        }
        modifier
    }
}

impl Default for RoutingKeyGenerator {
    fn default() -> Self {
        Self::new(RotationSchedule::default())
    }
}

impl RoutingKeyTransform for RoutingKeyGenerator {
    fn key_at(&self, identity: &RouterHash, at: Timestamp) -> RoutingKey {
        self.effective_key(identity, at)
    }

    fn next_key(&self, identity: &RouterHash, now: Timestamp) -> RoutingKey {
        self.next_rotation_key(identity, now)
    }
}

fn derive(identity: &RouterHash, modifier: &str) -> RoutingKey {
    let mut hasher = Sha256::new();
    hasher.update(identity.as_bytes());
    hasher.update(modifier.as_bytes());
    RoutingKey::new(hasher.finalize().into())
}
