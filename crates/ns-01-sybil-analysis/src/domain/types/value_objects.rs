//! Value objects for the 256-bit keyspace.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::entities::RouterHash;

/// Anything that occupies a position in the 256-bit XOR keyspace.
///
/// Implemented by router identities and by derived routing keys, so that a
/// distance can be measured between either kind without conversions.
pub trait KeyspacePoint {
    /// Raw 32-byte position.
    fn key_bytes(&self) -> &[u8; 32];
}

impl KeyspacePoint for RouterHash {
    fn key_bytes(&self) -> &[u8; 32] {
        self.as_bytes()
    }
}

/// Routing key: `SHA-256(identity || modifier)` for one rotation period.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoutingKey(RouterHash);

impl RoutingKey {
    /// Wrap a raw 32-byte digest.
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(RouterHash::new(bytes))
    }

    /// Get the underlying bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        self.0.as_bytes()
    }

    /// Same bytes viewed as a plain hash, for display.
    pub fn as_hash(&self) -> RouterHash {
        self.0
    }
}

impl KeyspacePoint for RoutingKey {
    fn key_bytes(&self) -> &[u8; 32] {
        self.as_bytes()
    }
}

impl fmt::Debug for RoutingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RoutingKey({})", self.0.short())
    }
}

impl fmt::Display for RoutingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Scalar keyspace distance.
///
/// `bitLength - 1` plus the weighted bits below the leading bit, so that
/// a larger XOR always yields a larger value. Identical keys give `-1.0`.
///
/// Equality and ordering both use `f64::total_cmp`, so sorting is total
/// and `a == b` exactly when `a.cmp(&b)` is `Equal`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyspaceDistance(f64);

impl KeyspaceDistance {
    /// Distance between identical keys.
    pub const IDENTICAL: KeyspaceDistance = KeyspaceDistance(-1.0);

    /// Largest possible distance (all 256 bits set).
    pub const MAX: KeyspaceDistance = KeyspaceDistance(256.0);

    /// Wrap a raw scalar.
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    /// Get the scalar value.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// True when this distance is strictly below `threshold`.
    pub fn is_below(&self, threshold: f64) -> bool {
        self.0 < threshold
    }
}

impl PartialEq for KeyspaceDistance {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for KeyspaceDistance {}

impl PartialOrd for KeyspaceDistance {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for KeyspaceDistance {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for KeyspaceDistance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Result of checking a router's family membership claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FamilyVerdict {
    /// Signature checks out against a known family key.
    Verified,
    /// No key on file, or the claim cannot be checked.
    Unverified,
    /// Bad key or bad signature.
    Invalid,
}

impl FamilyVerdict {
    /// Whether membership was cryptographically confirmed.
    pub fn is_verified(&self) -> bool {
        matches!(self, FamilyVerdict::Verified)
    }
}
