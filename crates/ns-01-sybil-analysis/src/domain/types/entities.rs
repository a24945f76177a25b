//! Core Domain Entities for Sybil Analysis
//!
//! Snapshot records copied out of the network database and the peer
//! profile store at the start of an analysis run.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// 256-bit router identity (SHA-256 of the router's identity keys).
///
/// Ordering is plain byte ordering. Ranked output uses it to break ties
/// between equal scores, so it must stay total and stable.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RouterHash(pub [u8; 32]);

impl RouterHash {
    /// Create a RouterHash from raw 32-byte array.
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the underlying bytes for XOR distance calculation.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// All-zero hash, the origin of the keyspace.
    pub fn zero() -> Self {
        Self([0u8; 32])
    }

    /// Parse a 64-character hex string.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(s.trim(), &mut bytes)?;
        Ok(Self(bytes))
    }

    /// Lowercase hex encoding.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// First 8 hex characters, for log lines.
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl fmt::Debug for RouterHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RouterHash({})", self.short())
    }
}

impl fmt::Display for RouterHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl AsRef<[u8]> for RouterHash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Serialize for RouterHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for RouterHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// IP address enum supporting both IPv4 and IPv6.
///
/// Serialized in the usual textual form (`203.0.113.5`, `2001:db8::1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IpAddr {
    /// IPv4 address (4 bytes).
    V4([u8; 4]),
    /// IPv6 address (16 bytes).
    V6([u8; 16]),
}

impl IpAddr {
    /// Create an IPv4 address
    pub fn v4(a: u8, b: u8, c: u8, d: u8) -> Self {
        IpAddr::V4([a, b, c, d])
    }

    /// Create an IPv6 address from bytes
    pub fn v6(bytes: [u8; 16]) -> Self {
        IpAddr::V6(bytes)
    }

    /// Check if this is an IPv4 address
    pub fn is_ipv4(&self) -> bool {
        matches!(self, IpAddr::V4(_))
    }

    /// Check if this is an IPv6 address
    pub fn is_ipv6(&self) -> bool {
        matches!(self, IpAddr::V6(_))
    }

    /// IPv6 loopback (`::1`). Some implementations publish it.
    pub fn is_v6_loopback(&self) -> bool {
        match self {
            IpAddr::V6(bytes) => std::net::Ipv6Addr::from(*bytes).is_loopback(),
            IpAddr::V4(_) => false,
        }
    }
}

impl From<std::net::IpAddr> for IpAddr {
    fn from(ip: std::net::IpAddr) -> Self {
        match ip {
            std::net::IpAddr::V4(v4) => IpAddr::V4(v4.octets()),
            std::net::IpAddr::V6(v6) => IpAddr::V6(v6.octets()),
        }
    }
}

impl From<IpAddr> for std::net::IpAddr {
    fn from(ip: IpAddr) -> Self {
        match ip {
            IpAddr::V4(b) => std::net::IpAddr::from(b),
            IpAddr::V6(b) => std::net::IpAddr::from(b),
        }
    }
}

impl fmt::Display for IpAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        std::net::IpAddr::from(*self).fmt(f)
    }
}

impl FromStr for IpAddr {
    type Err = std::net::AddrParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<std::net::IpAddr>().map(IpAddr::from)
    }
}

impl Serialize for IpAddr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for IpAddr {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Unix timestamp in seconds
///
/// Timestamps are clamped to a reasonable maximum so that age arithmetic
/// and calendar conversion never overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Maximum reasonable timestamp (year 9999).
    pub const MAX_REASONABLE: u64 = 253_402_300_799;

    /// Create a new timestamp, clamping to MAX_REASONABLE.
    pub fn new(secs: u64) -> Self {
        Self(secs.min(Self::MAX_REASONABLE))
    }

    /// Get the underlying seconds value.
    pub fn as_secs(&self) -> u64 {
        self.0
    }

    /// Add seconds to timestamp (saturating at MAX_REASONABLE).
    pub fn add_secs(&self, secs: u64) -> Self {
        Self(self.0.saturating_add(secs).min(Self::MAX_REASONABLE))
    }

    /// Subtract seconds from timestamp (saturating at 0).
    pub fn sub_secs(&self, secs: u64) -> Self {
        Self(self.0.saturating_sub(secs))
    }

    /// Seconds elapsed since `earlier` (0 if `earlier` is in the future).
    pub fn secs_since(&self, earlier: Timestamp) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

/// One published transport address of a router.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterAddress {
    /// Host IP, absent for firewalled/introduced addresses.
    #[serde(default)]
    pub ip: Option<IpAddr>,
    /// Transport style, e.g. "NTCP2" or "SSU2".
    #[serde(default)]
    pub transport: String,
    /// Declared cost.
    #[serde(default)]
    pub cost: u8,
}

impl RouterAddress {
    /// Address with a host IP.
    pub fn new(ip: IpAddr, transport: impl Into<String>, cost: u8) -> Self {
        Self {
            ip: Some(ip),
            transport: transport.into(),
            cost,
        }
    }
}

/// Public descriptor of a candidate router, as found in the network database.
///
/// May be stale; any optional part can be missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateInfo {
    /// Router identity.
    pub hash: RouterHash,
    /// Published addresses.
    #[serde(default)]
    pub addresses: Vec<RouterAddress>,
    /// Declared family name.
    #[serde(default)]
    pub family: Option<String>,
    /// Capability flags, e.g. "XfR".
    #[serde(default)]
    pub capabilities: String,
    /// Router version string, e.g. "0.9.62".
    #[serde(default)]
    pub version: String,
    /// Publication time of the descriptor.
    #[serde(default = "unpublished")]
    pub published: Timestamp,
}

fn unpublished() -> Timestamp {
    Timestamp::new(0)
}

impl CandidateInfo {
    /// Floodfill capability flag.
    pub const CAP_FLOODFILL: char = 'f';
    /// Reachable capability flag.
    pub const CAP_REACHABLE: char = 'R';

    /// Create a descriptor with no addresses and no capabilities.
    pub fn new(hash: RouterHash) -> Self {
        Self {
            hash,
            addresses: Vec::new(),
            family: None,
            capabilities: String::new(),
            version: String::new(),
            published: unpublished(),
        }
    }

    /// First published IPv4 address.
    pub fn ipv4(&self) -> Option<[u8; 4]> {
        self.addresses.iter().find_map(|a| match a.ip {
            Some(IpAddr::V4(b)) => Some(b),
            _ => None,
        })
    }

    /// First published IPv6 address, ignoring `::1`.
    pub fn ipv6(&self) -> Option<[u8; 16]> {
        self.addresses.iter().find_map(|a| match a.ip {
            Some(ip @ IpAddr::V6(b)) if !ip.is_v6_loopback() => Some(b),
            _ => None,
        })
    }

    /// Declares the floodfill capability.
    pub fn is_floodfill(&self) -> bool {
        self.capabilities.contains(Self::CAP_FLOODFILL)
    }

    /// Declares the reachable capability.
    pub fn is_reachable(&self) -> bool {
        self.capabilities.contains(Self::CAP_REACHABLE)
    }
}

/// Banlist entry for a router.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BanEntry {
    /// Human-readable cause, if recorded.
    #[serde(default)]
    pub cause: Option<String>,
}

/// Auxiliary peer-health signals from the profile store.
///
/// Every field is optional; not every candidate has a profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuxiliarySignal {
    /// Present when the router is currently banned.
    #[serde(default)]
    pub banned: Option<BanEntry>,
    /// When we first heard about the router.
    #[serde(default)]
    pub first_heard: Option<Timestamp>,
    /// When we last heard from the router.
    #[serde(default)]
    pub last_heard: Option<Timestamp>,
    /// Failed lookup ratio over the trailing day, 0..=1.
    /// `None` when no lookups were sent.
    #[serde(default)]
    pub lookup_failure_rate: Option<f64>,
}

/// A destination hosted on this router whose lease set we publish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalDestination {
    /// Destination hash.
    pub hash: RouterHash,
    /// Display nickname.
    #[serde(default)]
    pub nickname: String,
}

impl LocalDestination {
    /// Nickname, or the first hex characters of the hash.
    pub fn label(&self) -> String {
        if self.nickname.is_empty() {
            self.hash.short()
        } else {
            self.nickname.clone()
        }
    }
}
