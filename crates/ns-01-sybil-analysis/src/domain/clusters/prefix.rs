//! Address prefix keys used for clustering.

use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

use serde::{Deserialize, Serialize};

/// Prefix granularity of an address cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubnetKind {
    /// Exact IPv4 address.
    V4Slash32,
    /// IPv4 /24.
    V4Slash24,
    /// IPv4 /16.
    V4Slash16,
    /// IPv6 /64.
    V6Slash64,
    /// IPv6 /48.
    V6Slash48,
}

impl SubnetKind {
    /// Number of leading address bytes that form the key.
    pub fn prefix_bytes(self) -> usize {
        match self {
            SubnetKind::V4Slash32 => 4,
            SubnetKind::V4Slash24 => 3,
            SubnetKind::V4Slash16 => 2,
            SubnetKind::V6Slash64 => 8,
            SubnetKind::V6Slash48 => 6,
        }
    }

    /// Whether this kind applies to IPv6 addresses.
    pub fn is_ipv6(self) -> bool {
        matches!(self, SubnetKind::V6Slash64 | SubnetKind::V6Slash48)
    }

    /// Short name used in reasons, e.g. "IPv4 /24".
    pub fn name(self) -> &'static str {
        match self {
            SubnetKind::V4Slash32 => "IP",
            SubnetKind::V4Slash24 => "IPv4 /24",
            SubnetKind::V4Slash16 => "IPv4 /16",
            SubnetKind::V6Slash64 => "IPv6 /64",
            SubnetKind::V6Slash48 => "IPv6 /48",
        }
    }
}

/// Masked address prefix.
///
/// Ordering is kind first, then prefix bytes, which keeps cluster output
/// deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubnetKey {
    kind: SubnetKind,
    prefix: [u8; 8],
}

impl SubnetKey {
    /// Prefix of an IPv4 address. `kind` must be an IPv4 kind.
    pub fn from_v4(kind: SubnetKind, ip: &[u8; 4]) -> Self {
        Self::from_bytes(kind, ip)
    }

    /// Prefix of an IPv6 address. `kind` must be an IPv6 kind.
    pub fn from_v6(kind: SubnetKind, ip: &[u8; 16]) -> Self {
        Self::from_bytes(kind, ip)
    }

    fn from_bytes(kind: SubnetKind, ip: &[u8]) -> Self {
        let mut prefix = [0u8; 8];
        let n = kind.prefix_bytes().min(ip.len());
        prefix[..n].copy_from_slice(&ip[..n]);
        Self { kind, prefix }
    }

    /// Granularity of this key.
    pub fn kind(&self) -> SubnetKind {
        self.kind
    }
}

impl fmt::Display for SubnetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = &self.prefix;
        match self.kind {
            SubnetKind::V4Slash32 => write!(f, "{}", Ipv4Addr::new(p[0], p[1], p[2], p[3])),
            SubnetKind::V4Slash24 => write!(f, "{}/24", Ipv4Addr::new(p[0], p[1], p[2], 0)),
            SubnetKind::V4Slash16 => write!(f, "{}/16", Ipv4Addr::new(p[0], p[1], 0, 0)),
            SubnetKind::V6Slash64 | SubnetKind::V6Slash48 => {
                let mut full = [0u8; 16];
                full[..8].copy_from_slice(p);
                let bits = self.kind.prefix_bytes() * 8;
                write!(f, "{}/{}", Ipv6Addr::from(full), bits)
            }
        }
    }
}
