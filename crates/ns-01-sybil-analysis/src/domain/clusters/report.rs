//! Cluster report types.

use serde::{Deserialize, Serialize};

use crate::domain::RouterHash;

/// One group of routers sharing an address prefix or family tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterGroup {
    /// Shared attribute, e.g. `203.0.113.5`, `203.0.113.0/24` or a family name.
    pub label: String,
    /// Members ordered by hash.
    pub members: Vec<RouterHash>,
    /// One-line description, e.g. "3 floodfills with IP 203.0.113.5".
    pub summary: String,
}

impl ClusterGroup {
    /// Number of members.
    pub fn count(&self) -> usize {
        self.members.len()
    }
}

/// Address and family clusters found in one snapshot.
///
/// Groups inside each list are ordered by size descending, then label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterReport {
    /// Exact IPv4 address groups.
    pub same_ip: Vec<ClusterGroup>,
    /// IPv4 /24 groups.
    pub same_24: Vec<ClusterGroup>,
    /// IPv4 /16 groups.
    pub same_16: Vec<ClusterGroup>,
    /// IPv6 /64 groups.
    pub same_64: Vec<ClusterGroup>,
    /// IPv6 /48 groups.
    pub same_48: Vec<ClusterGroup>,
    /// Declared family groups, including singletons that were scored.
    pub same_family: Vec<ClusterGroup>,
    /// Routers sharing an address prefix with us, most specific tier first.
    pub near_us: Vec<ClusterGroup>,
}

impl ClusterReport {
    /// True when no cluster of any kind was found.
    pub fn is_empty(&self) -> bool {
        self.same_ip.is_empty()
            && self.same_24.is_empty()
            && self.same_16.is_empty()
            && self.same_64.is_empty()
            && self.same_48.is_empty()
            && self.same_family.is_empty()
            && self.near_us.is_empty()
    }
}

/// "3 floodfills" / "1 floodfill".
pub(crate) fn counted(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

/// "1 other" / "2 others".
pub(crate) fn others(count: usize) -> String {
    if count == 1 {
        "1 other".to_string()
    } else {
        format!("{count} others")
    }
}

pub(crate) fn sort_groups(groups: &mut [ClusterGroup]) {
    groups.sort_by(|a, b| {
        b.count()
            .cmp(&a.count())
            .then_with(|| a.label.cmp(&b.label))
    });
}
