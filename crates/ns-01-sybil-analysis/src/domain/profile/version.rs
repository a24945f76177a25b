//! Dotted numeric release versions.

use std::cmp::Ordering;
use std::fmt;

/// A release version such as `0.9.62`.
///
/// A trailing build suffix after `-` is ignored. Missing trailing
/// components compare as zero, so `2.5` equals `2.5.0`.
#[derive(Debug, Clone, Eq)]
pub struct ReleaseVersion {
    parts: Vec<u32>,
}

impl ReleaseVersion {
    /// Parse a dotted numeric version. `None` for anything else.
    pub fn parse(s: &str) -> Option<Self> {
        let core = s.trim().split('-').next()?;
        if core.is_empty() {
            return None;
        }
        let parts = core
            .split('.')
            .map(|p| {
                if p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit()) {
                    None
                } else {
                    p.parse::<u32>().ok()
                }
            })
            .collect::<Option<Vec<_>>>()?;
        Some(Self { parts })
    }

    fn part(&self, i: usize) -> u32 {
        self.parts.get(i).copied().unwrap_or(0)
    }

    /// Releases `other` is behind `self`.
    ///
    /// Counted at the first component where the two differ, so
    /// `0.9.62` vs `0.9.58` is 4. Zero when `other` is not older.
    pub fn releases_ahead_of(&self, other: &ReleaseVersion) -> u32 {
        let len = self.parts.len().max(other.parts.len());
        for i in 0..len {
            let (ours, theirs) = (self.part(i), other.part(i));
            if ours != theirs {
                return ours.saturating_sub(theirs);
            }
        }
        0
    }
}

impl PartialEq for ReleaseVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl PartialOrd for ReleaseVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ReleaseVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.parts.len().max(other.parts.len());
        (0..len)
            .map(|i| self.part(i).cmp(&other.part(i)))
            .find(|o| o.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.parts.iter().map(u32::to_string).collect();
        f.write_str(&parts.join("."))
    }
}
