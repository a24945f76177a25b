//! Offline network database snapshots.
//!
//! A snapshot file is a JSON dump of everything the engine reads from a
//! running router. Loading one yields a full set of collaborators, so an
//! analysis can be repeated away from the router that produced it.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::memory::{
    InMemoryNetDb, InMemoryProfiles, StaticDestinations, StaticFamilyVerifier, StaticLocalRouter,
};
use super::time::{FixedTimeSource, SystemTimeSource};
use crate::domain::{
    AuxiliarySignal, CandidateInfo, FamilyVerdict, IpAddr, LocalDestination, RouterHash, Timestamp,
};
use crate::ports::TimeSource;
use crate::service::Collaborators;

/// Errors while reading or writing a snapshot file.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// File I/O error.
    #[error("Failed to access snapshot {path}: {source}")]
    Io {
        /// Path of the snapshot file.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Malformed JSON.
    #[error("Malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

/// Our own router as recorded in a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalRecord {
    /// Our identity.
    pub hash: RouterHash,
    /// Our published descriptor.
    #[serde(default)]
    pub info: Option<CandidateInfo>,
    /// Fallback IPv4 from the transports.
    #[serde(default)]
    pub last_known_ipv4: Option<IpAddr>,
    /// Fallback IPv6 from the transports.
    #[serde(default)]
    pub last_known_ipv6: Option<IpAddr>,
    /// Family we belong to.
    #[serde(default)]
    pub family: Option<String>,
}

/// Profile of one router.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    /// Router identity.
    pub hash: RouterHash,
    /// Recorded signals.
    #[serde(flatten)]
    pub signal: AuxiliarySignal,
}

/// Outcome of one family signature check made by the router.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyRecord {
    /// Claimed family.
    pub family: String,
    /// Claiming router.
    pub member: RouterHash,
    /// Check result.
    pub verdict: FamilyVerdict,
}

/// Complete snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotFile {
    /// When the snapshot was taken. Replays use this as "now".
    #[serde(default)]
    pub taken_at: Option<Timestamp>,
    /// Our router.
    pub local: LocalRecord,
    /// Every router descriptor in the network database.
    #[serde(default)]
    pub routers: Vec<CandidateInfo>,
    /// Peer profiles.
    #[serde(default)]
    pub profiles: Vec<ProfileRecord>,
    /// Family checks. Unlisted claims are unverified.
    #[serde(default)]
    pub families: Vec<FamilyRecord>,
    /// Our published destinations.
    #[serde(default)]
    pub destinations: Vec<LocalDestination>,
}

impl SnapshotFile {
    /// Read a snapshot from `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SnapshotError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|source| SnapshotError::Io {
            path: path.as_ref().display().to_string(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parse a snapshot from JSON text.
    pub fn parse(content: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Write the snapshot to `path` as pretty JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SnapshotError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json).map_err(|source| SnapshotError::Io {
            path: path.as_ref().display().to_string(),
            source,
        })
    }

    /// Build collaborators serving this snapshot.
    ///
    /// The clock reads `now` when given, else `taken_at`, else the system
    /// clock.
    pub fn into_collaborators(self, now: Option<Timestamp>) -> Collaborators {
        let profiles = InMemoryProfiles::new();
        for record in self.profiles {
            profiles.set_signal(record.hash, record.signal);
        }

        let mut families = StaticFamilyVerifier::new();
        if let Some(ours) = &self.local.family {
            families = families.with_our_family(ours.clone());
        }
        for record in self.families {
            families = match record.verdict {
                FamilyVerdict::Verified => families.verified(record.family, record.member),
                FamilyVerdict::Invalid => families.invalid(record.family, record.member),
                FamilyVerdict::Unverified => families,
            };
        }

        let mut local = StaticLocalRouter::new(self.local.hash)
            .with_last_known(self.local.last_known_ipv4, self.local.last_known_ipv6);
        if let Some(info) = self.local.info {
            local = local.with_info(info);
        }

        let time_source: Box<dyn TimeSource> = match now.or(self.taken_at) {
            Some(at) => Box::new(FixedTimeSource::at(at)),
            None => Box::new(SystemTimeSource::new()),
        };

        Collaborators {
            netdb: Box::new(InMemoryNetDb::with_routers(self.routers)),
            local: Box::new(local),
            profiles: Box::new(profiles.clone()),
            banlist: Box::new(profiles),
            families: Box::new(families),
            destinations: Box::new(StaticDestinations(self.destinations)),
            time_source,
        }
    }
}
