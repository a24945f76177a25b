//! Tests for adapters

use super::*;
use crate::domain::{AnalysisError, FamilyVerdict, SybilConfig, Timestamp};
use crate::ports::{
    Banlist, CandidateSource, ConfigProvider, FamilyVerifier, LocalRouter, ProfileSource,
    SybilAnalysisApi, TimeSource,
};
use crate::service::SybilAnalysisService;
use crate::test_utils::{hash, CandidateBuilder};

// =============================================================================
// TEST GROUP 1: Configuration providers
// =============================================================================

#[test]
fn test_static_provider_returns_given_config() {
    let mut config = SybilConfig::default();
    config.analyze_all_routers = true;
    let provider = StaticConfigProvider::new().with_config(config.clone());
    assert_eq!(provider.get_sybil_config(), config);
}

#[cfg(feature = "toml-config")]
#[test]
fn test_toml_partial_tables_keep_defaults() {
    let toml = r#"
        analyze_all_routers = true

        [clusters]
        same_ip = 7.5
        family_exempt_24 = ["dreadnought"]

        [routing]
        period_secs = 43200

        [report]
        min_display_points = 8.0
    "#;

    let config = TomlConfigProvider::parse(toml).unwrap().get_sybil_config();

    assert!(config.analyze_all_routers);
    assert_eq!(config.clusters.same_ip, 7.5);
    assert_eq!(config.clusters.same_24, 4.0);
    assert_eq!(config.clusters.family_exempt_24, vec!["dreadnought".to_string()]);
    assert_eq!(config.rotation.period_secs, 43200);
    assert_eq!(config.proximity.min_close, 242.0);
    assert_eq!(config.display_threshold(), 8.0);
}

#[cfg(feature = "toml-config")]
#[test]
fn test_toml_empty_file_is_default() {
    let config = TomlConfigProvider::parse("").unwrap().get_sybil_config();
    assert_eq!(config, SybilConfig::default());
}

#[cfg(feature = "toml-config")]
#[test]
fn test_toml_invalid_values_rejected() {
    let err = TomlConfigProvider::parse("[routing]\nperiod_secs = 0\n").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(AnalysisError::Config(_))));
}

#[cfg(feature = "toml-config")]
#[test]
fn test_toml_syntax_error() {
    let err = TomlConfigProvider::parse("[clusters\nsame_ip = ").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[cfg(feature = "toml-config")]
#[test]
fn test_toml_missing_file() {
    let err = TomlConfigProvider::load("/nonexistent/ns-sybil.toml").unwrap_err();
    assert!(err.to_string().contains("/nonexistent/ns-sybil.toml"));
}

// =============================================================================
// TEST GROUP 2: In-memory stores
// =============================================================================

#[test]
fn test_netdb_splits_floodfills() {
    let db = InMemoryNetDb::with_routers([
        CandidateBuilder::floodfill(hash(1)).build(),
        CandidateBuilder::router(hash(2)).build(),
    ]);

    assert_eq!(db.len(), 2);
    assert_eq!(db.floodfills().len(), 1);
    assert_eq!(db.all_routers().len(), 2);

    db.remove(&hash(1));
    assert!(db.floodfills().is_empty());
}

#[test]
fn test_netdb_clones_share_state() {
    let db = InMemoryNetDb::new();
    let handle = db.clone();
    db.store(CandidateBuilder::floodfill(hash(1)).build());
    assert_eq!(handle.len(), 1);
}

#[test]
fn test_profiles_ban_and_unban() {
    let profiles = InMemoryProfiles::new();
    profiles.ban(hash(1), Some("Sybil".to_string()));

    assert_eq!(
        profiles.ban_entry(&hash(1)).and_then(|b| b.cause),
        Some("Sybil".to_string())
    );
    assert!(profiles.signal(&hash(1)).is_none());

    profiles.unban(&hash(1));
    assert!(profiles.ban_entry(&hash(1)).is_none());
}

#[test]
fn test_family_verifier_defaults_to_unverified() {
    let verifier = StaticFamilyVerifier::new()
        .with_our_family("home")
        .verified("home", hash(1))
        .invalid("other", hash(2));
    let c1 = CandidateBuilder::floodfill(hash(1)).build();
    let c2 = CandidateBuilder::floodfill(hash(2)).build();

    assert_eq!(verifier.our_family().as_deref(), Some("home"));
    assert_eq!(verifier.verify("home", &c1), FamilyVerdict::Verified);
    assert_eq!(verifier.verify("other", &c1), FamilyVerdict::Unverified);
    assert_eq!(verifier.verify("other", &c2), FamilyVerdict::Invalid);
}

#[test]
fn test_time_sources() {
    assert_eq!(FixedTimeSource::new(42).now(), Timestamp::new(42));
    assert!(SystemTimeSource::new().now().as_secs() > 1_600_000_000);
}

// =============================================================================
// TEST GROUP 3: Snapshot files
// =============================================================================

fn sample_snapshot() -> String {
    let us = hash(0x11).to_hex();
    let a = hash(0x61).to_hex();
    let b = hash(0x62).to_hex();
    let c = hash(0x63).to_hex();
    format!(
        r#"{{
            "taken_at": 1710468000,
            "local": {{ "hash": "{us}", "family": "home" }},
            "routers": [
                {{ "hash": "{a}", "capabilities": "fR", "version": "0.9.62",
                   "addresses": [{{ "ip": "203.0.113.5", "transport": "SSU2", "cost": 8 }}] }},
                {{ "hash": "{b}", "capabilities": "fR", "version": "0.9.62",
                   "addresses": [{{ "ip": "203.0.113.5", "transport": "SSU2", "cost": 8 }}] }},
                {{ "hash": "{c}", "capabilities": "fR", "family": "home" }}
            ],
            "profiles": [
                {{ "hash": "{a}", "banned": {{ "cause": "Sybil" }} }}
            ],
            "families": [
                {{ "family": "home", "member": "{c}", "verdict": "verified" }}
            ]
        }}"#
    )
}

#[test]
fn test_snapshot_parses_and_replays() {
    let snapshot = SnapshotFile::parse(&sample_snapshot()).unwrap();
    assert_eq!(snapshot.taken_at, Some(Timestamp::new(1_710_468_000)));
    assert_eq!(snapshot.routers.len(), 3);

    let deps = snapshot.into_collaborators(None);
    assert_eq!(deps.time_source.now(), Timestamp::new(1_710_468_000));
    assert_eq!(deps.local.router_hash(), hash(0x11));

    let report = SybilAnalysisService::new(SybilConfig::for_testing(), deps)
        .analyze(None)
        .unwrap();

    // same IP 5 + same /24 4 + banlist 10
    assert_eq!(report.threat(&hash(0x61)).unwrap().total, 19.0);
    assert_eq!(report.threat(&hash(0x62)).unwrap().total, 9.0);
    assert_eq!(report.threat(&hash(0x63)).unwrap().total, -100.0);
}

#[test]
fn test_snapshot_now_override() {
    let snapshot = SnapshotFile::parse(&sample_snapshot()).unwrap();
    let deps = snapshot.into_collaborators(Some(Timestamp::new(5)));
    assert_eq!(deps.time_source.now(), Timestamp::new(5));
}

#[test]
fn test_snapshot_requires_local_router() {
    let err = SnapshotFile::parse(r#"{ "routers": [] }"#).unwrap_err();
    assert!(matches!(err, SnapshotError::Json(_)));
}

#[test]
fn test_snapshot_save_and_load() {
    let snapshot = SnapshotFile::parse(&sample_snapshot()).unwrap();
    let path = std::env::temp_dir().join(format!("ns-sybil-snapshot-{}.json", std::process::id()));

    snapshot.save(&path).unwrap();
    let loaded = SnapshotFile::load(&path).unwrap();
    let _ = std::fs::remove_file(&path);

    assert_eq!(loaded, snapshot);
}

#[test]
fn test_snapshot_hash_must_be_hex() {
    let err = SnapshotFile::parse(r#"{ "local": { "hash": "zz" } }"#).unwrap_err();
    assert!(err.to_string().starts_with("Malformed snapshot"));
}
