//! # Snapshot Replay
//!
//! A network captured to a snapshot file and analyzed offline must give
//! the same report as the live in-memory network it was taken from.

#[cfg(test)]
mod tests {
    use ns_01_sybil_analysis::adapters::{FamilyRecord, LocalRecord, ProfileRecord};
    use ns_01_sybil_analysis::test_utils::{hash, CandidateBuilder, TestNetwork};
    use ns_01_sybil_analysis::{
        AuxiliarySignal, BanEntry, FamilyVerdict, LocalDestination, RoutingKeyGenerator,
        SnapshotFile, SybilAnalysisApi, SybilAnalysisService, SybilConfig, Timestamp,
    };

    use crate::benchmarks::populations::{honest_floodfills, sybil_swarm};

    const NOW: u64 = 1_710_493_200;

    fn attacked_routers() -> Vec<ns_01_sybil_analysis::CandidateInfo> {
        let dest = hash(0x77);
        let key = RoutingKeyGenerator::default().effective_key(&dest, Timestamp::new(NOW));
        let mut routers = honest_floodfills(30, 11);
        routers.extend(sybil_swarm(&key, 3, 210));
        routers.push(
            CandidateBuilder::floodfill(hash(0x31))
                .family("home")
                .ipv4(192, 0, 2, 1)
                .version("0.9.58")
                .build(),
        );
        routers
    }

    fn destinations() -> Vec<LocalDestination> {
        vec![LocalDestination {
            hash: hash(0x77),
            nickname: "irc".to_string(),
        }]
    }

    fn banned_signal() -> AuxiliarySignal {
        AuxiliarySignal {
            banned: Some(BanEntry {
                cause: Some("Sybil".to_string()),
            }),
            ..AuxiliarySignal::default()
        }
    }

    fn live_network() -> TestNetwork {
        let mut network = TestNetwork::new(hash(0xEE), NOW).with_routers(attacked_routers());
        network.destinations = destinations();
        network.profiles.set_signal(hash(0x31), banned_signal());
        network.families = network.families.clone().invalid("home", hash(0x31));
        network
    }

    fn captured_snapshot() -> SnapshotFile {
        SnapshotFile {
            taken_at: Some(Timestamp::new(NOW)),
            local: LocalRecord {
                hash: hash(0xEE),
                info: None,
                last_known_ipv4: None,
                last_known_ipv6: None,
                family: None,
            },
            routers: attacked_routers(),
            profiles: vec![ProfileRecord {
                hash: hash(0x31),
                signal: banned_signal(),
            }],
            families: vec![FamilyRecord {
                family: "home".to_string(),
                member: hash(0x31),
                verdict: FamilyVerdict::Invalid,
            }],
            destinations: destinations(),
        }
    }

    #[test]
    fn test_replayed_snapshot_matches_live_run() {
        let json = serde_json::to_string(&captured_snapshot()).unwrap();
        let replayed = SnapshotFile::parse(&json).unwrap();

        let offline = SybilAnalysisService::new(SybilConfig::default(), replayed.into_collaborators(None))
            .analyze(None)
            .unwrap();
        let live = SybilAnalysisService::new(SybilConfig::default(), live_network().collaborators())
            .analyze(None)
            .unwrap();

        assert_eq!(offline, live);
    }

    #[test]
    fn test_replay_flags_swarm_and_banned_router() {
        let deps = captured_snapshot().into_collaborators(None);
        let report = SybilAnalysisService::new(SybilConfig::default(), deps)
            .analyze(None)
            .unwrap();

        assert_eq!(report.generated_at, Timestamp::new(NOW));
        assert_eq!(report.summary.known_floodfills, 34);

        let banned = report.threat(&hash(0x31)).unwrap();
        let texts: Vec<_> = banned.reasons.iter().map(|r| r.text.as_str()).collect();
        assert!(texts.contains(&"Banlisted: Sybil"));
        assert!(texts.contains(&"Bad family config \"home\""));

        let entries = &report.key_report("irc").unwrap().entries;
        assert_eq!(entries[0].distance.value(), 210.0);
    }

    #[test]
    fn test_replay_clock_override() {
        let deps = captured_snapshot().into_collaborators(Some(Timestamp::new(NOW + 86_400)));
        let report = SybilAnalysisService::new(SybilConfig::default(), deps)
            .analyze(None)
            .unwrap();

        assert_eq!(report.generated_at, Timestamp::new(NOW + 86_400));
        // the swarm was ground for yesterday's key
        let entries = &report.key_report("irc").unwrap().entries;
        assert!(entries[0].distance.value() > 220.0);
    }
}
