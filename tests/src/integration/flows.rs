//! # Attack Simulation Flows
//!
//! Each test plants a known Sybil pattern in an otherwise honest network
//! and checks that the engine ranks the attackers above everyone else.
//!
//! 1. **Keyspace grinding:** identities brute-forced next to a victim's
//!    routing key for tomorrow, run from one /24
//! 2. **Family spoofing:** routers claiming our family without the key
//! 3. **Rotation tracking:** the victim timeline shows the swarm only
//!    around the day it was ground for

#[cfg(test)]
mod tests {
    use ns_01_sybil_analysis::test_utils::{hash, CandidateBuilder, TestNetwork};
    use ns_01_sybil_analysis::{
        AnalysisError, LocalDestination, RoutingKeyGenerator, Severity, SybilAnalysisApi,
        SybilAnalysisService, SybilConfig, Timestamp,
    };

    use crate::benchmarks::populations::{honest_floodfills, sybil_swarm};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    /// 2024-03-15 09:00 UTC.
    const NOW: u64 = 1_710_493_200;

    fn honest_network() -> TestNetwork {
        TestNetwork::new(hash(0xEE), NOW).with_routers(honest_floodfills(50, 7))
    }

    fn service(network: &TestNetwork) -> SybilAnalysisService {
        SybilAnalysisService::new(SybilConfig::default(), network.collaborators())
    }

    // =============================================================================
    // FLOW 1: Honest baseline
    // =============================================================================

    #[test]
    fn test_honest_network_has_no_visible_threats() {
        let report = service(&honest_network()).analyze(None).unwrap();

        assert_eq!(report.summary.known_floodfills, 50);
        assert_eq!(report.visible().count(), 0);
        let baseline = report.summary.avg_min_distance.unwrap();
        assert!(baseline > 245.0 && baseline < 256.0);
        let mean = report.summary.avg_pair_distance.unwrap();
        assert!(mean > 250.0 && mean < 256.0);
    }

    #[test]
    fn test_empty_network_is_an_error() {
        let network = TestNetwork::new(hash(0xEE), NOW);
        assert_eq!(
            service(&network).analyze(None).unwrap_err(),
            AnalysisError::NoKnownFloodfills
        );
    }

    // =============================================================================
    // FLOW 2: Keyspace grinding against a victim
    // =============================================================================

    #[test]
    fn test_swarm_around_victim_tomorrow_ranks_first() {
        let victim = hash(0x42);
        let tomorrow = RoutingKeyGenerator::default().next_rotation_key(&victim, Timestamp::new(NOW));
        let swarm = sybil_swarm(&tomorrow, 4, 200);
        let network = honest_network().with_routers(swarm.clone());

        let report = service(&network).analyze(Some(victim)).unwrap();

        let top: Vec<_> = report.threats.iter().take(4).map(|t| t.hash).collect();
        for attacker in &swarm {
            assert!(top.contains(&attacker.hash));
        }
        assert_eq!(report.visible().count(), 4);
        assert_eq!(report.blockable().count(), 4);

        let label = format!("victim {} (tomorrow)", victim.short());
        let key_report = report.key_report(&label).unwrap();
        let ladder = [
            Severity::Informational,
            Severity::Notable,
            Severity::Warning,
            Severity::Major,
        ];
        for (i, entry) in key_report.entries[..4].iter().enumerate() {
            assert_eq!(entry.hash, swarm[i].hash);
            assert_eq!(entry.distance.value(), 200.0 + i as f64);
            assert_eq!(entry.severity, Some(ladder[i]));
        }
        // an honest floodfill may still fall under the baseline, but earns nothing
        let swarm_hashes: Vec<_> = swarm.iter().map(|c| c.hash).collect();
        for entry in key_report.entries.iter().filter(|e| e.points > 0.0) {
            assert!(swarm_hashes.contains(&entry.hash));
        }

        assert!(report.clusters.same_24.iter().any(|g| g.count() == 4));
        assert!(report.pairs.pairs[0].distance.value() < 242.0);
    }

    #[test]
    fn test_swarm_around_our_destination() {
        let dest = hash(0x77);
        let today = RoutingKeyGenerator::default().effective_key(&dest, Timestamp::new(NOW));
        let swarm = sybil_swarm(&today, 3, 220);
        let mut network = honest_network().with_routers(swarm.clone());
        network.destinations = vec![LocalDestination {
            hash: dest,
            nickname: "irc".to_string(),
        }];

        let report = service(&network).analyze(None).unwrap();

        let entries = &report.key_report("irc").unwrap().entries;
        assert_eq!(entries[0].hash, swarm[0].hash);
        let reason = report.threat(&swarm[0].hash).unwrap().reasons[0].text.clone();
        assert!(reason.starts_with("Very close (220.00) to our key irc:"));
    }

    // =============================================================================
    // FLOW 3: Family spoofing
    // =============================================================================

    #[test]
    fn test_spoofed_family_outranks_verified_members() {
        let ours = CandidateBuilder::floodfill(hash(0x31)).family("home").ipv4(192, 0, 2, 1).build();
        let spoof = CandidateBuilder::floodfill(hash(0x32)).family("home").ipv4(192, 0, 2, 2).build();
        let mut network = honest_network().with_routers([ours.clone(), spoof.clone()]);
        network.families = network
            .families
            .clone()
            .with_our_family("home")
            .verified("home", ours.hash);

        let report = service(&network).analyze(None).unwrap();

        let spoofed = report.threat(&spoof.hash).unwrap();
        assert_eq!(spoofed.reasons[0].points, 100.0);
        assert_eq!(spoofed.reasons[0].text, "Spoofed our family \"home\" with 1 other");
        assert_eq!(report.threats[0].hash, spoof.hash);
        assert!(report.threat(&ours.hash).unwrap().total < 0.0);
    }

    #[test]
    fn test_exempt_family_skips_slash_24() {
        let a = CandidateBuilder::floodfill(hash(0x51)).family("ops").ipv4(192, 0, 2, 1).build();
        let b = CandidateBuilder::floodfill(hash(0x52)).family("ops").ipv4(192, 0, 2, 2).build();
        let mut network = honest_network().with_routers([a.clone(), b.clone()]);
        network.families = network
            .families
            .clone()
            .verified("ops", a.hash)
            .verified("ops", b.hash);
        let mut config = SybilConfig::default();
        config.clusters.family_exempt_24 = vec!["ops".to_string()];

        let report = SybilAnalysisService::new(config, network.collaborators())
            .analyze(None)
            .unwrap();

        // only the family penalty remains
        assert_eq!(report.threat(&a.hash).unwrap().total, 2.0);
        assert_eq!(report.threat(&b.hash).unwrap().total, 2.0);
    }

    // =============================================================================
    // FLOW 4: Rotation tracking
    // =============================================================================

    #[test]
    fn test_timeline_shows_swarm_only_on_target_day() {
        let victim = hash(0x42);
        let tomorrow = RoutingKeyGenerator::default().next_rotation_key(&victim, Timestamp::new(NOW));
        let swarm = sybil_swarm(&tomorrow, 4, 200);
        let network = honest_network().with_routers(swarm.clone());
        let suspects: Vec<_> = swarm.iter().map(|c| c.hash).collect();

        let days = service(&network).victim_timeline(victim, &suspects).unwrap();

        assert_eq!(days.len(), 14);
        for day in &days {
            let close = day.entries.iter().filter(|e| e.close).count();
            if day.offset_days == 1 {
                assert_eq!(close, 4);
                assert_eq!(day.date, "2024-03-16");
            } else {
                assert_eq!(close, 0);
            }
        }
    }

    #[test]
    fn test_repeated_runs_identical() {
        let victim = hash(0x42);
        let tomorrow = RoutingKeyGenerator::default().next_rotation_key(&victim, Timestamp::new(NOW));
        let network = honest_network().with_routers(sybil_swarm(&tomorrow, 4, 200));
        let service = service(&network);

        assert_eq!(
            service.analyze(Some(victim)).unwrap(),
            service.analyze(Some(victim)).unwrap()
        );
    }
}
