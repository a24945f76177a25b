//! # Sybil Analysis Benchmarks
//!
//! | Stage | Cost |
//! |-------|------|
//! | `distance_log2` | one 256-bit XOR and a bit scan |
//! | Pairwise scan | O(n^2) distances, parallel over rows |
//! | Key proximity | O(n log n) per key |
//! | Full analysis | everything above plus clusters and profiles |

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ns_01_sybil_analysis::domain::ProximityConfig;
use ns_01_sybil_analysis::test_utils::{hash, TestNetwork};
use ns_01_sybil_analysis::{
    distance_log2, find_k_closest, PairwiseProximityAnalyzer, RoutingKeyGenerator, ScoreBoard,
    SybilAnalysisApi, SybilAnalysisService, SybilConfig, Timestamp,
};
use ns_tests::benchmarks::populations::{honest_floodfills, sybil_swarm};

const NOW: u64 = 1_710_493_200;

// ============================================================================
// Keyspace metric
// ============================================================================

fn bench_distance(c: &mut Criterion) {
    let routers = honest_floodfills(2, 1);
    let (a, b) = (routers[0].hash, routers[1].hash);

    c.bench_function("distance_log2", |bench| {
        bench.iter(|| black_box(distance_log2(black_box(&a), black_box(&b))))
    });
}

fn bench_k_closest(c: &mut Criterion) {
    let routers = honest_floodfills(5000, 2);
    let key = RoutingKeyGenerator::default().effective_key(&hash(0x42), Timestamp::new(NOW));

    c.bench_function("find_k_closest_5000", |bench| {
        bench.iter(|| black_box(find_k_closest(&routers, &key, 10).len()))
    });
}

// ============================================================================
// Pairwise scan
// ============================================================================

fn bench_pairwise(c: &mut Criterion) {
    let mut group = c.benchmark_group("pairwise-proximity");
    group.measurement_time(Duration::from_secs(10));
    let config = ProximityConfig::default();

    for size in [100, 500, 2000] {
        let routers = honest_floodfills(size, 3);
        let pairs = (size * (size - 1) / 2) as u64;
        group.throughput(Throughput::Elements(pairs));
        group.bench_with_input(BenchmarkId::new("scan", size), &routers, |bench, routers| {
            bench.iter(|| {
                let mut board = ScoreBoard::new();
                black_box(PairwiseProximityAnalyzer::new(&config).analyze(routers, &mut board))
            })
        });
    }

    group.finish();
}

// ============================================================================
// Full analysis
// ============================================================================

fn bench_full_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("full-analysis");
    group.measurement_time(Duration::from_secs(10));

    for size in [200, 1000] {
        let victim = hash(0x42);
        let key = RoutingKeyGenerator::default().next_rotation_key(&victim, Timestamp::new(NOW));
        let network = TestNetwork::new(hash(0xEE), NOW)
            .with_routers(honest_floodfills(size, 4))
            .with_routers(sybil_swarm(&key, 8, 200));
        let service = SybilAnalysisService::new(SybilConfig::default(), network.collaborators());

        group.bench_with_input(BenchmarkId::new("analyze", size), &victim, |bench, victim| {
            bench.iter(|| black_box(service.analyze(Some(*victim)).map(|r| r.threats.len())))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_distance,
    bench_k_closest,
    bench_pairwise,
    bench_full_analysis
);
criterion_main!(benches);
