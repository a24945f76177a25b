//! Synthetic network database populations.

use ns_01_sybil_analysis::test_utils::CandidateBuilder;
use ns_01_sybil_analysis::{CandidateInfo, RouterHash, RoutingKey};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// `n` floodfills with uniformly random identities, each in its own /16.
///
/// Stands in for an honest network: no shared addresses, no families,
/// identities spread evenly over the keyspace.
pub fn honest_floodfills(n: usize, seed: u64) -> Vec<CandidateInfo> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|i| {
            let mut bytes = [0u8; 32];
            rng.fill_bytes(&mut bytes);
            let i = i as u32;
            CandidateBuilder::floodfill(RouterHash::new(bytes))
                .ipv4(10 + (i / 250) as u8, (i % 250) as u8, 1, 1)
                .build()
        })
        .collect()
}

/// Identity at `key XOR 2^bit`, i.e. exactly `bit` away from `key`.
pub fn ground_near(key: &RoutingKey, bit: usize) -> RouterHash {
    let mut bytes = *key.as_bytes();
    bytes[31 - bit / 8] ^= 1 << (bit % 8);
    RouterHash::new(bytes)
}

/// `count` floodfills ground to sit close to `key`, all behind one /24.
///
/// Models an attacker who brute-forced identities for a target's routing
/// key and runs them from a single rented subnet.
pub fn sybil_swarm(key: &RoutingKey, count: usize, first_bit: usize) -> Vec<CandidateInfo> {
    (0..count)
        .map(|i| {
            CandidateBuilder::floodfill(ground_near(key, first_bit + i))
                .ipv4(198, 18, 7, 10 + i as u8)
                .build()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ns_01_sybil_analysis::distance_log2;

    #[test]
    fn test_honest_population_is_reproducible() {
        assert_eq!(honest_floodfills(20, 3), honest_floodfills(20, 3));
        assert_ne!(honest_floodfills(20, 3), honest_floodfills(20, 4));
    }

    #[test]
    fn test_ground_identity_sits_at_requested_distance() {
        let key = RoutingKey::new([0x5a; 32]);
        assert_eq!(distance_log2(&key, &ground_near(&key, 201)).value(), 201.0);
    }
}
