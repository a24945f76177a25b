//! Random-key calibration baseline.

use primitive_types::U256;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::domain::keyspace::{log2_of, xor_distance};
use crate::domain::{CandidateInfo, RouterHash};

/// Mean distance from a uniformly random key to its closest candidate.
///
/// This is how close a key of interest should expect its nearest candidate
/// to be if candidates were placed at random. `None` when there are no
/// candidates or no samples.
pub fn random_baseline(candidates: &[CandidateInfo], samples: usize, seed: u64) -> Option<f64> {
    if candidates.is_empty() || samples == 0 {
        return None;
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut total = 0.0;
    for _ in 0..samples {
        let mut bytes = [0u8; 32];
        rng.fill_bytes(&mut bytes);
        let sample = RouterHash::new(bytes);

        let closest = candidates
            .iter()
            .map(|c| xor_distance(&sample, &c.hash))
            .min()
            .unwrap_or_else(U256::max_value);
        total += log2_of(closest).value();
    }
    Some(total / samples as f64)
}
