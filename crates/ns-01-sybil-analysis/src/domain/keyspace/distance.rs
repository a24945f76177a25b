//! XOR distance over the 256-bit keyspace.

use primitive_types::U256;

use crate::domain::{KeyspaceDistance, KeyspacePoint};

/// Bits below the leading bit that still change an `f64` result.
const FRACTION_BITS: usize = 64;

/// Raw XOR of two keys as a fixed-width 256-bit integer.
///
/// Symmetric, zero only for identical keys.
#[inline]
pub fn xor_distance<A, B>(a: &A, b: &B) -> U256
where
    A: KeyspacePoint + ?Sized,
    B: KeyspacePoint + ?Sized,
{
    let a = a.key_bytes();
    let b = b.key_bytes();
    let mut xor = [0u8; 32];
    for (i, byte) in xor.iter_mut().enumerate() {
        *byte = a[i] ^ b[i];
    }
    U256::from_big_endian(&xor)
}

/// Scalar form of a raw XOR distance.
///
/// `bitLength - 1 + Σ bit_i / 2^(bitLength - 1 - i)` over the bits below the
/// leading one. Returns `-1` for zero.
pub fn log2_of(xor: U256) -> KeyspaceDistance {
    let len = xor.bits();
    if len == 0 {
        return KeyspaceDistance::IDENTICAL;
    }

    let top = len - 1;
    let mut value = top as f64;
    let mut weight = 0.5;
    for i in (top.saturating_sub(FRACTION_BITS)..top).rev() {
        if xor.bit(i) {
            value += weight;
        }
        weight /= 2.0;
    }
    KeyspaceDistance::new(value)
}

/// Scalar keyspace distance between two keys.
///
/// # Properties
/// - Symmetric: `distance_log2(a, b) == distance_log2(b, a)`
/// - `-1` for identical keys, `>= 0` otherwise
/// - Monotonic in the numeric value of `a XOR b`
pub fn distance_log2<A, B>(a: &A, b: &B) -> KeyspaceDistance
where
    A: KeyspacePoint + ?Sized,
    B: KeyspacePoint + ?Sized,
{
    log2_of(xor_distance(a, b))
}
