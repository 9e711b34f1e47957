//! Computational basis encoding
//!
//! Maps between an integer basis index in [0, 2^n) and its n-bit selection
//! vector, most-significant-bit first, so that index 5 with n=3 is `101`
//! (assets 0 and 2 selected). All Hamiltonian and state indexing in this
//! crate uses this ordering.

use ndarray::Array2;

/// Decode a basis index into an n-length binary selection vector.
///
/// Bit i of the result is `(index >> (n - 1 - i)) & 1`, matching the
/// zero-padded binary string representation of `index`.
#[inline]
pub fn decode(index: usize, n_assets: usize) -> Vec<u8> {
    debug_assert!(index < (1 << n_assets), "basis index out of range");
    (0..n_assets)
        .map(|i| ((index >> (n_assets - 1 - i)) & 1) as u8)
        .collect()
}

/// Encode a binary selection vector back into its basis index.
///
/// Inverse of [`decode`]: `encode(&decode(s, n)) == s` for all s in [0, 2^n).
#[inline]
pub fn encode(bits: &[u8]) -> usize {
    bits.iter().fold(0, |acc, &b| (acc << 1) | b as usize)
}

/// Number of selected assets (1-bits) in a selection vector.
#[inline]
pub fn popcount(bits: &[u8]) -> usize {
    bits.iter().filter(|&&b| b == 1).count()
}

/// Render a basis index as its zero-padded binary string.
pub fn bitstring(index: usize, n_assets: usize) -> String {
    decode(index, n_assets).iter().map(|b| char::from(b'0' + b)).collect()
}

/// Quadratic risk x^T Q x of a selection vector.
pub fn quadratic_risk(bits: &[u8], q: &Array2<f64>) -> f64 {
    let mut risk = 0.0;
    for (i, &bi) in bits.iter().enumerate() {
        if bi == 0 {
            continue;
        }
        for (j, &bj) in bits.iter().enumerate() {
            if bj == 1 {
                risk += q[[i, j]];
            }
        }
    }
    risk
}

/// Squared deviation of the asset count from the target cardinality.
pub fn cardinality_violation(bits: &[u8], target: usize) -> f64 {
    let deviation = popcount(bits) as f64 - target as f64;
    deviation * deviation
}
