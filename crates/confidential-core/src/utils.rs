//! Scalar and byte helpers

use crate::{ConfidentialError, ConfidentialResult};
use curve25519_dalek::scalar::Scalar;

/// Size in bytes of a serialized scalar
pub const SCALAR_BYTES: usize = 32;

/// Parse a canonical scalar, returning `None` for out-of-range encodings
pub fn scalar_from_canonical(bytes: &[u8]) -> Option<Scalar> {
    let arr: [u8; SCALAR_BYTES] = bytes.try_into().ok()?;
    Option::from(Scalar::from_canonical_bytes(arr))
}

/// Parse a blinding factor: canonical and non-zero
pub fn parse_blind(bytes: &[u8; SCALAR_BYTES]) -> ConfidentialResult<Scalar> {
    match scalar_from_canonical(bytes) {
        Some(s) if s != Scalar::ZERO => Ok(s),
        _ => Err(ConfidentialError::InvalidBlind),
    }
}

/// Number of significant bits in `value` (zero has none)
pub fn bit_length(value: u64) -> u32 {
    64 - value.leading_zeros()
}

/// `10^exp`, or `None` on overflow
pub fn pow10(exp: u32) -> Option<u64> {
    10u64.checked_pow(exp)
}

/// XOR `src` into `dst` in place
pub fn xor_in_place(dst: &mut [u8], src: &[u8]) {
    for (d, s) in dst.iter_mut().zip(src.iter()) {
        *d ^= *s;
    }
}

/// Base-4 digit `index` of `value`
pub fn base4_digit(value: u64, index: usize) -> usize {
    ((value >> (2 * index)) & 3) as usize
}
