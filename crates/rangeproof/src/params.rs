//! Proof parameter selection: exponent, mantissa, public minimum and digits

use confidential_core::utils::{base4_digit, bit_length, pow10};
use confidential_core::{ConfidentialError, ConfidentialResult};
use serde::{Deserialize, Serialize};

/// Largest decimal exponent a proof may carry
pub const MAX_EXPONENT: i32 = 18;

/// Largest number of rings (64-bit mantissa in base 4)
pub const MAX_RINGS: usize = 32;

/// Message bytes carried by one response slot: a scalar below 2^252 plus the
/// top nibble of its encoding
pub const SLOT_PAYLOAD: usize = 32;

/// Members in every ring except possibly the last
pub const RING_SIZE: usize = 4;

/// Caller-facing knobs for proof construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofOptions {
    /// Public lower bound of the proven range
    pub min_value: u64,
    /// Decimal exponent: the low `exponent` digits of the value are made public.
    /// `-1` proves the exact value.
    pub exponent: i32,
    /// Prove at least this many bits, hiding the magnitude of small values
    pub min_bits: u32,
}

impl Default for ProofOptions {
    /// Minimal encoding: no public minimum, no exponent, smallest mantissa
    fn default() -> Self {
        Self {
            min_value: 0,
            exponent: 0,
            min_bits: 0,
        }
    }
}

impl ProofOptions {
    /// A proof that reveals the value exactly
    pub fn exact() -> Self {
        Self {
            exponent: -1,
            ..Self::default()
        }
    }

    pub fn with_min_value(mut self, min_value: u64) -> Self {
        self.min_value = min_value;
        self
    }

    pub fn with_exponent(mut self, exponent: i32) -> Self {
        self.exponent = exponent;
        self
    }

    pub fn with_min_bits(mut self, min_bits: u32) -> Self {
        self.min_bits = min_bits;
        self
    }
}

/// Fully resolved parameters of one proof
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ProofParams {
    /// Proven digits value: `value = digits·scale + min_value`
    pub digits: u64,
    pub min_value: u64,
    /// `-1` for an exact-value proof
    pub exponent: i32,
    /// Proven bits; zero for an exact-value proof
    pub mantissa: u32,
    pub scale: u64,
    pub ring_sizes: Vec<usize>,
    pub secret_indices: Vec<usize>,
}

impl ProofParams {
    /// Choose parameters proving `value` under `options`
    pub fn choose(value: u64, options: &ProofOptions) -> ConfidentialResult<Self> {
        if !(-1..=MAX_EXPONENT).contains(&options.exponent) {
            return Err(ConfidentialError::InvalidArgument(format!(
                "exponent {} outside -1..={}",
                options.exponent, MAX_EXPONENT
            )));
        }
        if options.min_bits > 64 {
            return Err(ConfidentialError::InvalidArgument(format!(
                "min_bits {} exceeds 64",
                options.min_bits
            )));
        }
        if value < options.min_value {
            return Err(ConfidentialError::ValueOutOfRange {
                value,
                min_value: options.min_value,
            });
        }

        let mut min_value = options.min_value;
        let mut exponent = options.exponent;
        let mut min_bits = options.min_bits;

        // No range fits above the largest value
        if min_value == u64::MAX {
            exponent = -1;
        }
        if exponent < 0 {
            return Ok(Self::exact(value));
        }

        let half = i64::MAX as u64;
        if (min_value != 0 && value > half) || (value != 0 && min_value >= half) {
            return Err(ConfidentialError::InvalidArgument(
                "value and minimum cannot both be large".to_string(),
            ));
        }

        let max_bits = if min_value != 0 {
            min_value.leading_zeros()
        } else {
            64
        };
        min_bits = min_bits.min(max_bits);
        // Scaling by ten widens the range past 2^64 for very large values
        if min_bits > 61 || value > half {
            exponent = 0;
        }

        let mut digits = value - min_value;
        let mut forced = if min_bits > 0 {
            u64::MAX >> (64 - min_bits)
        } else {
            0
        };
        let mut applied = 0;
        while applied < exponent && forced <= u64::MAX / 10 {
            digits /= 10;
            forced *= 10;
            applied += 1;
        }
        exponent = applied;

        let scale = pow10(exponent as u32).ok_or_else(|| {
            ConfidentialError::InvalidArgument("exponent overflows".to_string())
        })?;
        // Low digits that are not proven become part of the public minimum
        min_value = value - digits * scale;

        let mantissa = bit_length(digits).max(1).max(min_bits);
        let ring_sizes = ring_sizes_for(mantissa);
        let secret_indices = (0..ring_sizes.len())
            .map(|i| base4_digit(digits, i))
            .collect();

        let params = Self {
            digits,
            min_value,
            exponent,
            mantissa,
            scale,
            ring_sizes,
            secret_indices,
        };
        if params.max_value().is_none() {
            return Err(ConfidentialError::InvalidArgument(
                "proven range exceeds 64 bits".to_string(),
            ));
        }
        Ok(params)
    }

    fn exact(value: u64) -> Self {
        Self {
            digits: 0,
            min_value: value,
            exponent: -1,
            mantissa: 0,
            scale: 1,
            ring_sizes: vec![1],
            secret_indices: vec![0],
        }
    }

    pub fn is_exact(&self) -> bool {
        self.mantissa == 0
    }

    pub fn rings(&self) -> usize {
        self.ring_sizes.len()
    }

    /// Message bytes available in the response slots of all rings but the last
    pub fn message_capacity(&self) -> usize {
        (self.rings() - 1) * RING_SIZE * SLOT_PAYLOAD
    }

    pub fn max_value(&self) -> Option<u64> {
        max_value(self.mantissa, self.scale, self.min_value)
    }
}

/// Ring sizes for a mantissa: base-4 digits, a binary last digit for odd
/// mantissas, and a single-member ring for an exact-value proof.
pub fn ring_sizes_for(mantissa: u32) -> Vec<usize> {
    if mantissa == 0 {
        return vec![1];
    }
    let mut sizes = vec![RING_SIZE; (mantissa / 2) as usize];
    if mantissa % 2 == 1 {
        sizes.push(2);
    }
    sizes
}

/// `(2^mantissa − 1)·scale + min_value`, or `None` on overflow
pub fn max_value(mantissa: u32, scale: u64, min_value: u64) -> Option<u64> {
    let span = if mantissa == 0 {
        0
    } else {
        u64::MAX >> (64 - mantissa)
    };
    span.checked_mul(scale)?.checked_add(min_value)
}
