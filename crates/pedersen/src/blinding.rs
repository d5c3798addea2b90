//! Blinding-factor algebra
//!
//! A transaction balances when the signed sum of its blinding factors is zero
//! (and the values balance too). These helpers compute the one blinding factor
//! that is solved for instead of sampled.

use confidential_core::{ConfidentialError, ConfidentialResult, Scalar};

/// `Σ blinds[..n_positive] − Σ blinds[n_positive..]`.
///
/// With no blinds at all the result is zero when `allow_empty` is set and
/// `EmptyInput` otherwise.
pub fn blind_sum(
    blinds: &[Scalar],
    n_positive: usize,
    allow_empty: bool,
) -> ConfidentialResult<Scalar> {
    if n_positive > blinds.len() {
        return Err(ConfidentialError::Overflow {
            split: n_positive,
            len: blinds.len(),
        });
    }
    if blinds.is_empty() {
        return if allow_empty {
            Ok(Scalar::ZERO)
        } else {
            Err(ConfidentialError::EmptyInput)
        };
    }

    let (positive, negative) = blinds.split_at(n_positive);
    let sum: Scalar = positive.iter().sum();
    Ok(negative.iter().fold(sum, |acc, b| acc - b))
}

/// Solve the last blinding factor for a multi-generator balance.
///
/// Entry `i` commits `value[i]` under a value generator blinded by
/// `generator_blinds[i]`, so its effective blinding term is
/// `blinding_factors[i] + values[i]·generator_blinds[i]`. The first `n_inputs`
/// entries are inputs, the rest outputs. The returned vector equals
/// `blinding_factors` with the final entry replaced so that the effective terms
/// of outputs minus inputs sum to zero.
pub fn blind_generator_blind_sum(
    values: &[u64],
    generator_blinds: &[Scalar],
    blinding_factors: &[Scalar],
    n_inputs: usize,
) -> ConfidentialResult<Vec<Scalar>> {
    let n = blinding_factors.len();
    if values.len() != n || generator_blinds.len() != n {
        return Err(ConfidentialError::InvalidArgument(format!(
            "length mismatch: {} values, {} generator blinds, {} blinding factors",
            values.len(),
            generator_blinds.len(),
            n
        )));
    }
    // The solved entry must be an output
    if n == 0 || n_inputs >= n {
        return Err(ConfidentialError::Overflow { split: n_inputs, len: n });
    }

    let sum = values
        .iter()
        .zip(generator_blinds)
        .zip(blinding_factors)
        .enumerate()
        .fold(Scalar::ZERO, |acc, (i, ((&v, r), b))| {
            let term = Scalar::from(v) * r + b;
            if i < n_inputs {
                acc - term
            } else {
                acc + term
            }
        });

    let mut out = blinding_factors.to_vec();
    out[n - 1] -= sum;
    Ok(out)
}
