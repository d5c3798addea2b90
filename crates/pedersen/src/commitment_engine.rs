//! Commitment engine bound to an explicit context
//!
//! The [`CommitmentEngine`] carries the generator pair and configuration of a
//! [`ConfidentialContext`] so callers never pass generators or policy flags by
//! hand.

use crate::{blinding, commit, Commitment};
use confidential_core::{ConfidentialContext, ConfidentialResult, Generator, GroupElement, Scalar};
use tracing::debug;

/// Commitment operations over a context's generators
#[derive(Clone, Debug)]
pub struct CommitmentEngine {
    context: ConfidentialContext,
}

impl CommitmentEngine {
    /// Create an engine from a context
    pub fn new(context: &ConfidentialContext) -> Self {
        Self {
            context: context.clone(),
        }
    }

    /// The context this engine operates in
    pub fn context(&self) -> &ConfidentialContext {
        &self.context
    }

    /// Commit under the context's default value generator
    pub fn commit(&self, blind: &Scalar, value: u64) -> ConfidentialResult<Commitment> {
        commit(
            blind,
            value,
            &self.context.value_generator(),
            &self.context.blind_generator(),
        )
    }

    /// Commit under a caller-chosen value generator (e.g. a per-asset one)
    pub fn commit_with_generator(
        &self,
        blind: &Scalar,
        value: u64,
        value_gen: &Generator,
    ) -> ConfidentialResult<Commitment> {
        commit(blind, value, value_gen, &self.context.blind_generator())
    }

    /// Signed blinding sum; the empty case follows the context configuration
    pub fn blind_sum(&self, blinds: &[Scalar], n_positive: usize) -> ConfidentialResult<Scalar> {
        blinding::blind_sum(
            blinds,
            n_positive,
            self.context.config().allow_empty_blind_sum,
        )
    }

    /// See [`blinding::blind_generator_blind_sum`]
    pub fn blind_generator_blind_sum(
        &self,
        values: &[u64],
        generator_blinds: &[Scalar],
        blinding_factors: &[Scalar],
        n_inputs: usize,
    ) -> ConfidentialResult<Vec<Scalar>> {
        blinding::blind_generator_blind_sum(values, generator_blinds, blinding_factors, n_inputs)
    }

    /// Whether the inputs and outputs sum to the same group element
    pub fn verify_tally(&self, inputs: &[Commitment], outputs: &[Commitment]) -> bool {
        verify_tally(inputs, outputs)
    }
}

/// `Σ inputs == Σ outputs`. Empty sides sum to the identity.
pub fn verify_tally(inputs: &[Commitment], outputs: &[Commitment]) -> bool {
    let lhs: GroupElement = inputs.iter().map(Commitment::element).sum();
    let rhs: GroupElement = outputs.iter().map(Commitment::element).sum();
    let balanced = lhs == rhs;
    if !balanced {
        debug!(
            inputs = inputs.len(),
            outputs = outputs.len(),
            "commitment tally does not balance"
        );
    }
    balanced
}

#[cfg(test)]
mod tests {
    use super::*;
    use confidential_core::{derive_blinded_generator, ConfidentialError, ContextConfig};
    use rand::rngs::OsRng;

    #[test]
    fn test_simple_transfer_balances() {
        let ctx = ConfidentialContext::new().unwrap();
        let engine = CommitmentEngine::new(&ctx);

        let b_in = Scalar::random(&mut OsRng);
        let b_out1 = Scalar::random(&mut OsRng);
        // positive: input, negative: first output
        let b_out2 = engine.blind_sum(&[b_in, b_out1], 1).unwrap();

        let input = engine.commit(&b_in, 100).unwrap();
        let out1 = engine.commit(&b_out1, 60).unwrap();
        let out2 = engine.commit(&b_out2, 40).unwrap();

        assert!(engine.verify_tally(&[input], &[out1, out2]));
        assert!(!engine.verify_tally(&[input], &[out1]));
    }

    #[test]
    fn test_empty_tally() {
        assert!(verify_tally(&[], &[]));
    }

    #[test]
    fn test_empty_blind_sum_follows_config() {
        let strict = ConfidentialContext::with_config(ContextConfig {
            allow_empty_blind_sum: false,
            ..ContextConfig::default()
        })
        .unwrap();
        assert_eq!(
            CommitmentEngine::new(&strict).blind_sum(&[], 0),
            Err(ConfidentialError::EmptyInput)
        );

        let lenient = ConfidentialContext::new().unwrap();
        assert_eq!(
            CommitmentEngine::new(&lenient).blind_sum(&[], 0),
            Ok(Scalar::ZERO)
        );
    }

    #[test]
    fn test_commit_with_blinded_asset_generator() {
        let ctx = ConfidentialContext::new().unwrap();
        let engine = CommitmentEngine::new(&ctx);
        let r = Scalar::random(&mut OsRng);
        let asset = derive_blinded_generator(&[9u8; 32], &r).unwrap();
        let b = Scalar::random(&mut OsRng);

        let c = engine.commit_with_generator(&b, 7, &asset).unwrap();
        let expected =
            ctx.blind_generator().element() * b + asset.element() * Scalar::from(7u64);
        assert_eq!(c.element(), expected);
    }
}
