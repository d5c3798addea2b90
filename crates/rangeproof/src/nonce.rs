//! Deterministic secrets derived from the prover's nonce seed
//!
//! Signing and rewinding both derive every digit blind and response pad from
//! the same transcript, keyed by the 32-byte seed and bound to the commitment,
//! value generator and proof header. Each output is a pure function of those
//! inputs and its ring/member index, so the two sides always agree.

use confidential_core::{confidential_transcript, Generator, Scalar, TranscriptProtocol};
use merlin::Transcript;
use pedersen::Commitment;

/// Source of the prover's deterministic per-digit secrets
#[derive(Clone)]
pub struct NonceStream {
    base: Transcript,
}

impl NonceStream {
    pub fn new(
        seed: &[u8; 32],
        commitment: &Commitment,
        value_gen: &Generator,
        header: &[u8],
    ) -> Self {
        let mut base = confidential_transcript(b"rangeproof-nonce");
        base.append_message(b"seed", seed);
        base.append_message(b"commitment", &commitment.to_bytes());
        base.append_message(b"value-generator", &value_gen.to_bytes());
        base.append_message(b"header", header);
        Self { base }
    }

    /// Blinding factor of ring `ring`'s digit commitment
    pub fn digit_blind(&self, ring: usize) -> Scalar {
        let mut t = self.base.clone();
        t.append_index(b"digit-ring", ring);
        t.challenge_scalar(b"digit-blind")
    }

    /// Digit blinds for `rings` rings. The last one is the negated sum of the
    /// others; the prover adds the commitment's blind to it.
    pub fn digit_blinds(&self, rings: usize) -> Vec<Scalar> {
        let mut blinds: Vec<Scalar> = (0..rings - 1).map(|i| self.digit_blind(i)).collect();
        let acc: Scalar = blinds.iter().sum();
        blinds.push(-acc);
        blinds
    }

    /// Pad masking the 32-byte response slot of `member` in `ring`
    pub fn response_pad(&self, ring: usize, member: usize) -> [u8; 32] {
        let mut t = self.base.clone();
        t.append_index(b"pad-ring", ring);
        t.append_index(b"pad-member", member);
        t.challenge_bytes32(b"response-pad")
    }

    /// Pads for every member of every ring
    pub fn response_pads(&self, ring_sizes: &[usize]) -> Vec<Vec<[u8; 32]>> {
        ring_sizes
            .iter()
            .enumerate()
            .map(|(i, &size)| (0..size).map(|j| self.response_pad(i, j)).collect())
            .collect()
    }
}
