//! Range proof verification, rewinding and batch verification

use crate::nonce::NonceStream;
use crate::params::{RING_SIZE, SLOT_PAYLOAD};
use crate::proof::{
    decode_value, expand_rings, info, join_slot, parse_signature, signature_message, split_slot,
    ProofHeader, ProofInfo, ProvenRange,
};
use borromean::{BorromeanSignature, BorromeanVerifier};
use confidential_core::utils::{base4_digit, xor_in_place};
use confidential_core::{
    ConfidentialContext, ConfidentialError, ConfidentialResult, Generator, GroupElement, Scalar,
    POINT_BYTES,
};
use pedersen::Commitment;
use rayon::prelude::*;
use std::fmt;
use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Everything the nonce holder learns by rewinding a proof
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct RewindResult {
    /// Blinding factor of the commitment
    pub blind: Scalar,
    /// Committed value
    pub value: u64,
    /// Embedded message area, zero-padded past the original message
    pub message: Vec<u8>,
    pub min_value: u64,
    pub max_value: u64,
}

impl fmt::Debug for RewindResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RewindResult")
            .field("min_value", &self.min_value)
            .field("max_value", &self.max_value)
            .finish_non_exhaustive()
    }
}

/// One proof in a batch
#[derive(Debug, Clone, Copy)]
pub struct BatchItem<'a> {
    pub commitment: &'a Commitment,
    pub proof: &'a [u8],
    pub extra: &'a [u8],
}

/// A proof that passed every check, kept for rewinding
struct VerifiedProof {
    header: ProofHeader,
    ring_sizes: Vec<usize>,
    signature: BorromeanSignature,
    nibbles: Vec<Vec<u8>>,
    challenges: Vec<Vec<Scalar>>,
}

/// Verifier for range proofs
#[derive(Debug, Clone)]
pub struct RangeVerifier {
    context: ConfidentialContext,
    value_gen: Generator,
}

impl RangeVerifier {
    /// Create a verifier using the context's default value generator
    pub fn new(context: &ConfidentialContext) -> Self {
        Self {
            context: context.clone(),
            value_gen: context.value_generator(),
        }
    }

    /// Verify commitments made under a different value generator
    pub fn with_value_generator(mut self, value_gen: Generator) -> Self {
        self.value_gen = value_gen;
        self
    }

    /// Header fields of a proof, without verifying it
    pub fn info(&self, proof: &[u8]) -> ConfidentialResult<ProofInfo> {
        info(proof)
    }

    /// Verify a proof and return the range it establishes for `commitment`
    pub fn verify(
        &self,
        commitment: &Commitment,
        proof: &[u8],
        extra: &[u8],
    ) -> ConfidentialResult<ProvenRange> {
        let verified = self.verify_inner(commitment, proof, extra)?;
        Ok(ProvenRange {
            min_value: verified.header.info.min_value,
            max_value: verified.header.info.max_value,
        })
    }

    /// Verify many independent proofs in parallel
    pub fn verify_batch(&self, items: &[BatchItem<'_>]) -> Vec<ConfidentialResult<ProvenRange>> {
        items
            .par_iter()
            .map(|item| self.verify(item.commitment, item.proof, item.extra))
            .collect()
    }

    /// Recover the value, blind and message of a proof signed with `nonce`
    pub fn rewind(
        &self,
        commitment: &Commitment,
        proof: &[u8],
        extra: &[u8],
        nonce: &[u8; 32],
    ) -> ConfidentialResult<RewindResult> {
        let verified = self.verify_inner(commitment, proof, extra)?;
        let header = &verified.header;
        let sizes = &verified.ring_sizes;
        let s = &verified.signature.responses;
        let nibbles = &verified.nibbles;
        let e = &verified.challenges;

        let stream = NonceStream::new(nonce, commitment, &self.value_gen, &proof[..header.len]);
        let mut digit_blinds = stream.digit_blinds(sizes.len());
        let pads = stream.response_pads(sizes);

        let result = if header.info.mantissa == 0 {
            let (k, _) = split_slot(&pads[0][0]);
            let blind = recover_secret(&k, &e[0][0], &s[0][0])?;
            RewindResult {
                blind,
                value: header.info.min_value,
                message: Vec::new(),
                min_value: header.info.min_value,
                max_value: header.info.max_value,
            }
        } else {
            let last = sizes.len() - 1;
            let size = sizes[last];

            // The value sits in the last or second-to-last slot of the last ring
            let (value_slot, digits) = (0..2)
                .filter_map(|j| {
                    let idx = size - 1 - j;
                    let mut slot = join_slot(&s[last][idx], nibbles[last][idx])?;
                    xor_in_place(&mut slot, &pads[last][idx]);
                    decode_value(&slot).map(|v| (idx, v))
                })
                .next()
                .ok_or(ConfidentialError::RewindMismatch)?;

            let real_slot = base4_digit(digits, last);
            if real_slot == value_slot || real_slot >= size {
                return Err(ConfidentialError::RewindMismatch);
            }
            if header.info.mantissa < 64 && digits >> header.info.mantissa != 0 {
                return Err(ConfidentialError::RewindMismatch);
            }

            let (k, _) = split_slot(&pads[last][real_slot]);
            let x = recover_secret(&k, &e[last][real_slot], &s[last][real_slot])?;
            let blind = x - digit_blinds[last];

            let mut message = Vec::with_capacity(last * RING_SIZE * SLOT_PAYLOAD);
            for i in 0..last {
                let digit = base4_digit(digits, i);
                for j in 0..sizes[i] {
                    let k = if j == digit {
                        s[i][j] + e[i][j] * digit_blinds[i]
                    } else {
                        s[i][j]
                    };
                    let mut slot =
                        join_slot(&k, nibbles[i][j]).ok_or(ConfidentialError::RewindMismatch)?;
                    xor_in_place(&mut slot, &pads[i][j]);
                    message.extend_from_slice(&slot);
                    slot.zeroize();
                }
            }

            let value = digits
                .checked_mul(header.scale)
                .and_then(|v| v.checked_add(header.info.min_value))
                .ok_or(ConfidentialError::RewindMismatch)?;

            RewindResult {
                blind,
                value,
                message,
                min_value: header.info.min_value,
                max_value: header.info.max_value,
            }
        };
        digit_blinds.zeroize();

        let generators = self
            .context
            .generators()
            .with_value_generator(self.value_gen);
        if result.blind == Scalar::ZERO
            || generators.commit_point(&result.blind, result.value) != commitment.element()
        {
            debug!("rewound opening does not match the commitment");
            return Err(ConfidentialError::RewindMismatch);
        }
        Ok(result)
    }

    fn verify_inner(
        &self,
        commitment: &Commitment,
        proof: &[u8],
        extra: &[u8],
    ) -> ConfidentialResult<VerifiedProof> {
        let max = self.context.config().max_proof_size;
        if proof.len() > max {
            debug!(len = proof.len(), max, "range proof exceeds size limit");
            return Err(ConfidentialError::InvalidProof(format!(
                "proof of {} bytes exceeds the {} byte limit",
                proof.len(),
                max
            )));
        }

        let header = ProofHeader::parse(proof).map_err(|e| {
            debug!(error = %e, "range proof header rejected");
            match e {
                ConfidentialError::TruncatedProof { .. } => {
                    ConfidentialError::InvalidProof(e.to_string())
                }
                other => other,
            }
        })?;

        let expected = header.proof_len();
        if proof.len() != expected {
            debug!(len = proof.len(), expected, "range proof length mismatch");
            let reason = if proof.len() < expected {
                "truncated"
            } else {
                "trailing bytes"
            };
            return Err(ConfidentialError::InvalidProof(format!(
                "{}: expected {} bytes, got {}",
                reason,
                expected,
                proof.len()
            )));
        }

        let ring_sizes = header.ring_sizes();
        let rings = ring_sizes.len();
        let commitments_end = header.len + POINT_BYTES * (rings - 1);

        let mut digit_commitments = proof[header.len..commitments_end]
            .chunks_exact(POINT_BYTES)
            .map(GroupElement::from_bytes)
            .collect::<ConfidentialResult<Vec<_>>>()
            .map_err(|e| {
                debug!("invalid digit commitment encoding");
                e
            })?;

        // The last digit commitment is whatever remains of C
        let explicit: GroupElement = digit_commitments.iter().copied().sum();
        let implied = commitment.element()
            - self.value_gen.element() * Scalar::from(header.info.min_value)
            - explicit;
        if implied.is_identity() {
            debug!("implied digit commitment is the identity");
            return Err(ConfidentialError::InvalidProof(
                "implied digit commitment is the identity".to_string(),
            ));
        }
        digit_commitments.push(implied);

        let ring_set = expand_rings(&digit_commitments, &ring_sizes, header.scale, &self.value_gen)?;
        let (signature, nibbles) = parse_signature(&proof[commitments_end..], &ring_sizes)?;
        let msg = signature_message(
            commitment,
            &self.value_gen,
            &proof[..commitments_end],
            &nibbles.concat(),
            extra,
        );

        let challenges = BorromeanVerifier::new(self.context.blind_generator())
            .verify_with_challenges(&signature, &ring_set, &msg)?
            .ok_or_else(|| {
                debug!(rings, "range proof ring signature rejected");
                ConfidentialError::InvalidProof("ring signature does not verify".to_string())
            })?;

        Ok(VerifiedProof {
            header,
            ring_sizes,
            signature,
            nibbles,
            challenges,
        })
    }
}

/// Solve `s = k − e·x` for `x`
fn recover_secret(k: &Scalar, e: &Scalar, s: &Scalar) -> ConfidentialResult<Scalar> {
    if *e == Scalar::ZERO {
        return Err(ConfidentialError::RewindMismatch);
    }
    Ok((k - s) * e.invert())
}
