//! Range proof prover implementation

use crate::nonce::NonceStream;
use crate::params::{ProofOptions, ProofParams, RING_SIZE, SLOT_PAYLOAD};
use crate::proof::{
    encode_value, expand_rings, signature_message, split_slot, write_header, write_signature,
};
use borromean::{BorromeanProver, RingWitness};
use confidential_core::utils::xor_in_place;
use confidential_core::{
    ConfidentialContext, ConfidentialError, ConfidentialResult, Generator, Scalar,
};
use pedersen::Commitment;
use tracing::{debug, trace};
use zeroize::Zeroize;

/// Prover for generating range proofs
#[derive(Debug, Clone)]
pub struct RangeProver {
    context: ConfidentialContext,
    value_gen: Generator,
}

impl RangeProver {
    /// Create a prover using the context's default value generator
    pub fn new(context: &ConfidentialContext) -> Self {
        Self {
            context: context.clone(),
            value_gen: context.value_generator(),
        }
    }

    /// Prove commitments made under a different value generator
    pub fn with_value_generator(mut self, value_gen: Generator) -> Self {
        self.value_gen = value_gen;
        self
    }

    pub fn value_generator(&self) -> Generator {
        self.value_gen
    }

    /// Prove that `commitment = blind·G + value·H` lies in a range chosen by `options`.
    ///
    /// `nonce` seeds every secret in the proof; anyone holding it can later
    /// rewind the proof to recover `value`, `blind` and `message`. `extra` is
    /// bound into the proof without being stored in it.
    #[allow(clippy::too_many_arguments)]
    pub fn sign(
        &self,
        commitment: &Commitment,
        blind: &Scalar,
        nonce: &[u8; 32],
        value: u64,
        options: &ProofOptions,
        message: &[u8],
        extra: &[u8],
    ) -> ConfidentialResult<Vec<u8>> {
        if *blind == Scalar::ZERO {
            return Err(ConfidentialError::InvalidBlind);
        }
        let generators = self
            .context
            .generators()
            .with_value_generator(self.value_gen);
        if generators.commit_point(blind, value) != commitment.element() {
            return Err(ConfidentialError::InvalidCommitment(
                "blind and value do not open the commitment".to_string(),
            ));
        }

        let params = ProofParams::choose(value, options)?;
        let capacity = params.message_capacity();
        if message.len() > capacity {
            return Err(ConfidentialError::MessageTooLong {
                len: message.len(),
                capacity,
            });
        }
        trace!(
            exponent = params.exponent,
            mantissa = params.mantissa,
            rings = params.rings(),
            "range proof parameters chosen"
        );

        let header = write_header(&params);
        let rings = params.rings();
        let last = rings - 1;

        let mut plaintext = slot_plaintext(&params, message);
        let stream = NonceStream::new(nonce, commitment, &self.value_gen, &header);
        let mut digit_blinds = stream.digit_blinds(rings);
        let mut responses = Vec::with_capacity(rings);
        let mut nibbles = Vec::with_capacity(rings);
        for (i, slots) in plaintext.iter_mut().enumerate() {
            let mut row = Vec::with_capacity(slots.len());
            let mut nibble_row = Vec::with_capacity(slots.len());
            for (j, slot) in slots.iter_mut().enumerate() {
                xor_in_place(slot, &stream.response_pad(i, j));
                let (s, nibble) = split_slot(slot);
                if s == Scalar::ZERO {
                    return Err(ConfidentialError::InvalidArgument(
                        "degenerate response nonce".to_string(),
                    ));
                }
                row.push(s);
                nibble_row.push(nibble);
                slot.zeroize();
            }
            responses.push(row);
            nibbles.push(nibble_row);
        }

        digit_blinds[last] += blind;
        if digit_blinds.iter().any(|b| *b == Scalar::ZERO) {
            return Err(ConfidentialError::InvalidArgument(
                "degenerate digit blind".to_string(),
            ));
        }

        // Digit commitments; the last one is implied by the others
        let mut proof = header;
        let mut digit_commitments = Vec::with_capacity(rings);
        for (i, blind_i) in digit_blinds.iter().enumerate() {
            let digit_value = (params.secret_indices[i] as u64 * params.scale) << (2 * i);
            let point = generators.commit_point(blind_i, digit_value);
            if point.is_identity() {
                return Err(ConfidentialError::InvalidArgument(
                    "degenerate digit commitment".to_string(),
                ));
            }
            if i < last {
                proof.extend_from_slice(&point.to_bytes());
            }
            digit_commitments.push(point);
        }

        let ring_set = expand_rings(
            &digit_commitments,
            &params.ring_sizes,
            params.scale,
            &self.value_gen,
        )?;
        let witnesses: Vec<RingWitness> = digit_blinds
            .iter()
            .zip(&params.secret_indices)
            .zip(&responses)
            .map(|((blind_i, &index), row)| RingWitness::new(index, *blind_i, row[index]))
            .collect();

        let msg = signature_message(commitment, &self.value_gen, &proof, &nibbles.concat(), extra);
        let signature = BorromeanProver::new(generators.blind)
            .sign_with_responses(&ring_set, &witnesses, &responses, &msg)
            .map_err(|e| {
                debug!(error = %e, "ring signature construction failed");
                e
            })?;
        write_signature(&mut proof, &signature, &nibbles)?;

        digit_blinds.zeroize();
        responses.zeroize();

        trace!(len = proof.len(), "range proof created");
        Ok(proof)
    }
}

/// Per-slot plaintext before masking: the message in 32-byte chunks across
/// rings 0..r−2 and the digits value in a forged slot of the last ring.
fn slot_plaintext(params: &ProofParams, message: &[u8]) -> Vec<Vec<[u8; 32]>> {
    let mut slots: Vec<Vec<[u8; 32]>> = params
        .ring_sizes
        .iter()
        .map(|&size| vec![[0u8; 32]; size])
        .collect();

    for (n, chunk) in message.chunks(SLOT_PAYLOAD).enumerate() {
        slots[n / RING_SIZE][n % RING_SIZE][..chunk.len()].copy_from_slice(chunk);
    }

    let last = params.rings() - 1;
    let size = params.ring_sizes[last];
    if size > 1 {
        let mut idx = size - 1;
        if params.secret_indices[last] == idx {
            idx -= 1;
        }
        slots[last][idx] = encode_value(params.digits);
    }
    slots
}
