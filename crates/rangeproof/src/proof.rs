//! Range proof wire format
//!
//! ```text
//! byte 0     : bit7 = 0 | bit6 has_range | bit5 has_min | bits0-4 exponent
//! byte 1     : mantissa − 1                (present iff has_range)
//! 8 bytes    : min_value, big endian       (present iff has_min)
//! 32·(r−1)   : digit commitments for rings 0..r−2
//! 32         : e0
//! 32·npub    : responses, ring-major
//! ```
//!
//! Each response slot holds a scalar below 2^252 in its low bits and a message
//! nibble in the top four bits of its last byte. The nibbles are bound into the
//! ring signature message, so every bit of the slot is authenticated.

use crate::params::{max_value, ring_sizes_for, ProofParams};
use borromean::{BorromeanSignature, Ring};
use byteorder::{BigEndian, ByteOrder};
use confidential_core::{
    confidential_transcript, ConfidentialError, ConfidentialResult, Generator, GroupElement,
    Scalar, TranscriptProtocol, POINT_BYTES,
};
use pedersen::Commitment;
use serde::{Deserialize, Serialize};

/// Shortest possible proof: one header byte, `e0` and a single response
pub const MIN_PROOF_SIZE: usize = 65;

/// Longest possible proof: 64-bit mantissa with an explicit minimum
pub const MAX_PROOF_SIZE: usize = 10 + 31 * POINT_BYTES + 32 + 128 * 32;

const HAS_RANGE: u8 = 0x40;
const NIBBLE_MASK: u8 = 0xf0;
const HAS_MIN: u8 = 0x20;
const EXPONENT_MASK: u8 = 0x1f;
const RESERVED: u8 = 0x80;

/// Public parameters readable from a proof without verifying it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofInfo {
    /// Decimal exponent, `-1` for an exact-value proof
    pub exponent: i32,
    /// Proven bits, zero for an exact-value proof
    pub mantissa: u32,
    pub min_value: u64,
    pub max_value: u64,
}

/// The range a verified proof establishes for its commitment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvenRange {
    pub min_value: u64,
    pub max_value: u64,
}

impl ProvenRange {
    pub fn contains(&self, value: u64) -> bool {
        self.min_value <= value && value <= self.max_value
    }
}

/// Parsed proof header
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ProofHeader {
    pub info: ProofInfo,
    pub scale: u64,
    /// Header length in bytes
    pub len: usize,
}

impl ProofHeader {
    pub fn parse(proof: &[u8]) -> ConfidentialResult<Self> {
        if proof.len() < MIN_PROOF_SIZE {
            return Err(ConfidentialError::TruncatedProof {
                needed: MIN_PROOF_SIZE,
                available: proof.len(),
            });
        }
        let flags = proof[0];
        if flags & RESERVED != 0 {
            return Err(ConfidentialError::InvalidProof(
                "reserved header bit set".to_string(),
            ));
        }

        let mut offset = 1;
        let (exponent, mantissa) = if flags & HAS_RANGE != 0 {
            let exponent = (flags & EXPONENT_MASK) as i32;
            if exponent > crate::params::MAX_EXPONENT {
                return Err(ConfidentialError::InvalidProof(format!(
                    "exponent {} too large",
                    exponent
                )));
            }
            let mantissa = proof[offset] as u32 + 1;
            offset += 1;
            if mantissa > 64 {
                return Err(ConfidentialError::InvalidProof(format!(
                    "mantissa {} exceeds 64 bits",
                    mantissa
                )));
            }
            (exponent, mantissa)
        } else {
            (-1, 0)
        };

        let min_value = if flags & HAS_MIN != 0 {
            let min = BigEndian::read_u64(&proof[offset..offset + 8]);
            offset += 8;
            min
        } else {
            0
        };

        let scale = 10u64.pow(exponent.max(0) as u32);
        let max_value = max_value(mantissa, scale, min_value).ok_or_else(|| {
            ConfidentialError::InvalidProof("proven range exceeds 64 bits".to_string())
        })?;

        Ok(Self {
            info: ProofInfo {
                exponent,
                mantissa,
                min_value,
                max_value,
            },
            scale,
            len: offset,
        })
    }

    pub fn ring_sizes(&self) -> Vec<usize> {
        ring_sizes_for(self.info.mantissa)
    }

    /// Total length of a proof carrying this header
    pub fn proof_len(&self) -> usize {
        let sizes = self.ring_sizes();
        self.len + POINT_BYTES * (sizes.len() - 1) + BorromeanSignature::serialized_size(&sizes)
    }
}

/// Serialize the header for chosen parameters
pub(crate) fn write_header(params: &ProofParams) -> Vec<u8> {
    let mut out = Vec::with_capacity(10);
    let mut flags = 0u8;
    if !params.is_exact() {
        flags |= HAS_RANGE | params.exponent as u8;
    }
    if params.min_value != 0 {
        flags |= HAS_MIN;
    }
    out.push(flags);
    if !params.is_exact() {
        out.push((params.mantissa - 1) as u8);
    }
    if params.min_value != 0 {
        let mut buf = [0u8; 8];
        BigEndian::write_u64(&mut buf, params.min_value);
        out.extend_from_slice(&buf);
    }
    out
}

/// Parse only the header of a proof
pub fn info(proof: &[u8]) -> ConfidentialResult<ProofInfo> {
    ProofHeader::parse(proof).map(|h| h.info)
}

/// Turn digit commitments into rings: member `j` of ring `i` is
/// `C_i − j·scale·4^i·H`, so the member matching the digit opens to the blind alone.
pub(crate) fn expand_rings(
    digit_commitments: &[GroupElement],
    ring_sizes: &[usize],
    scale: u64,
    value_gen: &Generator,
) -> ConfidentialResult<Vec<Ring>> {
    let mut step = -(value_gen.element() * Scalar::from(scale));
    let mut rings = Vec::with_capacity(ring_sizes.len());

    for (&commitment, &size) in digit_commitments.iter().zip(ring_sizes) {
        let mut members = Vec::with_capacity(size);
        let mut member = commitment;
        members.push(member);
        for _ in 1..size {
            member += step;
            members.push(member);
        }
        rings.push(Ring::new(members)?);
        step = step.double_times(2);
    }
    Ok(rings)
}

/// Message signed by the ring signature: binds the commitment, generator,
/// header, digit commitments, response nibbles and any extra data.
pub(crate) fn signature_message(
    commitment: &Commitment,
    value_gen: &Generator,
    proof_prefix: &[u8],
    nibbles: &[u8],
    extra: &[u8],
) -> [u8; 32] {
    let mut t = confidential_transcript(b"rangeproof");
    t.append_point(b"commitment", &commitment.element());
    t.append_point(b"value-generator", &value_gen.element());
    t.append_message(b"proof-prefix", proof_prefix);
    t.append_message(b"response-nibbles", nibbles);
    if !extra.is_empty() {
        t.append_message(b"extra", extra);
    }
    t.challenge_bytes32(b"borromean-message")
}

/// Split a 32-byte slot into the scalar of its low 252 bits and its top nibble
pub(crate) fn split_slot(slot: &[u8; 32]) -> (Scalar, u8) {
    let mut low = *slot;
    let nibble = low[31] >> 4;
    low[31] &= !NIBBLE_MASK;
    (Scalar::from_bytes_mod_order(low), nibble)
}

/// Inverse of [`split_slot`]; `None` if `scalar` is not below 2^252
pub(crate) fn join_slot(scalar: &Scalar, nibble: u8) -> Option<[u8; 32]> {
    let mut bytes = scalar.to_bytes();
    if bytes[31] & NIBBLE_MASK != 0 {
        return None;
    }
    bytes[31] |= nibble << 4;
    Some(bytes)
}

/// Append `e0` and every response slot
pub(crate) fn write_signature(
    out: &mut Vec<u8>,
    signature: &BorromeanSignature,
    nibbles: &[Vec<u8>],
) -> ConfidentialResult<()> {
    out.extend_from_slice(&signature.e0);
    for (row, nibble_row) in signature.responses.iter().zip(nibbles) {
        for (s, &nibble) in row.iter().zip(nibble_row) {
            let slot = join_slot(s, nibble).ok_or_else(|| {
                ConfidentialError::InvalidArgument("response exceeds 252 bits".to_string())
            })?;
            out.extend_from_slice(&slot);
        }
    }
    Ok(())
}

/// Parse the signature block against known ring sizes, returning the
/// signature and the nibble of every slot
pub(crate) fn parse_signature(
    bytes: &[u8],
    ring_sizes: &[usize],
) -> ConfidentialResult<(BorromeanSignature, Vec<Vec<u8>>)> {
    let expected = BorromeanSignature::serialized_size(ring_sizes);
    if bytes.len() != expected {
        return Err(ConfidentialError::InvalidProof(format!(
            "signature block must be {} bytes, got {}",
            expected,
            bytes.len()
        )));
    }

    let mut e0 = [0u8; 32];
    e0.copy_from_slice(&bytes[..32]);

    let mut slots = bytes[32..].chunks_exact(32).map(|chunk| {
        let mut slot = [0u8; 32];
        slot.copy_from_slice(chunk);
        split_slot(&slot)
    });
    let mut responses = Vec::with_capacity(ring_sizes.len());
    let mut nibbles = Vec::with_capacity(ring_sizes.len());
    for &size in ring_sizes {
        let (row, nibble_row): (Vec<Scalar>, Vec<u8>) = slots.by_ref().take(size).unzip();
        responses.push(row);
        nibbles.push(nibble_row);
    }

    Ok((BorromeanSignature { e0, responses }, nibbles))
}

const VALUE_MARKER: u8 = 0x80;

/// Plaintext of the forged slot that carries the proven digits value
pub(crate) fn encode_value(digits: u64) -> [u8; 32] {
    let mut out = [0u8; 32];
    out[0] = VALUE_MARKER;
    BigEndian::write_u64(&mut out[8..16], digits);
    BigEndian::write_u64(&mut out[16..24], digits);
    out
}

/// Inverse of [`encode_value`]; `None` if the slot does not hold a value
pub(crate) fn decode_value(slot: &[u8; 32]) -> Option<u64> {
    let marked = slot[0] == VALUE_MARKER && slot[1..8].iter().all(|&b| b == 0);
    let tail_clear = slot[24..].iter().all(|&b| b == 0);
    if marked && tail_clear && slot[8..16] == slot[16..24] {
        Some(BigEndian::read_u64(&slot[8..16]))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ProofOptions;

    fn header_for(value: u64, options: ProofOptions) -> (ProofParams, Vec<u8>) {
        let params = ProofParams::choose(value, &options).unwrap();
        let header = write_header(&params);
        (params, header)
    }

    fn padded(header: &[u8]) -> Vec<u8> {
        let mut bytes = header.to_vec();
        bytes.resize(MIN_PROOF_SIZE.max(header.len()), 0);
        bytes
    }

    #[test]
    fn test_header_layout() {
        let (_, header) = header_for(5, ProofOptions::default());
        assert_eq!(header, vec![0x40, 2]);

        let (_, header) = header_for(1005, ProofOptions::default().with_min_value(1000));
        assert_eq!(header, vec![0x60, 2, 0, 0, 0, 0, 0, 0, 0x03, 0xe8]);

        let (_, header) = header_for(7, ProofOptions::exact());
        assert_eq!(header, vec![0x20, 0, 0, 0, 0, 0, 0, 0, 7]);

        let (_, header) = header_for(0, ProofOptions::exact());
        assert_eq!(header, vec![0x00]);
    }

    #[test]
    fn test_header_parse_matches_params() {
        let opts = ProofOptions::default().with_exponent(2).with_min_value(10);
        let (params, header) = header_for(12_345, opts);
        let parsed = ProofHeader::parse(&padded(&header)).unwrap();
        assert_eq!(parsed.len, header.len());
        assert_eq!(parsed.info.exponent, params.exponent);
        assert_eq!(parsed.info.mantissa, params.mantissa);
        assert_eq!(parsed.info.min_value, params.min_value);
        assert_eq!(Some(parsed.info.max_value), params.max_value());
        assert_eq!(parsed.scale, 100);
    }

    #[test]
    fn test_header_rejects_short_and_reserved() {
        assert_eq!(
            info(&[0x40; 64]),
            Err(ConfidentialError::TruncatedProof {
                needed: 65,
                available: 64
            })
        );
        let mut bytes = vec![0u8; 65];
        bytes[0] = 0x80;
        assert!(matches!(info(&bytes), Err(ConfidentialError::InvalidProof(_))));
    }

    #[test]
    fn test_header_rejects_bad_exponent_and_overflow() {
        let mut bytes = vec![0u8; 65];
        bytes[0] = HAS_RANGE | 19;
        assert!(info(&bytes).is_err());

        // 64-bit mantissa with scale 10 overflows
        bytes[0] = HAS_RANGE | 1;
        bytes[1] = 63;
        assert!(info(&bytes).is_err());

        // 64-bit mantissa plus a minimum overflows
        bytes[0] = HAS_RANGE | HAS_MIN;
        bytes[1] = 63;
        bytes[9] = 1;
        assert!(info(&bytes).is_err());
    }

    #[test]
    fn test_max_proof_size() {
        assert_eq!(MAX_PROOF_SIZE, 5130);
        let (_, header) = header_for(u64::MAX, ProofOptions::default());
        let parsed = ProofHeader::parse(&padded(&header)).unwrap();
        assert_eq!(parsed.proof_len(), 2 + 31 * 32 + 32 + 128 * 32);
        assert!(parsed.proof_len() <= MAX_PROOF_SIZE);
    }

    #[test]
    fn test_slot_split_and_join() {
        let mut slot = [0xabu8; 32];
        slot[31] = 0xd7;
        let (scalar, nibble) = split_slot(&slot);
        assert_eq!(nibble, 0xd);
        assert_eq!(scalar.to_bytes()[31], 0x07);
        assert_eq!(join_slot(&scalar, nibble), Some(slot));

        // ℓ − 1 does not fit below 2^252
        assert_eq!(join_slot(&-Scalar::ONE, 0), None);
    }

    #[test]
    fn test_signature_block_roundtrip() {
        let signature = BorromeanSignature {
            e0: [7u8; 32],
            responses: vec![
                vec![Scalar::from(1u64), Scalar::from(2u64), Scalar::from(3u64)],
                vec![Scalar::from(4u64)],
            ],
        };
        let nibbles = vec![vec![0x1, 0xf, 0x0], vec![0x9]];
        let mut out = Vec::new();
        write_signature(&mut out, &signature, &nibbles).unwrap();
        assert_eq!(out.len(), 5 * 32);
        assert_eq!(out[32 + 63], 0xf0);

        let (parsed, parsed_nibbles) = parse_signature(&out, &[3, 1]).unwrap();
        assert_eq!(parsed, signature);
        assert_eq!(parsed_nibbles, nibbles);
        assert!(parse_signature(&out[1..], &[3, 1]).is_err());
    }

    #[test]
    fn test_value_slot_encoding() {
        let slot = encode_value(0x0102_0304_0506_0708);
        assert_eq!(decode_value(&slot), Some(0x0102_0304_0506_0708));

        let mut bad = slot;
        bad[20] ^= 1;
        assert_eq!(decode_value(&bad), None);
        assert_eq!(decode_value(&[0u8; 32]), None);
    }
}
