//! Transcript management for Fiat-Shamir hashing and deterministic nonces

use crate::GroupElement;
use curve25519_dalek::scalar::Scalar;
use merlin::Transcript;

/// Extension trait for Transcript to add commitment-specific methods
pub trait TranscriptProtocol {
    /// Append a group element to the transcript
    fn append_point(&mut self, label: &'static [u8], point: &GroupElement);

    /// Append a scalar to the transcript
    fn append_scalar(&mut self, label: &'static [u8], scalar: &Scalar);

    /// Append an index (ring or member position)
    fn append_index(&mut self, label: &'static [u8], index: usize);

    /// Challenge scalar from transcript
    fn challenge_scalar(&mut self, label: &'static [u8]) -> Scalar;

    /// Challenge 32 raw bytes from transcript
    fn challenge_bytes32(&mut self, label: &'static [u8]) -> [u8; 32];
}

impl TranscriptProtocol for Transcript {
    fn append_point(&mut self, label: &'static [u8], point: &GroupElement) {
        self.append_message(label, point.compress().as_bytes());
    }

    fn append_scalar(&mut self, label: &'static [u8], scalar: &Scalar) {
        self.append_message(label, scalar.as_bytes());
    }

    fn append_index(&mut self, label: &'static [u8], index: usize) {
        self.append_u64(label, index as u64);
    }

    fn challenge_scalar(&mut self, label: &'static [u8]) -> Scalar {
        let mut buf = [0u8; 64];
        self.challenge_bytes(label, &mut buf);
        Scalar::from_bytes_mod_order_wide(&buf)
    }

    fn challenge_bytes32(&mut self, label: &'static [u8]) -> [u8; 32] {
        let mut buf = [0u8; 32];
        self.challenge_bytes(label, &mut buf);
        buf
    }
}

/// Create a new transcript with domain separation
pub fn confidential_transcript(domain_label: &'static [u8]) -> Transcript {
    let mut transcript = Transcript::new(b"ConfidentialValues");
    transcript.append_message(b"domain", domain_label);
    transcript
}
