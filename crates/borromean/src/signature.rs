//! Borromean signature structure and its flat serialization

use confidential_core::{utils::scalar_from_canonical, ConfidentialError, ConfidentialResult, Scalar};
use serde::{Deserialize, Serialize};

/// A Borromean multi-ring signature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorromeanSignature {
    /// Shared challenge seed closing every ring
    pub e0: [u8; 32],
    /// One response per member, grouped by ring
    pub responses: Vec<Vec<Scalar>>,
}

impl BorromeanSignature {
    /// Size of the serialized signature for the given ring sizes
    pub fn serialized_size(ring_sizes: &[usize]) -> usize {
        32 * (1 + ring_sizes.iter().sum::<usize>())
    }

    /// Ring sizes this signature covers
    pub fn ring_sizes(&self) -> Vec<usize> {
        self.responses.iter().map(Vec::len).collect()
    }

    /// Serialize as `e0 ‖ s[0][0] ‖ s[0][1] ‖ …`, ring-major
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::serialized_size(&self.ring_sizes()));
        out.extend_from_slice(&self.e0);
        for s in self.responses.iter().flatten() {
            out.extend_from_slice(s.as_bytes());
        }
        out
    }

    /// Parse against known ring sizes. The length must match exactly and every
    /// response must be a canonical scalar.
    pub fn from_bytes(bytes: &[u8], ring_sizes: &[usize]) -> ConfidentialResult<Self> {
        let expected = Self::serialized_size(ring_sizes);
        if bytes.len() != expected {
            return Err(ConfidentialError::InvalidProof(format!(
                "Borromean signature must be {} bytes, got {}",
                expected,
                bytes.len()
            )));
        }

        let mut e0 = [0u8; 32];
        e0.copy_from_slice(&bytes[..32]);

        let mut chunks = bytes[32..].chunks_exact(32);
        let mut responses = Vec::with_capacity(ring_sizes.len());
        for &size in ring_sizes {
            let ring = chunks
                .by_ref()
                .take(size)
                .map(|chunk| {
                    scalar_from_canonical(chunk).ok_or_else(|| {
                        ConfidentialError::InvalidProof("non-canonical response".to_string())
                    })
                })
                .collect::<ConfidentialResult<Vec<_>>>()?;
            responses.push(ring);
        }

        Ok(Self { e0, responses })
    }
}
