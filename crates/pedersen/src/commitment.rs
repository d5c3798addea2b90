//! Pedersen commitments `C = blind·G + value·H`

use confidential_core::{
    ConfidentialError, ConfidentialResult, Generator, GroupElement, Scalar, POINT_BYTES,
};
use serde::{Deserialize, Serialize};

/// A commitment to a 64-bit value. Never the identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commitment(GroupElement);

impl Commitment {
    /// Wrap a group element, rejecting the identity
    pub fn from_element(element: GroupElement) -> ConfidentialResult<Self> {
        if element.is_identity() {
            return Err(ConfidentialError::InvalidCommitment(
                "identity element".to_string(),
            ));
        }
        Ok(Self(element))
    }

    /// The underlying group element
    pub fn element(&self) -> GroupElement {
        self.0
    }

    /// Serialize the commitment to its 32-byte encoding
    pub fn to_bytes(&self) -> [u8; POINT_BYTES] {
        self.0.to_bytes()
    }

    /// Deserialize the commitment from bytes
    pub fn from_bytes(bytes: &[u8]) -> ConfidentialResult<Self> {
        if bytes.len() != POINT_BYTES {
            return Err(ConfidentialError::InvalidCommitment(format!(
                "expected {} bytes, got {}",
                POINT_BYTES,
                bytes.len()
            )));
        }
        let element = GroupElement::from_bytes(bytes)
            .map_err(|_| ConfidentialError::InvalidCommitment("invalid encoding".to_string()))?;
        Self::from_element(element)
    }
}

/// Commit to `value` with blinding factor `blind`.
///
/// Fails with `InvalidBlind` for a zero blind and `InvalidCommitment` if the
/// result happens to be the identity.
pub fn commit(
    blind: &Scalar,
    value: u64,
    value_gen: &Generator,
    blind_gen: &Generator,
) -> ConfidentialResult<Commitment> {
    if *blind == Scalar::ZERO {
        return Err(ConfidentialError::InvalidBlind);
    }
    let point = blind_gen.element() * *blind + value_gen.element() * Scalar::from(value);
    Commitment::from_element(point)
}
