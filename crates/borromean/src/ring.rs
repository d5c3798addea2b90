//! Rings of public keys and the prover's per-ring secrets

use confidential_core::{ConfidentialError, ConfidentialResult, GroupElement, Scalar};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// An ordered, non-empty set of candidate public keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ring {
    members: Vec<GroupElement>,
}

impl Ring {
    /// Create a ring, rejecting an empty member list
    pub fn new(members: Vec<GroupElement>) -> ConfidentialResult<Self> {
        if members.is_empty() {
            return Err(ConfidentialError::EmptyInput);
        }
        Ok(Self { members })
    }

    /// Ring members in signing order
    pub fn members(&self) -> &[GroupElement] {
        &self.members
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the ring has no members
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// What the signer knows about one ring: which member it can open, that
/// member's discrete log, and the signing nonce for that ring.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct RingWitness {
    /// Position of the member whose discrete log is known
    pub secret_index: usize,
    /// Discrete log of `members[secret_index]` with respect to the base point
    pub secret: Scalar,
    /// Nonce `k`; the announcement of the secret member is `k·base`
    pub nonce: Scalar,
}

impl RingWitness {
    pub fn new(secret_index: usize, secret: Scalar, nonce: Scalar) -> Self {
        Self {
            secret_index,
            secret,
            nonce,
        }
    }
}

impl fmt::Debug for RingWitness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingWitness")
            .field("secret_index", &self.secret_index)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_ring_rejected() {
        assert_eq!(Ring::new(vec![]), Err(ConfidentialError::EmptyInput));
    }

    #[test]
    fn test_witness_debug_hides_secrets() {
        let w = RingWitness::new(2, Scalar::from(77u64), Scalar::from(5u64));
        let printed = format!("{:?}", w);
        assert!(printed.contains("secret_index: 2"));
        assert!(!printed.contains("secret:"));
    }
}
