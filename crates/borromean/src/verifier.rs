//! Borromean verifier

use crate::hash::{announcement, ring_challenge, SeedHasher};
use crate::{BorromeanSignature, Ring};
use confidential_core::{ConfidentialError, ConfidentialResult, Generator, GroupElement, Scalar};
use subtle::ConstantTimeEq;
use tracing::debug;

/// Verifies Borromean signatures over a fixed base point
#[derive(Debug, Clone)]
pub struct BorromeanVerifier {
    base: GroupElement,
}

impl Default for BorromeanVerifier {
    fn default() -> Self {
        Self::new(Generator::basepoint())
    }
}

impl BorromeanVerifier {
    pub fn new(base: Generator) -> Self {
        Self {
            base: base.element(),
        }
    }

    /// Verify a signature.
    ///
    /// A signature whose shape does not match the rings is an error; a
    /// well-formed signature that fails the challenge chain returns `Ok(false)`.
    pub fn verify(
        &self,
        signature: &BorromeanSignature,
        rings: &[Ring],
        message: &[u8],
    ) -> ConfidentialResult<bool> {
        Ok(self
            .verify_with_challenges(signature, rings, message)?
            .is_some())
    }

    /// Verify and, on success, return the challenge used for every member.
    ///
    /// Anyone who knows a ring's nonce or secret can use these to solve for the
    /// other from the published response.
    pub fn verify_with_challenges(
        &self,
        signature: &BorromeanSignature,
        rings: &[Ring],
        message: &[u8],
    ) -> ConfidentialResult<Option<Vec<Vec<Scalar>>>> {
        if rings.is_empty() {
            return Err(ConfidentialError::EmptyInput);
        }
        let shape_ok = signature.responses.len() == rings.len()
            && signature
                .responses
                .iter()
                .zip(rings)
                .all(|(row, ring)| row.len() == ring.len());
        if !shape_ok {
            return Err(ConfidentialError::InvalidProof(
                "signature shape does not match rings".to_string(),
            ));
        }

        let mut seed = SeedHasher::new();
        let mut challenges = Vec::with_capacity(rings.len());

        for (i, (ring, row)) in rings.iter().zip(&signature.responses).enumerate() {
            let mut e = ring_challenge(&signature.e0, message, i, 0);
            let mut ring_challenges = Vec::with_capacity(ring.len());

            for (j, (member, s)) in ring.members().iter().zip(row).enumerate() {
                if *s == Scalar::ZERO || e == Scalar::ZERO || member.is_identity() {
                    debug!(ring = i, member = j, "degenerate ring member or response");
                    return Ok(None);
                }
                let point = announcement(&e, member, s, &self.base);
                if point.is_identity() {
                    debug!(ring = i, member = j, "identity announcement");
                    return Ok(None);
                }
                ring_challenges.push(e);

                let r = point.to_bytes();
                if j + 1 == ring.len() {
                    seed.absorb(&r);
                } else {
                    e = ring_challenge(&r, message, i, j + 1);
                }
            }
            challenges.push(ring_challenges);
        }

        let e0 = seed.finalize(message);
        if bool::from(e0[..].ct_eq(&signature.e0[..])) {
            Ok(Some(challenges))
        } else {
            debug!("borromean challenge seed mismatch");
            Ok(None)
        }
    }
}
