//! Borromean signer

use crate::hash::{announcement, ring_challenge, SeedHasher};
use crate::{BorromeanSignature, Ring, RingWitness};
use confidential_core::{ConfidentialError, ConfidentialResult, Generator, GroupElement, Scalar};
use rand_core::{CryptoRng, RngCore};
use tracing::trace;

/// Produces Borromean signatures over a fixed base point
#[derive(Debug, Clone)]
pub struct BorromeanProver {
    base: GroupElement,
}

impl Default for BorromeanProver {
    fn default() -> Self {
        Self::new(Generator::basepoint())
    }
}

impl BorromeanProver {
    /// Create a signer whose keys are multiples of `base`
    pub fn new(base: Generator) -> Self {
        Self {
            base: base.element(),
        }
    }

    /// Sign with forged responses drawn from `rng`
    pub fn sign_with_rng<R: RngCore + CryptoRng>(
        &self,
        rng: &mut R,
        rings: &[Ring],
        witnesses: &[RingWitness],
        message: &[u8],
    ) -> ConfidentialResult<BorromeanSignature> {
        let mut responses = Vec::with_capacity(rings.len());
        for ring in rings {
            let mut row = Vec::with_capacity(ring.len());
            for _ in 0..ring.len() {
                row.push(Scalar::random(rng));
            }
            responses.push(row);
        }
        self.sign_with_responses(rings, witnesses, &responses, message)
    }

    /// Sign with caller-chosen forged responses.
    ///
    /// `responses` has one entry per member; the entry at each ring's secret
    /// index is ignored and replaced by the solved response.
    pub fn sign_with_responses(
        &self,
        rings: &[Ring],
        witnesses: &[RingWitness],
        responses: &[Vec<Scalar>],
        message: &[u8],
    ) -> ConfidentialResult<BorromeanSignature> {
        self.check_shape(rings, witnesses, responses)?;

        let mut responses = responses.to_vec();
        let mut seed = SeedHasher::new();

        // Forward pass: from each secret member's announcement to the ring end
        for (i, (ring, witness)) in rings.iter().zip(witnesses).enumerate() {
            let mut r = (self.base * witness.nonce).to_bytes();
            for j in witness.secret_index + 1..ring.len() {
                let e = ring_challenge(&r, message, i, j);
                let point = announcement(&e, &ring.members()[j], &responses[i][j], &self.base);
                if e == Scalar::ZERO || point.is_identity() {
                    return Err(ConfidentialError::InvalidArgument(
                        "degenerate announcement".to_string(),
                    ));
                }
                r = point.to_bytes();
            }
            seed.absorb(&r);
        }
        let e0 = seed.finalize(message);

        // Closing pass: from e0 back round to each secret member
        for (i, (ring, witness)) in rings.iter().zip(witnesses).enumerate() {
            let mut e = ring_challenge(&e0, message, i, 0);
            for j in 0..witness.secret_index {
                let point = announcement(&e, &ring.members()[j], &responses[i][j], &self.base);
                if e == Scalar::ZERO || point.is_identity() {
                    return Err(ConfidentialError::InvalidArgument(
                        "degenerate announcement".to_string(),
                    ));
                }
                e = ring_challenge(&point.to_bytes(), message, i, j + 1);
            }

            if e == Scalar::ZERO {
                return Err(ConfidentialError::InvalidArgument(
                    "zero challenge".to_string(),
                ));
            }
            let s = witness.nonce - e * witness.secret;
            if s == Scalar::ZERO {
                return Err(ConfidentialError::InvalidArgument(
                    "zero response".to_string(),
                ));
            }
            responses[i][witness.secret_index] = s;
        }

        trace!(rings = rings.len(), "borromean signature created");
        Ok(BorromeanSignature { e0, responses })
    }

    fn check_shape(
        &self,
        rings: &[Ring],
        witnesses: &[RingWitness],
        responses: &[Vec<Scalar>],
    ) -> ConfidentialResult<()> {
        if rings.is_empty() {
            return Err(ConfidentialError::EmptyInput);
        }
        if witnesses.len() != rings.len() || responses.len() != rings.len() {
            return Err(ConfidentialError::InvalidArgument(format!(
                "{} rings, {} witnesses, {} response rows",
                rings.len(),
                witnesses.len(),
                responses.len()
            )));
        }

        for (i, ((ring, witness), row)) in rings.iter().zip(witnesses).zip(responses).enumerate() {
            if row.len() != ring.len() {
                return Err(ConfidentialError::InvalidArgument(format!(
                    "ring {} has {} members but {} responses",
                    i,
                    ring.len(),
                    row.len()
                )));
            }
            let opens = ring
                .members()
                .get(witness.secret_index)
                .map(|member| *member == self.base * witness.secret)
                .unwrap_or(false);
            if !opens {
                return Err(ConfidentialError::InvalidSecretIndex {
                    ring: i,
                    index: witness.secret_index,
                    size: ring.len(),
                });
            }
            // k·G must not be the identity
            if witness.nonce == Scalar::ZERO {
                return Err(ConfidentialError::InvalidArgument(format!(
                    "ring {} has a zero nonce",
                    i
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::OsRng;

    fn random_point() -> GroupElement {
        GroupElement::from(curve25519_dalek::ristretto::RistrettoPoint::random(&mut OsRng))
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let prover = BorromeanProver::default();
        let ring = Ring::new(vec![random_point(), random_point()]).unwrap();
        let witness = RingWitness::new(0, Scalar::from(3u64), Scalar::random(&mut OsRng));

        assert_eq!(
            prover.sign_with_rng(&mut OsRng, &[ring], &[witness], b"m"),
            Err(ConfidentialError::InvalidSecretIndex { ring: 0, index: 0, size: 2 })
        );
    }

    #[test]
    fn test_out_of_range_index_rejected() {
        let prover = BorromeanProver::default();
        let x = Scalar::random(&mut OsRng);
        let base = Generator::basepoint().element();
        let ring = Ring::new(vec![base * x]).unwrap();
        let witness = RingWitness::new(1, x, Scalar::random(&mut OsRng));

        assert!(matches!(
            prover.sign_with_rng(&mut OsRng, &[ring], &[witness], b"m"),
            Err(ConfidentialError::InvalidSecretIndex { index: 1, .. })
        ));
    }

    #[test]
    fn test_shape_mismatch_rejected() {
        let prover = BorromeanProver::default();
        let ring = Ring::new(vec![random_point()]).unwrap();
        assert!(matches!(
            prover.sign_with_responses(&[ring], &[], &[], b"m"),
            Err(ConfidentialError::InvalidArgument(_))
        ));
        assert_eq!(
            prover.sign_with_responses(&[], &[], &[], b"m"),
            Err(ConfidentialError::EmptyInput)
        );
    }

    #[test]
    fn test_zero_nonce_rejected() {
        let prover = BorromeanProver::default();
        let x = Scalar::from(9u64);
        let ring = Ring::new(vec![Generator::basepoint().element() * x]).unwrap();

        let zero = RingWitness::new(0, x, Scalar::ZERO);
        assert!(matches!(
            prover.sign_with_responses(&[ring.clone()], &[zero], &[vec![Scalar::ONE]], b"m"),
            Err(ConfidentialError::InvalidArgument(_))
        ));

        let witness = RingWitness::new(0, x, Scalar::from(5u64));
        let signature = prover
            .sign_with_responses(&[ring.clone()], &[witness], &[vec![Scalar::ONE]], b"m")
            .unwrap();
        assert!(crate::BorromeanVerifier::default()
            .verify(&signature, &[ring], b"m")
            .unwrap());
    }
}
