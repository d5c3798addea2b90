//! Generator derivation and the blinding/value generator pair
//!
//! Commitments use two generators: the blinding generator `G` (the Ristretto
//! basepoint) and a value generator `H`. Value generators are derived by
//! hashing seed material onto the group, so nobody knows a scalar relating
//! them to `G` or to each other. Multi-asset settings derive one value
//! generator per asset and may blind it with a secret offset.

use crate::{ConfidentialError, ConfidentialResult, GroupElement};
use curve25519_dalek::{constants::RISTRETTO_BASEPOINT_POINT, ristretto::RistrettoPoint, scalar::Scalar};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha512};

/// Domain label mixed into every generator derivation
const GENERATOR_DOMAIN: &[u8] = b"confidential_generator_";

/// Seed of the default value generator `H`
pub const DEFAULT_VALUE_GENERATOR_SEED: [u8; 32] = *b"confidential/value-generator/H\0\0";

/// A curve generator. Never the identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Generator(GroupElement);

impl Generator {
    /// Wrap a group element, rejecting the identity
    pub fn new(element: GroupElement) -> ConfidentialResult<Self> {
        if element.is_identity() {
            return Err(ConfidentialError::InvalidGenerator(
                "identity element".to_string(),
            ));
        }
        Ok(Self(element))
    }

    /// The Ristretto basepoint, used as the blinding generator
    pub fn basepoint() -> Self {
        Self(GroupElement::from(RISTRETTO_BASEPOINT_POINT))
    }

    /// The underlying group element
    pub fn element(&self) -> GroupElement {
        self.0
    }

    /// The underlying Ristretto point
    pub fn point(&self) -> RistrettoPoint {
        self.0 .0
    }

    /// Canonical 32-byte encoding
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0.to_bytes()
    }

    /// Parse a 32-byte encoding
    pub fn from_bytes(bytes: &[u8]) -> ConfidentialResult<Self> {
        let element = GroupElement::from_bytes(bytes)
            .map_err(|e| ConfidentialError::InvalidGenerator(e.to_string()))?;
        Self::new(element)
    }
}

/// Hash a seed onto the group (deterministic)
fn hash_to_point(seed: &[u8]) -> RistrettoPoint {
    let mut hasher = Sha512::new();
    hasher.update(GENERATOR_DOMAIN);
    hasher.update(seed);
    let hash = hasher.finalize();

    let mut bytes = [0u8; 64];
    bytes.copy_from_slice(&hash);
    RistrettoPoint::from_uniform_bytes(&bytes)
}

/// Derive an independent generator from seed material
pub fn derive_generator(seed: &[u8; 32]) -> ConfidentialResult<Generator> {
    let point = GroupElement::from(hash_to_point(seed));
    if point.is_identity() {
        return Err(ConfidentialError::InvalidSeed);
    }
    Ok(Generator(point))
}

/// Derive a generator offset by a secret blind: `derive_generator(seed) + blind·G`
pub fn derive_blinded_generator(seed: &[u8; 32], blind: &Scalar) -> ConfidentialResult<Generator> {
    if *blind == Scalar::ZERO {
        return Err(ConfidentialError::InvalidBlind);
    }
    let base = derive_generator(seed)?;
    let point = base.element() + GroupElement::from(RistrettoPoint::mul_base(blind));
    if point.is_identity() {
        return Err(ConfidentialError::InvalidSeed);
    }
    Ok(Generator(point))
}

/// The generator pair used by Pedersen commitments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PedersenGenerators {
    /// Blinding generator `G`
    pub blind: Generator,
    /// Value generator `H`
    pub value: Generator,
}

impl PedersenGenerators {
    /// Basepoint blinding generator and the default value generator
    pub fn new() -> ConfidentialResult<Self> {
        Ok(Self {
            blind: Generator::basepoint(),
            value: derive_generator(&DEFAULT_VALUE_GENERATOR_SEED)?,
        })
    }

    /// Same blinding generator, different value generator
    pub fn with_value_generator(&self, value: Generator) -> Self {
        Self {
            blind: self.blind,
            value,
        }
    }

    /// Compute `blind·G + value·H` without validation
    pub fn commit_point(&self, blind: &Scalar, value: u64) -> GroupElement {
        // Constant time in the blind
        self.blind.element() * *blind + self.value.element() * Scalar::from(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::OsRng;

    #[test]
    fn test_derivation_is_deterministic() {
        let seed = [7u8; 32];
        assert_eq!(derive_generator(&seed).unwrap(), derive_generator(&seed).unwrap());
    }

    #[test]
    fn test_distinct_seeds_give_distinct_generators() {
        let a = derive_generator(&[1u8; 32]).unwrap();
        let b = derive_generator(&[2u8; 32]).unwrap();
        assert_ne!(a, b);
        assert_ne!(a, Generator::basepoint());
    }

    #[test]
    fn test_blinded_generator_offsets_base() {
        let seed = [3u8; 32];
        let blind = Scalar::random(&mut OsRng);
        let blinded = derive_blinded_generator(&seed, &blind).unwrap();
        let expected = derive_generator(&seed).unwrap().element()
            + Generator::basepoint().element() * blind;
        assert_eq!(blinded.element(), expected);
    }

    #[test]
    fn test_blinded_generator_rejects_zero_blind() {
        assert_eq!(
            derive_blinded_generator(&[3u8; 32], &Scalar::ZERO),
            Err(ConfidentialError::InvalidBlind)
        );
    }

    #[test]
    fn test_generator_rejects_identity() {
        assert!(Generator::new(GroupElement::identity()).is_err());
        assert!(Generator::from_bytes(&[0u8; 32]).is_err());
    }

    #[test]
    fn test_generator_bytes_roundtrip() {
        let gens = PedersenGenerators::new().unwrap();
        let parsed = Generator::from_bytes(&gens.value.to_bytes()).unwrap();
        assert_eq!(parsed, gens.value);
    }

    #[test]
    fn test_commit_point() {
        let gens = PedersenGenerators::new().unwrap();
        let blind = Scalar::from(5u64);
        let expected = gens.blind.element() * blind + gens.value.element() * Scalar::from(9u64);
        assert_eq!(gens.commit_point(&blind, 9), expected);
    }
}
