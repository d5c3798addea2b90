//! Challenge chaining and the shared seed `e0`

use confidential_core::{GroupElement, Scalar};
use curve25519_dalek::ristretto::RistrettoPoint;
use sha2::{Digest, Sha256, Sha512};

/// Per-member challenge `H(prev ‖ m ‖ ring ‖ position)` reduced mod ℓ.
///
/// `prev` is `e0` for position 0 and the compressed announcement of the
/// previous member otherwise.
pub(crate) fn ring_challenge(prev: &[u8; 32], message: &[u8], ring: usize, position: usize) -> Scalar {
    let mut hasher = Sha512::new();
    hasher.update(prev);
    hasher.update(message);
    hasher.update((ring as u32).to_le_bytes());
    hasher.update((position as u32).to_le_bytes());

    let mut wide = [0u8; 64];
    wide.copy_from_slice(&hasher.finalize());
    Scalar::from_bytes_mod_order_wide(&wide)
}

/// Announcement `R = e·P + s·base`
pub(crate) fn announcement(
    challenge: &Scalar,
    member: &GroupElement,
    response: &Scalar,
    base: &GroupElement,
) -> GroupElement {
    GroupElement::multiscalar_mul(
        [*challenge, *response],
        [RistrettoPoint::from(*member), RistrettoPoint::from(*base)],
    )
}

/// Accumulates the last announcement of every ring into `e0`
pub(crate) struct SeedHasher(Sha256);

impl SeedHasher {
    pub(crate) fn new() -> Self {
        Self(Sha256::new())
    }

    pub(crate) fn absorb(&mut self, last_announcement: &[u8; 32]) {
        self.0.update(last_announcement);
    }

    pub(crate) fn finalize(mut self, message: &[u8]) -> [u8; 32] {
        self.0.update(message);
        self.0.finalize().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_challenge_binds_indices() {
        let prev = [5u8; 32];
        let base = ring_challenge(&prev, b"msg", 0, 0);
        assert_eq!(base, ring_challenge(&prev, b"msg", 0, 0));
        assert_ne!(base, ring_challenge(&prev, b"msg", 1, 0));
        assert_ne!(base, ring_challenge(&prev, b"msg", 0, 1));
        assert_ne!(base, ring_challenge(&prev, b"msG", 0, 0));
    }

    #[test]
    fn test_seed_depends_on_order() {
        let mut a = SeedHasher::new();
        a.absorb(&[1u8; 32]);
        a.absorb(&[2u8; 32]);
        let mut b = SeedHasher::new();
        b.absorb(&[2u8; 32]);
        b.absorb(&[1u8; 32]);
        assert_ne!(a.finalize(b"m"), b.finalize(b"m"));
    }
}
