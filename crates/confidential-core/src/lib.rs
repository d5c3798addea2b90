//! # Confidential Core
//!
//! This crate provides the foundational types shared by the confidential-value
//! crates (Pedersen commitments, Borromean ring signatures, range proofs):
//!
//! - Ristretto group elements and scalar helpers
//! - Generator derivation for independent value generators
//! - Transcript management for Fiat-Shamir and deterministic nonces
//! - The shared error type and the explicitly passed context
//!
//! ## Mathematical Background
//!
//! A Pedersen commitment to `v` with blinding factor `r` is
//! ```text
//! C = r·G + v·H
//! ```
//! where `G` is the Ristretto basepoint and `H` is a value generator derived
//! by hashing to the group, so no relation `H = x·G` is known to anyone.
//! Commitments add homomorphically: `C(r1, v1) + C(r2, v2) = C(r1 + r2, v1 + v2)`.

pub mod context;
pub mod errors;
pub mod generators;
pub mod group;
pub mod transcript;
pub mod utils;

pub use context::*;
pub use errors::*;
pub use generators::*;
pub use group::*;
pub use transcript::*;

/// Re-export commonly used types from curve25519-dalek
pub use curve25519_dalek::{
    ristretto::{CompressedRistretto, RistrettoPoint},
    scalar::Scalar,
    traits::{Identity, VartimeMultiscalarMul},
};

/// Re-export merlin transcript
pub use merlin::Transcript;
