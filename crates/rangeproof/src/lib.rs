//! # Range Proofs
//!
//! Proves that a Pedersen commitment `C = r·G + v·H` opens to a value in a
//! public range `[min_value, max_value]` without revealing `v`.
//!
//! ## Construction
//!
//! The prover writes `v = min_value + d·10^exp` and splits the digits value `d`
//! into base-4 digits `d_i`. Each digit gets a commitment
//!
//! ```text
//! C_i = r_i·G + d_i·4^i·10^exp·H,     Σ r_i = r
//! ```
//!
//! and a ring `{C_i − j·4^i·10^exp·H : j = 0..3}`. Exactly one member of each
//! ring is a multiple of `G` alone, namely the one with `j = d_i`; a single
//! Borromean signature over all rings proves the prover knows its discrete log.
//! The verifier reconstructs the last digit commitment as
//! `C − min_value·H − Σ C_i`, so the digits are bound to `C`.
//!
//! Every digit blind and forged response is derived from a 32-byte nonce seed.
//! Whoever holds the seed can rewind the proof, recovering `v`, `r` and a
//! message hidden in the response slots.

pub mod nonce;
pub mod params;
pub mod proof;
pub mod prover;
pub mod verifier;


pub use nonce::NonceStream;
pub use params::{ProofOptions, MAX_EXPONENT, MAX_RINGS};
pub use proof::{info, ProofInfo, ProvenRange, MAX_PROOF_SIZE, MIN_PROOF_SIZE};
pub use prover::*;
pub use verifier::*;
