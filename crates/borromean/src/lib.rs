//! # Borromean Ring Signatures
//!
//! A Borromean signature proves, for each of several rings of public keys,
//! knowledge of the discrete log of one member per ring without revealing
//! which. All rings share a single challenge seed `e0`, so the signature costs
//! one 32-byte seed plus one scalar per member.
//!
//! ## Construction
//!
//! For ring `i` with members `P[i][0..n]`, responses `s[i][j]` and message `m`:
//!
//! ```text
//! e[i][0]   = H(e0 ‖ m ‖ i ‖ 0)
//! R[i][j]   = e[i][j]·P[i][j] + s[i][j]·G
//! e[i][j+1] = H(R[i][j] ‖ m ‖ i ‖ j+1)
//! e0        = H'(R[0][n0−1] ‖ … ‖ R[k][nk−1] ‖ m)
//! ```
//!
//! The signer starts each ring at its secret member with `R = k·G`, walks
//! forward to the end of the ring, hashes all ring ends into `e0`, then walks
//! from the start of each ring back to the secret member and closes the loop
//! with `s = k − e·x`.

mod hash;
pub mod prover;
pub mod ring;
pub mod signature;
pub mod verifier;


pub use prover::*;
pub use ring::*;
pub use signature::*;
pub use verifier::*;
