//! # Pedersen Commitments
//!
//! Additively homomorphic commitments to 64-bit values over Ristretto, and the
//! blinding-factor algebra that lets a set of inputs and outputs be checked
//! for balance without revealing any value.
//!
//! ## Components
//!
//! - [`commitment`]: the [`Commitment`] type and [`commit`]
//! - [`blinding`]: blinding sums, including the multi-generator variant
//! - [`commitment_engine`]: [`CommitmentEngine`] bound to a context, and tally verification

pub mod blinding;
pub mod commitment;
pub mod commitment_engine;


// Re-export key types
pub use blinding::{blind_generator_blind_sum, blind_sum};
pub use commitment::{commit, Commitment};
pub use commitment_engine::{verify_tally, CommitmentEngine};
