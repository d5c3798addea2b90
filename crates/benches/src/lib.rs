//! Benchmarks for the confidential-value crates
//!
//! This crate contains performance benchmarks for:
//! - Commitment creation and tally verification
//! - Borromean ring signature signing and verification
//! - Range proof signing, verification, rewinding and batch verification
//!
//! Run benchmarks with:
//! ```bash
//! cargo bench -p benches
//! ```
//!
//! Or run specific benchmarks:
//! ```bash
//! cargo bench -p benches --bench range_proof
//! cargo bench -p benches --bench borromean
//! ```

pub use borromean;
pub use confidential_core;
pub use pedersen;
pub use rangeproof;
