//! Error types for confidential-value operations

use thiserror::Error;

/// Main error type shared by the commitment, ring signature and range proof crates
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfidentialError {
    /// Invalid argument caught before any cryptographic work
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Blinding factor is zero or not a canonical scalar
    #[error("Invalid blinding factor")]
    InvalidBlind,

    /// Generator is the identity or has an invalid encoding
    #[error("Invalid generator: {0}")]
    InvalidGenerator(String),

    /// Generator derivation collapsed to the identity
    #[error("Generator seed produced the identity element")]
    InvalidSeed,

    /// Commitment is the identity or has an invalid encoding
    #[error("Invalid commitment: {0}")]
    InvalidCommitment(String),

    /// Empty input where at least one element is required
    #[error("Empty input")]
    EmptyInput,

    /// Role split index inconsistent with the array length
    #[error("Role split {split} is inconsistent with {len} entries")]
    Overflow { split: usize, len: usize },

    /// Value lies below the requested minimum
    #[error("Value {value} is below the minimum value {min_value}")]
    ValueOutOfRange { value: u64, min_value: u64 },

    /// Message does not fit in the proof's spare space
    #[error("Message of {len} bytes exceeds the {capacity} bytes available")]
    MessageTooLong { len: usize, capacity: usize },

    /// Fewer bytes than the proof header requires
    #[error("Truncated proof: need {needed} bytes, have {available}")]
    TruncatedProof { needed: usize, available: usize },

    /// Malformed proof or failed cryptographic check
    #[error("Invalid proof: {0}")]
    InvalidProof(String),

    /// Ring witness does not match its ring
    #[error("Ring {ring}: secret index {index} does not open a member of {size}")]
    InvalidSecretIndex { ring: usize, index: usize, size: usize },

    /// Rewinding did not reproduce the commitment
    #[error("Rewind did not reproduce the commitment")]
    RewindMismatch,

    /// Signature verification failed
    #[error("Verification failed")]
    VerificationFailed,
}

/// Result type for confidential-value operations
pub type ConfidentialResult<T> = Result<T, ConfidentialError>;
