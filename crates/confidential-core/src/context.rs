//! Explicitly passed configuration and generator capability

use crate::{ConfidentialResult, Generator, PedersenGenerators};
use serde::{Deserialize, Serialize};

/// Largest serialized range proof: 64-bit mantissa with an explicit minimum
pub const DEFAULT_MAX_PROOF_SIZE: usize = 5130;

/// Tunable behaviour shared by the commitment and range proof engines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextConfig {
    /// Whether `blind_sum` over no blinding factors returns zero instead of failing
    pub allow_empty_blind_sum: bool,
    /// Proofs longer than this are rejected before parsing
    pub max_proof_size: usize,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            allow_empty_blind_sum: true,
            max_proof_size: DEFAULT_MAX_PROOF_SIZE,
        }
    }
}

/// Immutable context threaded through every commitment and proof operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfidentialContext {
    generators: PedersenGenerators,
    config: ContextConfig,
}

impl ConfidentialContext {
    /// Default generators and configuration
    pub fn new() -> ConfidentialResult<Self> {
        Self::with_config(ContextConfig::default())
    }

    /// Default generators with a custom configuration
    pub fn with_config(config: ContextConfig) -> ConfidentialResult<Self> {
        Ok(Self {
            generators: PedersenGenerators::new()?,
            config,
        })
    }

    /// Replace the default value generator
    pub fn with_value_generator(mut self, value: Generator) -> Self {
        self.generators = self.generators.with_value_generator(value);
        self
    }

    /// The generator pair
    pub fn generators(&self) -> &PedersenGenerators {
        &self.generators
    }

    /// Blinding generator `G`
    pub fn blind_generator(&self) -> Generator {
        self.generators.blind
    }

    /// Default value generator `H`
    pub fn value_generator(&self) -> Generator {
        self.generators.value
    }

    /// The configuration
    pub fn config(&self) -> &ContextConfig {
        &self.config
    }
}
