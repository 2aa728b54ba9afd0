//! Error types for the rngtrace core.

use thiserror::Error;

/// Errors produced by generator and weight-table operations.
#[derive(Debug, Error)]
pub enum RngError {
    /// A ranged sampling call received an empty or inverted range.
    #[error("invalid range: maximum {max} must be greater than minimum {min}")]
    InvalidRange { min: u64, max: u64 },

    /// Seed input could not be interpreted as four unsigned 32-bit words.
    #[error("malformed seed: {0}")]
    MalformedSeed(String),

    /// A weights document did not have the expected nested-object shape.
    #[error("malformed weight table: {0}")]
    MalformedTable(String),

    /// A weight-table lookup key was not present at the given level.
    #[error("unknown {level} category: '{key}'")]
    UnknownCategory { level: &'static str, key: String },

    /// A weight entry was not a non-negative integer.
    #[error("invalid weight for category '{category}'")]
    InvalidWeight { category: String },

    /// A slot list with zero total weight cannot be rolled.
    #[error("weighted selection over a slot list with zero total weight")]
    EmptyWeights,

    /// A bounded search (re-sync or prediction) ran out of budget.
    #[error("search exhausted after {cap} advances")]
    SearchExhausted { cap: u64 },
}
