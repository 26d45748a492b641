//! Error types for engine runs

use thiserror::Error;

/// Errors that can occur while validating parameters or running an algorithm
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Missing, non-numeric or out-of-range parameter
    #[error("Invalid {field}: {reason}")]
    Validation {
        /// Parameter name as it appears in the request
        field: String,
        /// What is wrong with it
        reason: String,
    },

    /// 2x2 matrix has no inverse mod 26
    #[error("Key matrix is not invertible mod 26 (determinant {determinant})")]
    SingularMatrix {
        /// Determinant reduced mod 26
        determinant: u64,
    },

    /// Value has no multiplicative inverse for the modulus
    #[error("{value} has no inverse mod {modulus}")]
    NoInverse {
        /// Value that was inverted
        value: u64,
        /// Modulus
        modulus: u64,
    },

    /// Key material that passes range checks but cannot be used
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Algorithm identifier is not one of the known ids
    #[error("Unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    /// Internal cross-check failed
    #[error("Inconsistent result: {0}")]
    Inconsistent(String),
}

impl EngineError {
    /// Shorthand for a [`EngineError::Validation`] error
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Result alias used across the engine
pub type Result<T> = std::result::Result<T, EngineError>;
