//! Error types for the cipherlab server.
//!
//! Engine failures never surface here; they are part of the response body.
//! These cover startup and shutdown only.

use thiserror::Error;

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Numeric setting outside its allowed range
    #[error("Invalid {name}: {value} is outside {min}..={max}")]
    OutOfRange {
        /// Setting name
        name: &'static str,
        /// Rejected value
        value: usize,
        /// Inclusive lower bound
        min: usize,
        /// Inclusive upper bound
        max: usize,
    },

    /// Settings that are valid alone but conflict with each other
    #[error("Inconsistent configuration: {0}")]
    Inconsistent(String),
}

/// Server runtime errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Failed to bind HTTP server
    #[error("Failed to bind HTTP server to {addr}: {source}")]
    BindFailed {
        /// Address that failed to bind
        addr: std::net::SocketAddr,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Server shutdown error
    #[error("Server shutdown error: {0}")]
    Shutdown(String),
}
