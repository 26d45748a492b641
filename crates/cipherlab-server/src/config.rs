//! Server configuration management.
//!
//! Configuration comes from CLI arguments, then `CIPHERLAB_*` environment
//! variables, then defaults.
//!
//! # Example
//!
//! ```no_run
//! use cipherlab_server::ServerConfig;
//!
//! let config = ServerConfig::from_args();
//! config.validate().expect("Invalid configuration");
//!
//! println!("Listening on: {}", config.bind);
//! println!("Text limit: {} chars", config.max_text_chars);
//! ```

use crate::error::ConfigError;
use cipherlab_engine::EngineLimits;
use clap::Parser;
use std::net::SocketAddr;

/// Largest request body the server can be configured to accept
pub const MAX_BODY_LIMIT: usize = 16 * 1024 * 1024;

/// Server configuration loaded from CLI args and environment variables.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "cipherlab-server",
    about = "HTTP server for the step-traced cipher engine",
    version
)]
pub struct ServerConfig {
    /// HTTP bind address
    #[arg(long, env = "CIPHERLAB_BIND", default_value = "127.0.0.1:5000")]
    pub bind: SocketAddr,

    /// Maximum accepted request body, in bytes
    #[arg(long, env = "CIPHERLAB_MAX_BODY_BYTES", default_value_t = 65_536)]
    pub max_body_bytes: usize,

    /// Maximum length of any text parameter, in characters
    #[arg(long, env = "CIPHERLAB_MAX_TEXT_CHARS", default_value_t = 10_000)]
    pub max_text_chars: usize,

    /// Allow requests from any origin
    #[arg(long, env = "CIPHERLAB_CORS_PERMISSIVE")]
    pub cors_permissive: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 5000)),
            max_body_bytes: 65_536,
            max_text_chars: EngineLimits::default().max_text_chars,
            cors_permissive: false,
        }
    }
}

impl ServerConfig {
    /// Parse configuration from command-line arguments.
    #[must_use]
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Limits handed to the engine for every run.
    #[must_use]
    pub const fn engine_limits(&self) -> EngineLimits {
        EngineLimits {
            max_text_chars: self.max_text_chars,
        }
    }

    /// Validate configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - `max_body_bytes` is zero or above 16 MiB
    /// - `max_text_chars` is zero
    /// - `max_text_chars` could never fit in a body of `max_body_bytes`
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_BODY_LIMIT).contains(&self.max_body_bytes) {
            return Err(ConfigError::OutOfRange {
                name: "max_body_bytes",
                value: self.max_body_bytes,
                min: 1,
                max: MAX_BODY_LIMIT,
            });
        }

        if self.max_text_chars == 0 {
            return Err(ConfigError::OutOfRange {
                name: "max_text_chars",
                value: 0,
                min: 1,
                max: self.max_body_bytes,
            });
        }

        if self.max_text_chars > self.max_body_bytes {
            return Err(ConfigError::Inconsistent(format!(
                "max_text_chars ({}) exceeds max_body_bytes ({})",
                self.max_text_chars, self.max_body_bytes
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.bind.port(), 5000);
        assert_eq!(config.engine_limits(), EngineLimits::default());
    }

    #[test]
    fn test_parse_flags() {
        let config = ServerConfig::try_parse_from([
            "cipherlab-server",
            "--bind",
            "0.0.0.0:8080",
            "--max-text-chars",
            "500",
            "--cors-permissive",
        ])
        .unwrap();

        assert_eq!(config.bind.port(), 8080);
        assert_eq!(config.engine_limits().max_text_chars, 500);
        assert!(config.cors_permissive);
    }

    #[test]
    fn test_body_limit_range() {
        let mut config = ServerConfig {
            max_body_bytes: 0,
            ..ServerConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange {
                name: "max_body_bytes",
                ..
            })
        ));

        config.max_body_bytes = MAX_BODY_LIMIT + 1;
        assert!(config.validate().is_err());

        config.max_body_bytes = MAX_BODY_LIMIT;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_text_limit_must_fit_body() {
        let config = ServerConfig {
            max_body_bytes: 1024,
            max_text_chars: 2048,
            ..ServerConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Inconsistent configuration: max_text_chars (2048) exceeds max_body_bytes (1024)"
        );

        let config = ServerConfig {
            max_text_chars: 0,
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
