//! HTTP front end for the cipherlab engine.
//!
//! Exposes every engine algorithm as `POST /api/run/{algorithm}`, the form
//! schema as `GET /api/algorithms`, and a liveness probe at `GET /health`.
//!
//! # Architecture
//!
//! - `server`: shared state and lifecycle (bind, serve, graceful shutdown)
//! - `config`: configuration loading and validation
//! - `http`: router, layers and handlers
//!
//! # Example
//!
//! ```no_run
//! use cipherlab_server::{Server, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     tracing_subscriber::fmt::init();
//!
//!     let config = ServerConfig::from_args();
//!     let server = Server::new(config)?;
//!     server.run().await?;
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod config;
pub mod error;
pub mod http;
pub mod server;

pub use config::ServerConfig;
pub use error::{ConfigError, ServerError};
pub use server::{AppState, Server};
