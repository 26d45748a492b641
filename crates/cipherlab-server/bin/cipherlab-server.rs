//! cipherlab server binary entry point.
//!
//! Thin wrapper around the `cipherlab-server` library: initializes logging,
//! parses configuration and runs the server until Ctrl-C.

use anyhow::Result;
use cipherlab_server::{Server, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_args();

    tracing::info!(
        "Configuration loaded: bind={}, max_body_bytes={}, max_text_chars={}",
        config.bind,
        config.max_body_bytes,
        config.max_text_chars
    );

    let server = Server::new(config)?;
    server.run().await?;

    Ok(())
}
