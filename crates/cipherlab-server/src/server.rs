//! Server state management and orchestration.
//!
//! The engine is stateless, so the shared state is just a configured
//! [`Dispatcher`] and the start time.

use crate::config::ServerConfig;
use crate::error::ServerError;
use cipherlab_engine::Dispatcher;
use std::sync::Arc;
use std::time::SystemTime;

/// Shared application state for HTTP handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Dispatcher carrying the configured limits
    dispatcher: Dispatcher,

    /// Server start time (for health reporting)
    started_at: SystemTime,
}

impl AppState {
    /// Create application state from configuration.
    #[must_use]
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            dispatcher: Dispatcher::new(config.engine_limits()),
            started_at: SystemTime::now(),
        }
    }

    /// Get the engine dispatcher.
    #[must_use]
    pub const fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Get server uptime in seconds.
    #[must_use]
    pub fn uptime_seconds(&self) -> u64 {
        SystemTime::now()
            .duration_since(self.started_at)
            .unwrap_or_default()
            .as_secs()
    }
}

/// Server orchestration.
pub struct Server {
    /// Shared application state
    state: Arc<AppState>,
    /// Server configuration
    config: ServerConfig,
}

impl Server {
    /// Create a new server with validated configuration.
    ///
    /// # Errors
    ///
    /// Returns `ServerError::Config` if the configuration is invalid.
    pub fn new(config: ServerConfig) -> Result<Self, ServerError> {
        config.validate()?;

        let state = AppState::new(&config);

        tracing::info!(
            max_text_chars = config.max_text_chars,
            max_body_bytes = config.max_body_bytes,
            "Server initialized"
        );

        Ok(Self {
            state: Arc::new(state),
            config,
        })
    }

    /// Run the HTTP server until Ctrl-C.
    ///
    /// In-flight requests finish before this returns.
    ///
    /// # Errors
    ///
    /// Returns `ServerError` if binding fails or the signal handler cannot be
    /// installed.
    pub async fn run(self) -> Result<(), ServerError> {
        tracing::info!("Starting cipherlab server");
        tracing::info!("HTTP server binding to: {}", self.config.bind);

        if self.config.cors_permissive {
            tracing::info!("CORS permissive mode enabled");
        }

        crate::http::start_server(&self.config, self.state, shutdown_signal()).await
    }

    /// Get shared application state (for testing).
    #[cfg(test)]
    #[must_use]
    pub const fn state(&self) -> &Arc<AppState> {
        &self.state
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received, stopping server"),
        Err(e) => tracing::error!("Failed to listen for shutdown signal: {e}"),
    }
}
