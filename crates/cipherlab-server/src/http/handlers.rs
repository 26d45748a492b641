//! HTTP request handlers for the engine endpoints.

use crate::server::AppState;
use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use cipherlab_engine::{AlgorithmId, FieldSpec, ParameterMap, RunResult};
use serde::Serialize;
use std::sync::Arc;

/// Handle POST /api/run/{algorithm}.
///
/// The body is read as a JSON object of named parameters. Anything else
/// (empty, malformed, an array) is treated as an empty parameter map so the
/// engine reports the missing fields itself.
///
/// # Errors
///
/// Returns `AppError::NotFound` for an algorithm id the engine does not know.
pub async fn handle_run(
    Path(algorithm): Path<String>,
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<RunResult>, AppError> {
    tracing::debug!("Handling run request for algorithm: {}", algorithm);

    let id: AlgorithmId = algorithm
        .parse()
        .map_err(|e: cipherlab_engine::EngineError| AppError::NotFound(e.to_string()))?;

    let params = parse_params(&body);
    Ok(Json(state.dispatcher().run_id(id, &params)))
}

fn parse_params(body: &[u8]) -> ParameterMap {
    if body.is_empty() {
        return ParameterMap::new();
    }
    serde_json::from_slice(body).unwrap_or_else(|e| {
        tracing::debug!("Ignoring non-object request body: {e}");
        ParameterMap::new()
    })
}

/// One entry of the algorithm catalogue.
#[derive(Debug, Clone, Serialize)]
pub struct AlgorithmInfo {
    /// Wire identifier
    pub id: AlgorithmId,
    /// Display name
    pub name: &'static str,
    /// Form schema
    pub fields: &'static [FieldSpec],
}

/// Handle GET /api/algorithms.
pub async fn handle_algorithms() -> Json<Vec<AlgorithmInfo>> {
    Json(
        AlgorithmId::ALL
            .into_iter()
            .map(|id| AlgorithmInfo {
                id,
                name: id.display_name(),
                fields: id.fields(),
            })
            .collect(),
    )
}

/// Body of GET /health.
#[derive(Debug, Clone, Serialize)]
pub struct Health {
    /// Always `"ok"` while the server answers
    pub status: &'static str,
    /// Seconds since startup
    pub uptime_seconds: u64,
}

/// Handle GET /health.
pub async fn handle_health(State(state): State<Arc<AppState>>) -> Json<Health> {
    Json(Health {
        status: "ok",
        uptime_seconds: state.uptime_seconds(),
    })
}

/// Application-level error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Resource not found (404)
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        };

        (status, Json(RunResult::Failure { error: message })).into_response()
    }
}
