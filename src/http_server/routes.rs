//! HTTP Routes
//!
//! - `POST /process` runs the engine on a `ProcessRequest`
//! - `GET /health` reports liveness and version

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use super::errors::{ApiError, ApiResult};
use crate::engine::{Engine, ProcessRequest, ProcessResponse};
use crate::observability::{log_event_with_fields, Event};

/// Engine state shared across handlers
pub struct EngineState {
    pub engine: Engine,
}

impl EngineState {
    pub fn new(engine: Engine) -> Self {
        Self { engine }
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Create the processing routes
pub fn process_routes(state: Arc<EngineState>) -> Router {
    Router::new()
        .route("/process", post(process_handler))
        .with_state(state)
}

/// Health check route
pub fn health_routes() -> Router {
    Router::new().route("/health", get(health_handler))
}

/// Run the engine on a blocking worker; the pipeline is CPU-bound
async fn process_handler(
    State(state): State<Arc<EngineState>>,
    payload: Result<Json<ProcessRequest>, JsonRejection>,
) -> ApiResult<Json<ProcessResponse>> {
    let Json(request) = payload.map_err(|e| ApiError::InvalidBody(e.body_text()))?;

    log_event_with_fields(
        Event::RequestReceived,
        &[
            ("method", request.method.as_str()),
            ("objects", request.table.objects.len().to_string().as_str()),
        ],
    );

    let engine = state.engine;
    let response = tokio::task::spawn_blocking(move || engine.process(&request))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;

    Ok(Json(response))
}

/// Health check handler
async fn health_handler() -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (StatusCode::OK, Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response_serialization() {
        let response = HealthResponse {
            status: "ok".to_string(),
            version: "0.1.0".to_string(),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"status\":\"ok\""));
    }
}
