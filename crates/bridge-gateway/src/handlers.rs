use std::time::Instant;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use bridge_core::Route;

use super::error::ApiError;
use super::server::AppState;

/// Tells the caller whether the payload was echoed or relayed.
pub(crate) const MODE_HEADER: &str = "x-bridge-mode";

#[derive(serde::Serialize)]
struct HealthResponse {
    status: &'static str,
    uptime_secs: u64,
    version: &'static str,
}

pub(crate) async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy",
        uptime_secs: state.started_at.elapsed().as_secs(),
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Relay `body` to the hook configured for `route`, or echo it back when none is.
pub(crate) async fn relay_handler(
    route: Route,
    state: AppState,
    body: Bytes,
) -> Result<Response, ApiError> {
    validate_payload(&body)?;

    let Some(url) = state.hooks.get(route) else {
        tracing::debug!(%route, bytes = body.len(), "no hook configured, echoing payload");
        return Ok(echo_response(body));
    };

    let started = Instant::now();
    let upstream = state
        .relay
        .forward(url, body)
        .await
        .map_err(|source| {
            tracing::warn!(%route, "relay failed: {source}");
            ApiError::Relay { route, source }
        })?;

    tracing::info!(
        %route,
        status = upstream.status.as_u16(),
        elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        "payload relayed"
    );
    Ok(upstream.into_response())
}

/// Only the top-level shape is checked; fields are never interpreted.
fn validate_payload(body: &[u8]) -> Result<(), ApiError> {
    serde_json::from_slice::<serde_json::Map<String, serde_json::Value>>(body)
        .map(drop)
        .map_err(|e| ApiError::InvalidPayload(e.to_string()))
}

fn echo_response(body: Bytes) -> Response {
    let mut resp = (StatusCode::OK, body).into_response();
    let headers = resp.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    headers.insert(MODE_HEADER, HeaderValue::from_static("echo"));
    resp
}
