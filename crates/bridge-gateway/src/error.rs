use axum::Json;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use bridge_core::Route;
use thiserror::Error;

use crate::relay::RelayError;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("failed to bind {0}: {1}")]
    Bind(String, std::io::Error),
    #[error("server error: {0}")]
    Server(String),
}

/// Per-request failures, rendered as JSON error bodies.
#[derive(Debug, Error)]
pub(crate) enum ApiError {
    #[error("missing bearer token")]
    MissingToken,
    #[error("invalid bearer token")]
    InvalidToken,
    #[error("invalid JSON payload: {0}")]
    InvalidPayload(String),
    #[error("relay to {route} failed: {source}")]
    Relay {
        route: Route,
        #[source]
        source: RelayError,
    },
}

#[derive(serde::Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    route: Option<&'static str>,
    detail: String,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::MissingToken | Self::InvalidToken => StatusCode::UNAUTHORIZED,
            Self::InvalidPayload(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Relay {
                source: RelayError::Timeout(_),
                ..
            } => StatusCode::GATEWAY_TIMEOUT,
            Self::Relay { .. } => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Self::MissingToken | Self::InvalidToken => ErrorBody {
                error: "unauthorized",
                route: None,
                detail: self.to_string(),
            },
            Self::InvalidPayload(msg) => ErrorBody {
                error: "invalid payload",
                route: None,
                detail: msg.clone(),
            },
            Self::Relay { route, source } => ErrorBody {
                error: "relay failed",
                route: Some(route.name()),
                detail: source.to_string(),
            },
        };

        let mut resp = (status, Json(body)).into_response();
        if status == StatusCode::UNAUTHORIZED {
            resp.headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        resp
    }
}
