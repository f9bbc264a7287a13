use axum::body::Bytes;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::handlers::MODE_HEADER;

const MAX_RESPONSE_BYTES: usize = 1024 * 1024;

#[derive(Debug, Error)]
pub(crate) enum RelayError {
    #[error("upstream timed out: {0}")]
    Timeout(#[source] reqwest::Error),
    #[error("upstream request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("upstream response too large ({0} bytes)")]
    ResponseTooLarge(u64),
}

impl From<reqwest::Error> for RelayError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout(e)
        } else {
            Self::Transport(e)
        }
    }
}

/// What the destination answered. Non-success statuses are kept as-is.
#[derive(Debug)]
pub(crate) struct RelayResponse {
    pub status: StatusCode,
    pub content_type: Option<HeaderValue>,
    pub body: Bytes,
}

impl IntoResponse for RelayResponse {
    fn into_response(self) -> Response {
        let mut resp = (self.status, self.body).into_response();
        let headers = resp.headers_mut();
        if let Some(ct) = self.content_type {
            headers.insert(header::CONTENT_TYPE, ct);
        } else {
            headers.remove(header::CONTENT_TYPE);
        }
        headers.insert(MODE_HEADER, HeaderValue::from_static("relay"));
        resp
    }
}

#[derive(Clone)]
pub(crate) struct RelayClient {
    client: reqwest::Client,
}

impl RelayClient {
    pub(crate) fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// POST `body` verbatim to `url`. One attempt, no retries.
    pub(crate) async fn forward(&self, url: &str, body: Bytes) -> Result<RelayResponse, RelayError> {
        let mut resp = self
            .client
            .post(url)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = resp.status();
        let content_type = resp.headers().get(header::CONTENT_TYPE).cloned();
        if let Some(len) = resp.content_length()
            && len > MAX_RESPONSE_BYTES as u64
        {
            return Err(RelayError::ResponseTooLarge(len));
        }
        // Chunked responses carry no length, so the cap is enforced while reading.
        let mut buf = Vec::new();
        while let Some(chunk) = resp.chunk().await? {
            let total = buf.len() + chunk.len();
            if total > MAX_RESPONSE_BYTES {
                return Err(RelayError::ResponseTooLarge(total as u64));
            }
            buf.extend_from_slice(&chunk);
        }
        let body = Bytes::from(buf);

        if !status.is_success() {
            tracing::warn!("relay destination answered HTTP {status}");
        }

        Ok(RelayResponse {
            status,
            content_type,
            body,
        })
    }
}
