//! Response construction and error mapping.
//!
//! # Responsibilities
//! - Build client responses from upstream status + content-type only
//! - Map upstream fetch failures to gateway errors
//!
//! # Design Decisions
//! - Streaming responses avoid buffering entire body
//! - Upstream headers other than content-type are dropped
//! - Upstream connect errors → 502, upstream timeouts → 504

use axum::body::Body;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::resilience::DeadlineExceeded;

/// Failures of the proxy itself (never translation failures).
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    #[error("upstream did not respond: {0}")]
    UpstreamTimeout(#[from] DeadlineExceeded),
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ProxyError::UpstreamTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let message = match self {
            ProxyError::Upstream(_) => "Upstream request failed",
            ProxyError::UpstreamTimeout(_) => "Upstream request timed out",
        };
        (self.status(), message).into_response()
    }
}

/// Response with the given status, optional content-type and body.
pub fn streamed(status: StatusCode, content_type: Option<HeaderValue>, body: Body) -> Response {
    let mut response = Response::new(body);
    *response.status_mut() = status;
    if let Some(content_type) = content_type {
        response.headers_mut().insert(header::CONTENT_TYPE, content_type);
    }
    response
}
