//! Proxy and info handlers.
//!
//! # Data Flow
//! ```text
//! GET /proxy?lang=..
//!     → LanguageSelector (query + Accept-Language)
//!     → upstream GET (forwarded User-Agent, fixed Accept-Language)
//!     → content-type contains text/html?
//!         no  → status + content-type + body piped through
//!         yes → status + content-type + HtmlTransformer output
//!     (either body fails once upstream stalls past the idle deadline)
//! any other path
//!     → static 200 text/plain hint
//! ```

use std::time::{Duration, Instant};

use axum::body::Body;
use axum::extract::{RawQuery, State};
use axum::http::header::{ACCEPT_LANGUAGE, CONTENT_TYPE, HOST, USER_AGENT};
use axum::http::{HeaderMap, HeaderValue};
use axum::response::{IntoResponse, Response};

use crate::http::request::{header_str, lang_param, request_id};
use crate::http::response::{streamed, ProxyError};
use crate::http::server::AppState;
use crate::language::Language;
use crate::observability::metrics;
use crate::resilience::{with_deadline, with_idle_deadline};
use crate::rewrite::HtmlTransformer;

/// Handler for the proxy path.
pub async fn proxy_handler(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Response {
    let start = Instant::now();
    let explicit = lang_param(query.as_deref());
    let language = state
        .languages
        .select(explicit.as_deref(), header_str(&headers, ACCEPT_LANGUAGE));

    tracing::debug!(
        request_id = %request_id(&headers),
        language = %language,
        explicit = ?explicit,
        "Proxying upstream page"
    );

    match proxy(&state, &headers, language).await {
        Ok((kind, response)) => {
            metrics::record_request(kind, response.status().as_u16(), start);
            response
        }
        Err(e) => {
            tracing::error!(
                request_id = %request_id(&headers),
                upstream = %state.config.proxy.upstream_url,
                error = %e,
                "Upstream error"
            );
            metrics::record_request("error", e.status().as_u16(), start);
            e.into_response()
        }
    }
}

async fn proxy(
    state: &AppState,
    headers: &HeaderMap,
    language: Language,
) -> Result<(&'static str, Response), ProxyError> {
    let upstream_config = &state.config.proxy;
    let user_agent = headers
        .get(USER_AGENT)
        .cloned()
        .unwrap_or_else(|| HeaderValue::from_static(""));

    let request = state
        .http
        .get(&upstream_config.upstream_url)
        .header(USER_AGENT, user_agent)
        .header(ACCEPT_LANGUAGE, upstream_config.upstream_accept_language.as_str());
    let deadline = Duration::from_secs(upstream_config.upstream_timeout_secs);
    let upstream = with_deadline(deadline, request.send()).await??;

    let status = upstream.status();
    let content_type = upstream.headers().get(CONTENT_TYPE).cloned();
    let idle = Duration::from_secs(upstream_config.upstream_idle_timeout_secs);
    let body = with_idle_deadline(idle, upstream.bytes_stream());
    let is_html = content_type
        .as_ref()
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.contains("text/html"));

    if !is_html {
        tracing::debug!(status = %status, content_type = ?content_type, "Passing upstream response through");
        return Ok(("passthrough", streamed(status, content_type, Body::from_stream(body))));
    }

    let transformer = HtmlTransformer::new(state.translator.clone(), language, upstream_config.base_href())
        .with_concurrency(state.config.translation.concurrency);
    let body = Body::from_stream(transformer.transform(body));
    Ok(("html", streamed(status, content_type, body)))
}

/// Handler for every path other than the proxy path.
pub async fn info_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let start = Instant::now();
    let host = header_str(&headers, HOST).unwrap_or("localhost");
    let path = &state.config.proxy.path;

    let response = (
        [(CONTENT_TYPE, "text/plain; charset=utf-8")],
        format!("Use {path} to view the site. e.g. http://{host}{path}"),
    )
        .into_response();
    metrics::record_request("info", response.status().as_u16(), start);
    response
}
