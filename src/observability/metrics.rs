//! Metrics collection and exposition.
//!
//! # Metrics
//! - `translator_requests_total` (counter): inbound requests by kind, status
//! - `translator_request_duration_seconds` (histogram): time to response headers
//! - `translator_translations_total` (counter): text nodes by outcome
//! - `translator_translation_duration_seconds` (histogram): translation call latency
//!
//! # Design Decisions
//! - Metric calls are no-ops until a recorder is installed
//! - Labels kept low-cardinality (no paths, no languages per text)

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one inbound request.
///
/// `kind` is one of `html`, `passthrough`, `info` or `error`.
pub fn record_request(kind: &'static str, status: u16, start: Instant) {
    counter!("translator_requests_total", "kind" => kind, "status" => status.to_string())
        .increment(1);
    histogram!("translator_request_duration_seconds", "kind" => kind)
        .record(start.elapsed().as_secs_f64());
}

/// Record the outcome of one text-node translation.
pub fn record_translation(outcome: &'static str, start: Instant) {
    counter!("translator_translations_total", "outcome" => outcome).increment(1);
    histogram!("translator_translation_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}
