//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::language::Language;

/// Root configuration for the translating proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Upstream site and proxy route.
    pub proxy: UpstreamConfig,

    /// Translation service settings.
    pub translation: TranslationConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Upstream configuration: which site is proxied and under which path.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Path that triggers proxying; every other path gets a static hint.
    pub path: String,

    /// The fixed upstream origin.
    pub upstream_url: String,

    /// Accept-Language sent upstream regardless of the client's preference.
    pub upstream_accept_language: String,

    /// Deadline for receiving upstream response headers, in seconds.
    pub upstream_timeout_secs: u64,

    /// Longest silence allowed between upstream body chunks, in seconds.
    pub upstream_idle_timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            path: "/proxy".to_string(),
            upstream_url: "http://www.mx56.vip".to_string(),
            upstream_accept_language: "zh-CN,zh;q=0.9,en;q=0.8,es;q=0.7".to_string(),
            upstream_timeout_secs: 15,
            upstream_idle_timeout_secs: 15,
        }
    }
}

impl UpstreamConfig {
    /// Value injected as `<base href>` so relative links resolve upstream.
    pub fn base_href(&self) -> String {
        format!("{}/", self.upstream_url.trim_end_matches('/'))
    }
}

/// Translation service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TranslationConfig {
    /// LibreTranslate-compatible `/translate` endpoint.
    pub endpoint: String,

    /// Optional API key sent as `api_key` in the request body.
    pub api_key: Option<String>,

    /// Per-call deadline in milliseconds.
    pub timeout_ms: u64,

    /// Maximum text nodes translated at once within one document.
    /// 1 reproduces strictly sequential translation.
    pub concurrency: usize,

    /// Languages clients may request.
    pub languages: Vec<Language>,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://translate.astian.org/translate".to_string(),
            api_key: None,
            timeout_ms: 5_000,
            concurrency: 1,
            languages: Language::ALL.to_vec(),
        }
    }
}

/// Timeout configuration for inbound requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Time allowed to produce response headers, in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
