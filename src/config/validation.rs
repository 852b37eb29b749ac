//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate URLs, paths and value ranges
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::AppConfig;
use crate::language::Language;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: invalid URL '{value}'")]
    InvalidUrl { field: &'static str, value: String },

    #[error("{field}: invalid socket address '{value}'")]
    InvalidAddress { field: &'static str, value: String },

    #[error("proxy.path must start with '/' and contain no '{{', '}}' or '*', got '{0}'")]
    InvalidPath(String),

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("translation.languages must include \"en\"")]
    MissingDefaultLanguage,
}

/// Validate a parsed configuration.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    let path = &config.proxy.path;
    if !path.starts_with('/') || path.contains(['{', '}', '*']) {
        errors.push(ValidationError::InvalidPath(config.proxy.path.clone()));
    }

    check_http_url(&mut errors, "proxy.upstream_url", &config.proxy.upstream_url);
    check_http_url(&mut errors, "translation.endpoint", &config.translation.endpoint);

    if config.proxy.upstream_timeout_secs == 0 {
        errors.push(ValidationError::Zero("proxy.upstream_timeout_secs"));
    }
    if config.proxy.upstream_idle_timeout_secs == 0 {
        errors.push(ValidationError::Zero("proxy.upstream_idle_timeout_secs"));
    }
    if config.translation.timeout_ms == 0 {
        errors.push(ValidationError::Zero("translation.timeout_ms"));
    }
    if config.translation.concurrency == 0 {
        errors.push(ValidationError::Zero("translation.concurrency"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::Zero("timeouts.request_secs"));
    }

    if !config.translation.languages.contains(&Language::En) {
        errors.push(ValidationError::MissingDefaultLanguage);
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_http_url(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    let valid = url::Url::parse(value)
        .map(|u| matches!(u.scheme(), "http" | "https") && u.has_host())
        .unwrap_or(false);
    if !valid {
        errors.push(ValidationError::InvalidUrl {
            field,
            value: value.to_string(),
        });
    }
}
