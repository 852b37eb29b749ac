//! Translation wire types and error definitions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::language::Language;
use crate::resilience::DeadlineExceeded;

/// Request body for a LibreTranslate-compatible `/translate` endpoint.
#[derive(Debug, Serialize)]
pub struct TranslationRequest<'a> {
    pub q: &'a str,
    pub source: &'static str,
    pub target: &'static str,
    pub format: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<&'a str>,
}

impl<'a> TranslationRequest<'a> {
    /// Plain-text request with source language auto-detection.
    pub fn new(text: &'a str, target: Language, api_key: Option<&'a str>) -> Self {
        Self {
            q: text,
            source: "auto",
            target: target.target_code(),
            format: "text",
            api_key,
        }
    }
}

/// Success payload; only `translatedText` is read.
#[derive(Debug, Deserialize)]
pub struct TranslationResponse {
    #[serde(rename = "translatedText")]
    pub translated_text: Option<String>,
}

/// Why a single translation call did not produce text.
#[derive(Debug, Error)]
pub enum TranslationError {
    /// Connection, DNS or body read failure.
    #[error("translation request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("translation service returned status {0}")]
    Status(u16),

    /// The body was not the expected JSON.
    #[error("undecodable translation response: {0}")]
    Decode(#[from] serde_json::Error),

    /// JSON decoded but `translatedText` was absent or empty.
    #[error("translation response has no translatedText")]
    MissingText,

    /// The call did not finish within the configured deadline.
    #[error("translation timed out: {0}")]
    Timeout(#[from] DeadlineExceeded),
}

/// Result type for translation calls.
pub type TranslationResult<T> = Result<T, TranslationError>;
