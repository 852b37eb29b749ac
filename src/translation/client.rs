//! HTTP client for the external translation service.
//!
//! # Responsibilities
//! - Send exactly one POST per text to the configured endpoint
//! - Decode `translatedText` from the JSON reply
//! - Bound every call with a deadline
//!
//! # Design Decisions
//! - No retries: translation is best-effort
//! - `try_translate` reports why a call failed; `translate` hides it

use std::time::Duration;

use crate::config::TranslationConfig;
use crate::language::Language;
use crate::resilience::with_deadline;
use crate::translation::types::{
    TranslationError, TranslationRequest, TranslationResponse, TranslationResult,
};
use crate::translation::Translator;

/// Client for a LibreTranslate-compatible endpoint.
#[derive(Debug, Clone)]
pub struct TranslationClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl TranslationClient {
    /// Create a client sharing the given connection pool.
    pub fn new(http: reqwest::Client, config: &TranslationConfig) -> Self {
        Self {
            http,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            timeout: Duration::from_millis(config.timeout_ms),
        }
    }

    /// Translate `text`, reporting any failure.
    pub async fn try_translate(&self, text: &str, target: Language) -> TranslationResult<String> {
        let body = TranslationRequest::new(text, target, self.api_key.as_deref());
        with_deadline(self.timeout, self.send(&body)).await?
    }

    async fn send(&self, body: &TranslationRequest<'_>) -> TranslationResult<String> {
        let response = self.http.post(&self.endpoint).json(body).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranslationError::Status(status.as_u16()));
        }

        let payload = response.bytes().await?;
        let decoded: TranslationResponse = serde_json::from_slice(&payload)?;
        decoded
            .translated_text
            .filter(|t| !t.is_empty())
            .ok_or(TranslationError::MissingText)
    }

    /// Translate `text`, returning it unchanged on any failure.
    pub async fn translate(&self, text: &str, target: Language) -> String {
        match self.try_translate(text, target).await {
            Ok(translated) => translated,
            Err(e) => {
                tracing::warn!(target_lang = %target, error = %e, "Translation failed, keeping original text");
                text.to_string()
            }
        }
    }
}

impl Translator for TranslationClient {
    async fn try_translate(&self, text: &str, target: Language) -> TranslationResult<String> {
        TranslationClient::try_translate(self, text, target).await
    }
}
