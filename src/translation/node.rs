//! Per-text-node translation with fallback to the original text.
//!
//! # Responsibilities
//! - Decide whether a text node is worth translating
//! - Call the translator once for eligible nodes
//! - Contain every failure at the node boundary
//!
//! # Design Decisions
//! - Outcomes are tagged so callers and tests can see which path ran
//! - One call per eligible node: no batching, no caching, no deduplication

use std::sync::Arc;
use std::time::Instant;

use crate::language::Language;
use crate::observability::metrics;
use crate::rewrite::entities::{decode_text, escape_text};
use crate::translation::types::TranslationError;
use crate::translation::Translator;

/// One logical text node as it appeared in the source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextNode {
    content: String,
    raw_text: bool,
}

impl TextNode {
    /// A prose text node (`Data` or `RCData` content).
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            raw_text: false,
        }
    }

    /// A node whose content is raw text or script data (not prose).
    pub fn raw(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            raw_text: true,
        }
    }

    /// Source text, entities untouched.
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_raw_text(&self) -> bool {
        self.raw_text
    }

    /// True when nothing but whitespace (including `&nbsp;`) remains.
    pub fn is_blank(&self) -> bool {
        decode_text(&self.content).trim().is_empty()
    }
}

/// What happened to a text node.
#[derive(Debug)]
pub enum NodeOutcome {
    /// Not eligible; no call was made.
    Skipped(String),
    /// The service returned a translation.
    Translated(String),
    /// The call failed; the original is kept.
    Fallback {
        original: String,
        reason: TranslationError,
    },
}

impl NodeOutcome {
    /// Label used for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            NodeOutcome::Skipped(_) => "skipped",
            NodeOutcome::Translated(_) => "translated",
            NodeOutcome::Fallback { .. } => "fallback",
        }
    }

    /// Markup to emit in place of the node.
    ///
    /// Untranslated content is returned byte-for-byte; translated text is
    /// escaped for an HTML text context.
    pub fn into_html(self) -> String {
        match self {
            NodeOutcome::Translated(text) => escape_text(&text),
            NodeOutcome::Skipped(original) | NodeOutcome::Fallback { original, .. } => original,
        }
    }
}

/// Applies a [`Translator`] to single text nodes.
pub struct NodeTranslator<T> {
    translator: Arc<T>,
}

impl<T> Clone for NodeTranslator<T> {
    fn clone(&self) -> Self {
        Self {
            translator: Arc::clone(&self.translator),
        }
    }
}

impl<T: Translator> NodeTranslator<T> {
    pub fn new(translator: T) -> Self {
        Self {
            translator: Arc::new(translator),
        }
    }

    /// Translate one node, never failing.
    pub async fn translate_node(&self, node: TextNode, target: Language) -> NodeOutcome {
        if node.is_raw_text() || node.is_blank() {
            return NodeOutcome::Skipped(node.content);
        }

        let start = Instant::now();
        let source = decode_text(&node.content);
        let outcome = match self.translator.try_translate(&source, target).await {
            Ok(translated) => NodeOutcome::Translated(translated),
            Err(reason) => {
                tracing::debug!(target_lang = %target, error = %reason, "Keeping original text node");
                NodeOutcome::Fallback {
                    original: node.content,
                    reason,
                }
            }
        };
        metrics::record_translation(outcome.kind(), start);
        outcome
    }
}
