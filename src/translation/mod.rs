//! Translation subsystem.
//!
//! # Data Flow
//! ```text
//! TextNode (from rewrite::scanner)
//!     → node.rs (eligibility, fallback boundary)
//!     → client.rs (one POST to the translation service, with deadline)
//!     → NodeOutcome { Skipped | Translated | Fallback }
//! ```
//!
//! # Design Decisions
//! - Translation failures never escape `NodeTranslator`
//! - The `Translator` trait is the seam between node logic and transport

pub mod client;
pub mod node;
pub mod types;

use std::future::Future;

use crate::language::Language;

pub use client::TranslationClient;
pub use node::{NodeOutcome, NodeTranslator, TextNode};
pub use types::{TranslationError, TranslationResult};

/// Something that can translate a piece of plain text.
pub trait Translator: Send + Sync + 'static {
    /// Translate `text` into `target`, reporting failures.
    fn try_translate(
        &self,
        text: &str,
        target: Language,
    ) -> impl Future<Output = TranslationResult<String>> + Send;
}
