//! Streaming HTML rewriting subsystem.
//!
//! # Data Flow
//! ```text
//! upstream HTML bytes
//!     → scanner.rs (lol_html: inject <base>, cut out text nodes)
//!     → Segment stream (Markup | Text), document order
//!     → pipeline.rs (translate Text via NodeTranslator, re-serialize)
//!     → client body chunks
//! ```
//!
//! # States
//! - scanning-normal: text nodes are captured for translation
//! - inside-skip-element: script/style/noscript text passes through
//! - done: upstream ended, scanner finished, output flushed
//!
//! # Design Decisions
//! - Translation always operates on whole logical text nodes
//! - The whole document is never materialized

pub mod entities;
pub mod pipeline;
pub mod scanner;

use thiserror::Error;

use crate::translation::TextNode;

pub use pipeline::HtmlTransformer;
pub use scanner::HtmlScanner;

pub use crate::resilience::BoxError;

/// One unit of rewritten output, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Bytes emitted as-is.
    Markup(Vec<u8>),
    /// A whole text node awaiting translation.
    Text(TextNode),
}

/// Failures that end a transformed body early.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("HTML rewriting failed: {0}")]
    Rewrite(#[from] lol_html::errors::RewritingError),

    #[error("upstream body failed: {0}")]
    Upstream(#[source] BoxError),
}
