//! Async streaming transform: upstream bytes in, rewritten bytes out.
//!
//! # Data Flow
//! ```text
//! upstream body ──(bounded chan)──▶ blocking worker: HtmlScanner
//!                                        │
//!                               (bounded chan of Segment)
//!                                        ▼
//!                  Markup ─────────▶ ordered buffer ──▶ client body
//!                  Text ──▶ NodeTranslator ──┘
//! ```
//!
//! # Design Decisions
//! - `buffered(n)` runs up to n translations at once yet yields in source order
//! - Bounded channels carry backpressure from the client back to upstream
//! - An upstream or rewriting error ends the body after all earlier output
//! - Upstream reading stops as soon as the client body is dropped

use axum::body::Bytes;
use futures_util::{stream, Stream, StreamExt};
use tokio::sync::mpsc;

use crate::language::Language;
use crate::rewrite::scanner::HtmlScanner;
use crate::rewrite::{BoxError, Segment, TransformError};
use crate::translation::{NodeTranslator, Translator};

/// Upstream chunks buffered ahead of the scanner.
const CHUNK_BUFFER: usize = 8;

/// Segments buffered ahead of translation.
const SEGMENT_BUFFER: usize = 64;

/// Rewrites one HTML document for one target language.
pub struct HtmlTransformer<T> {
    translator: NodeTranslator<T>,
    language: Language,
    base_href: String,
    concurrency: usize,
}

impl<T: Translator> HtmlTransformer<T> {
    /// Transformer with sequential translation.
    pub fn new(translator: NodeTranslator<T>, language: Language, base_href: impl Into<String>) -> Self {
        Self {
            translator,
            language,
            base_href: base_href.into(),
            concurrency: 1,
        }
    }

    /// Allow up to `limit` text nodes to be translated at once.
    pub fn with_concurrency(mut self, limit: usize) -> Self {
        self.concurrency = limit.max(1);
        self
    }

    /// Start transforming `upstream`.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn transform<S, E>(self, upstream: S) -> impl Stream<Item = Result<Bytes, TransformError>> + Send + 'static
    where
        S: Stream<Item = Result<Bytes, E>> + Send + 'static,
        E: Into<BoxError> + Send + 'static,
    {
        let Self {
            translator,
            language,
            base_href,
            concurrency,
        } = self;

        let (chunk_tx, chunk_rx) = mpsc::channel(CHUNK_BUFFER);
        let (segment_tx, segment_rx) = mpsc::channel(SEGMENT_BUFFER);

        tokio::spawn(forward_upstream(upstream, chunk_tx, segment_tx.clone()));
        tokio::task::spawn_blocking(move || scan_document(&base_href, chunk_rx, segment_tx));

        stream::unfold(segment_rx, |mut rx| async move {
            rx.recv().await.map(|item| (item, rx))
        })
        .map(move |item| {
            let translator = translator.clone();
            async move {
                match item {
                    Ok(Segment::Markup(bytes)) => Ok(Bytes::from(bytes)),
                    Ok(Segment::Text(node)) => {
                        let outcome = translator.translate_node(node, language).await;
                        Ok(Bytes::from(outcome.into_html()))
                    }
                    Err(e) => Err(e),
                }
            }
        })
        .buffered(concurrency)
    }
}

async fn forward_upstream<S, E>(
    upstream: S,
    chunk_tx: mpsc::Sender<Result<Bytes, TransformError>>,
    client: mpsc::Sender<Result<Segment, TransformError>>,
) where
    S: Stream<Item = Result<Bytes, E>> + Send + 'static,
    E: Into<BoxError> + Send + 'static,
{
    let mut upstream = std::pin::pin!(upstream);
    loop {
        let item = tokio::select! {
            // Client went away; stop reading so the scanner worker is released.
            _ = client.closed() => break,
            item = upstream.next() => item,
        };
        let Some(item) = item else {
            break;
        };
        let item = item.map_err(|e| TransformError::Upstream(e.into()));
        let failed = item.is_err();
        if chunk_tx.send(item).await.is_err() || failed {
            break;
        }
    }
}

fn scan_document(
    base_href: &str,
    mut chunk_rx: mpsc::Receiver<Result<Bytes, TransformError>>,
    segment_tx: mpsc::Sender<Result<Segment, TransformError>>,
) {
    let mut scanner = HtmlScanner::new(base_href);

    while let Some(chunk) = chunk_rx.blocking_recv() {
        match chunk.and_then(|bytes| scanner.feed(&bytes)) {
            Ok(segments) => {
                if !send_all(&segment_tx, segments) {
                    // Client went away.
                    return;
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "HTML transform aborted");
                let _ = segment_tx.blocking_send(Err(e));
                return;
            }
        }
    }

    match scanner.finish() {
        Ok(segments) => {
            send_all(&segment_tx, segments);
        }
        Err(e) => {
            tracing::warn!(error = %e, "HTML transform failed at end of document");
            let _ = segment_tx.blocking_send(Err(e));
        }
    }
}

fn send_all(tx: &mpsc::Sender<Result<Segment, TransformError>>, segments: Vec<Segment>) -> bool {
    segments.into_iter().all(|segment| tx.blocking_send(Ok(segment)).is_ok())
}
