//! Incremental HTML scanner built on lol_html.
//!
//! # Responsibilities
//! - Insert the `<base>` element as the last child of `<head>`, before an
//!   explicit `</head>` or, when that is omitted, before `<body>`
//! - Track whether the cursor is inside a skip element (script/style/noscript)
//! - Cut every prose text node out of the markup and hand it over whole
//!
//! # Design Decisions
//! - lol_html invokes handlers and the output sink in document order, so
//!   pushing segments from both into one queue preserves source order
//! - Text inside skip elements is never captured; it flows through the
//!   output sink byte-for-byte
//! - The scanner is `!Send` (handlers share `Rc` state); the async pipeline
//!   runs it on a blocking worker

use std::cell::RefCell;
use std::mem;
use std::rc::Rc;

use lol_html::html_content::{ContentType, EndTag, TextChunk, TextType};
use lol_html::{doc_text, element, EndTagHandler, HandlerResult, HtmlRewriter, OutputSink, Settings};

use crate::rewrite::entities::escape_attribute;
use crate::rewrite::{Segment, TransformError};
use crate::translation::TextNode;

/// Elements whose text content is never translated.
pub const SKIP_ELEMENTS: &str = "script, style, noscript";

#[derive(Debug, Default)]
struct ScanState {
    segments: Vec<Segment>,
    skip_depth: usize,
    head_opened: bool,
    base_injected: bool,
    pending_text: String,
    pending_raw: bool,
}

impl ScanState {
    fn push_markup(&mut self, bytes: &[u8]) {
        if bytes.is_empty() {
            return;
        }
        match self.segments.last_mut() {
            Some(Segment::Markup(buf)) => buf.extend_from_slice(bytes),
            _ => self.segments.push(Segment::Markup(bytes.to_vec())),
        }
    }

    fn on_text(&mut self, chunk: &mut TextChunk<'_>) {
        if self.skip_depth > 0 {
            return;
        }

        self.pending_text.push_str(chunk.as_str());
        self.pending_raw |= !matches!(chunk.text_type(), TextType::Data | TextType::RCData);
        chunk.remove();

        if chunk.last_in_text_node() {
            self.flush_text();
        }
    }

    fn flush_text(&mut self) {
        if self.pending_text.is_empty() {
            self.pending_raw = false;
            return;
        }
        let content = mem::take(&mut self.pending_text);
        let node = if mem::take(&mut self.pending_raw) {
            TextNode::raw(content)
        } else {
            TextNode::new(content)
        };
        self.segments.push(Segment::Text(node));
    }
}

struct SegmentSink(Rc<RefCell<ScanState>>);

impl OutputSink for SegmentSink {
    fn handle_chunk(&mut self, chunk: &[u8]) {
        self.0.borrow_mut().push_markup(chunk);
    }
}

/// Push-based scanner: feed it bytes, collect ordered segments.
pub struct HtmlScanner {
    rewriter: HtmlRewriter<'static, SegmentSink>,
    state: Rc<RefCell<ScanState>>,
}

impl HtmlScanner {
    /// Create a scanner that injects `<base href="{base_href}">` into `<head>`.
    pub fn new(base_href: &str) -> Self {
        let state = Rc::new(RefCell::new(ScanState::default()));
        let base_tag = format!(r#"<base href="{}">"#, escape_attribute(base_href));

        let head_base = base_tag.clone();
        let head_state = Rc::clone(&state);
        let body_state = Rc::clone(&state);
        let skip_state = Rc::clone(&state);
        let text_state = Rc::clone(&state);

        let settings = Settings {
            element_content_handlers: vec![
                element!("head", move |el| {
                    if head_state.borrow().head_opened {
                        return Ok(());
                    }
                    head_state.borrow_mut().head_opened = true;
                    let Some(end_handlers) = el.end_tag_handlers() else {
                        return Ok(());
                    };
                    let close_state = Rc::clone(&head_state);
                    let tag = head_base.clone();
                    end_handlers.push(Box::new(move |end: &mut EndTag<'_>| -> HandlerResult {
                        let mut state = close_state.borrow_mut();
                        if !state.base_injected {
                            end.before(&tag, ContentType::Html);
                            state.base_injected = true;
                        }
                        Ok(())
                    }) as EndTagHandler<'static>);
                    Ok(())
                }),
                // `</head>` is optional; an implied close ends at `<body>`.
                element!("body", move |el| {
                    let mut state = body_state.borrow_mut();
                    if state.head_opened && !state.base_injected {
                        el.before(&base_tag, ContentType::Html);
                        state.base_injected = true;
                    }
                    Ok(())
                }),
                element!(SKIP_ELEMENTS, move |el| {
                    let Some(end_handlers) = el.end_tag_handlers() else {
                        return Ok(());
                    };
                    skip_state.borrow_mut().skip_depth += 1;
                    let leave_state = Rc::clone(&skip_state);
                    end_handlers.push(Box::new(move |_end: &mut EndTag<'_>| -> HandlerResult {
                        let mut state = leave_state.borrow_mut();
                        state.skip_depth = state.skip_depth.saturating_sub(1);
                        Ok(())
                    }) as EndTagHandler<'static>);
                    Ok(())
                }),
            ],
            document_content_handlers: vec![doc_text!(move |chunk| {
                text_state.borrow_mut().on_text(chunk);
                Ok(())
            })],
            ..Settings::new()
        };

        let rewriter = HtmlRewriter::new(settings, SegmentSink(Rc::clone(&state)));
        Self { rewriter, state }
    }

    /// Feed the next upstream chunk; returns every segment completed so far.
    pub fn feed(&mut self, chunk: &[u8]) -> Result<Vec<Segment>, TransformError> {
        self.rewriter.write(chunk)?;
        Ok(mem::take(&mut self.state.borrow_mut().segments))
    }

    /// Signal end of input and return the remaining segments.
    pub fn finish(self) -> Result<Vec<Segment>, TransformError> {
        let Self { rewriter, state } = self;
        rewriter.end()?;

        let mut state = state.borrow_mut();
        state.flush_text();
        Ok(mem::take(&mut state.segments))
    }
}
