//! Snippet extraction: verbatim source text for a matched node.
//!
//! A snippet covers the selected span plus its trailing trivia, the way a
//! compiler attaches trailing whitespace to the last token on a line:
//!
//! - spaces and tabs after the span
//! - then an optional `//` comment running to the end of the line
//! - then at most one line terminator (`\r\n`, `\n` or `\r`)
//!
//! Leading trivia is never included, and nothing inside the span is trimmed,
//! collapsed or escaped. Cosmetic cleanup is left to the consumer.

use std::panic::{self, AssertUnwindSafe};

use crate::syntax::{ParsedSource, Span};

use super::catalog::{NodeContext, Selector};

/// Source text for a matched node, narrowed by the detector's selector.
pub fn extract(
    parsed: &ParsedSource,
    node: tree_sitter::Node<'_>,
    selector: Option<Selector>,
) -> String {
    let span = snippet_span(parsed, node, selector);
    match parsed.span_text(span) {
        Some(text) => text.to_string(),
        None => {
            tracing::warn!(
                span = %span,
                source_len = parsed.source().len(),
                "snippet span does not fit the source text"
            );
            String::new()
        }
    }
}

/// The span a snippet covers, trailing trivia included.
pub fn snippet_span(
    parsed: &ParsedSource,
    node: tree_sitter::Node<'_>,
    selector: Option<Selector>,
) -> Span {
    let span = select(parsed, node, selector);
    Span::new(span.start_byte, trailing_trivia_end(parsed.source(), span.end_byte))
}

/// Apply a selector, falling back to the node span when it declines or fails.
fn select(
    parsed: &ParsedSource,
    node: tree_sitter::Node<'_>,
    selector: Option<Selector>,
) -> Span {
    let whole = Span::from_node(node);
    let Some(selector) = selector else {
        return whole;
    };

    let ctx = NodeContext::new(node, parsed.source());
    match panic::catch_unwind(AssertUnwindSafe(|| selector(&ctx))) {
        Ok(Some(span)) if span.start_byte <= span.end_byte => span,
        Ok(_) => whole,
        Err(_) => {
            tracing::warn!(
                kind = node.kind(),
                start_byte = node.start_byte(),
                "snippet selector panicked, using the whole node"
            );
            whole
        }
    }
}

/// End offset of the trivia that trails `end`.
///
/// Offsets past the end of the source are returned unchanged.
pub fn trailing_trivia_end(source: &str, end: usize) -> usize {
    let bytes = source.as_bytes();
    if end >= bytes.len() {
        return end;
    }

    let mut i = end;
    while i < bytes.len() && matches!(bytes[i], b' ' | b'\t') {
        i += 1;
    }

    if bytes[i..].starts_with(b"//") {
        while i < bytes.len() && !matches!(bytes[i], b'\n' | b'\r') {
            i += 1;
        }
    }

    if bytes[i..].starts_with(b"\r\n") {
        i += 2;
    } else if i < bytes.len() && matches!(bytes[i], b'\n' | b'\r') {
        i += 1;
    }

    i
}
