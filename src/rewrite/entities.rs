//! Character reference handling for text content.
//!
//! Text chunks arrive exactly as written in the source, so `&amp;` and
//! friends are still encoded. The translation service wants plain text and
//! the client wants well-formed markup back.

/// Decode every named and numeric character reference.
///
/// Unknown or malformed references are left as written.
pub fn decode_text(raw: &str) -> String {
    html_escape::decode_html_entities(raw).into_owned()
}

/// Escape text for an HTML text context.
pub fn escape_text(text: &str) -> String {
    html_escape::encode_text(text).into_owned()
}

/// Escape a value for a double-quoted attribute.
pub fn escape_attribute(value: &str) -> String {
    html_escape::encode_double_quoted_attribute(value).into_owned()
}
