//! Line ending normalization and header/body splitting

/// Rewrite every line ending as CRLF
///
/// Bare `\n` and `\r\n` may be mixed freely in the input. Nothing else is
/// touched, so a lone `\r` survives as-is.
#[must_use]
pub fn normalize_line_endings(raw: &str) -> String {
    raw.replace("\r\n", "\n").replace('\n', "\r\n")
}

/// Split normalized text at the first blank line
///
/// Returns `(head, body)`. Without a blank line the whole input is the head
/// and the body is empty.
#[must_use]
pub fn split_head_body(text: &str) -> (&str, &str) {
    text.split_once("\r\n\r\n").unwrap_or((text, ""))
}
