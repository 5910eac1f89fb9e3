//! Headers of the message that bounced

use crate::headers::{HeaderMap, parse_header_block};
use crate::normalize::split_head_body;
use serde::{Deserialize, Serialize};

const ADDRESS_DELIMITERS: &[char] = &['"', '\'', '<', '>', ':', '(', ')', '[', ']'];

/// From, To and Subject of the returned message
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OriginalMessage {
    pub from: Option<String>,
    pub to: Option<String>,
    pub subject: Option<String>,

    /// All headers of the returned message
    pub headers: HeaderMap,
}

impl OriginalMessage {
    /// Extract the original headers from the returned-message part
    ///
    /// The part normally opens with its own MIME header (`Content-Type:
    /// message/rfc822`) and the original headers follow the first blank line.
    /// Some reporters skip the MIME header, in which case the first block is
    /// already the original header block.
    #[must_use]
    pub fn extract(part: &str) -> Self {
        let part = part.strip_prefix("\r\n").unwrap_or(part);
        let (first, rest) = split_head_body(part);
        let first_fields = parse_header_block(first);

        let headers = if is_part_header(&first_fields) {
            parse_header_block(split_head_body(rest).0)
        } else {
            first_fields
        };

        Self {
            from: headers.get("From").and_then(extract_address),
            to: headers.get("To").and_then(extract_address),
            subject: headers.get_non_empty("Subject").map(str::to_string),
            headers,
        }
    }
}

fn is_part_header(fields: &HeaderMap) -> bool {
    fields.content_type().is_some_and(|ct| {
        let mime_type = ct.mime_type.to_ascii_lowercase();
        mime_type.starts_with("message/") || mime_type == "text/rfc822-headers"
    }) && !fields.contains("From")
}

/// First token of a mangled address header that looks like an address
///
/// `"Jane" <jane@example.com>` and `jane@example.com (Jane)` both give
/// `jane@example.com`.
#[must_use]
pub fn extract_address(value: &str) -> Option<String> {
    value
        .split(ADDRESS_DELIMITERS)
        .map(str::trim)
        .find(|token| token.contains('@'))
        .map(str::to_string)
}
