//! Content-Type parsing and the delivery report compliance check

use crate::headers::HeaderMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Parsed `Content-Type` header value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentTypeInfo {
    /// MIME type as written (e.g., "multipart/report")
    pub mime_type: String,

    /// Parameters keyed by lowercased name, values unquoted
    pub parameters: BTreeMap<String, String>,
}

impl ContentTypeInfo {
    /// Parse a raw header value such as
    /// `multipart/report; report-type=delivery-status; boundary="abc"`
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let mut info = Self::default();

        for (i, segment) in value.split(';').map(str::trim).enumerate() {
            if let Some((key, val)) = segment.split_once('=') {
                info.parameters.insert(
                    key.trim().to_lowercase(),
                    strip_quotes(val.trim()).to_string(),
                );
            } else if i == 0 {
                info.mime_type = segment.to_string();
            }
        }

        info
    }

    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn report_type(&self) -> Option<&str> {
        self.parameter("report-type")
    }

    #[must_use]
    pub fn boundary(&self) -> Option<&str> {
        self.parameter("boundary")
    }

    /// True for `multipart/report; report-type=delivery-status` with a
    /// non-empty boundary
    #[must_use]
    pub fn is_delivery_report(&self) -> bool {
        self.mime_type.eq_ignore_ascii_case("multipart/report")
            && self
                .report_type()
                .is_some_and(|t| t.eq_ignore_ascii_case("delivery-status"))
            && self.boundary().is_some_and(|b| !b.is_empty())
    }
}

fn strip_quotes(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

impl HeaderMap {
    /// Parsed `Content-Type` field, if present
    #[must_use]
    pub fn content_type(&self) -> Option<ContentTypeInfo> {
        self.get("Content-Type").map(ContentTypeInfo::parse)
    }
}

/// Whether top-level headers declare an RFC 1892 delivery status report
#[must_use]
pub fn is_compliant(headers: &HeaderMap) -> bool {
    headers
        .content_type()
        .is_some_and(|ct| ct.is_delivery_report())
}
