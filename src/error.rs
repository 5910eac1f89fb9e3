//! Error types for bounce parsing

use thiserror::Error;

/// Outcomes that stop a bounce parse before a result is produced
///
/// `NotCompliant` is not a failure of the parser: it means the input is not
/// something this crate parses, and callers usually route it elsewhere.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// The message does not declare a
    /// `multipart/report; report-type=delivery-status` body with a boundary
    #[error("message is not an RFC 1892 delivery status report")]
    NotCompliant,

    /// The message claims to be a delivery report but its structure is broken
    #[error("malformed delivery status report: {0}")]
    Malformed(String),
}

impl ParseOutcome {
    /// True when the input simply was not a delivery report
    #[must_use]
    pub const fn is_not_compliant(&self) -> bool {
        matches!(self, Self::NotCompliant)
    }
}

/// Result type for bounce parsing operations
pub type Result<T> = std::result::Result<T, ParseOutcome>;
