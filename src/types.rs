//! Result types for parsed bounces

use crate::dsn::{Action, TypedValue};
use crate::status::StatusClassification;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which parser produced a result
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseMethod {
    /// Structured `multipart/report; report-type=delivery-status` parsing
    #[default]
    Rfc1892,
}

impl fmt::Display for ParseMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rfc1892 => write!(f, "rfc1892"),
        }
    }
}

/// A fully parsed delivery status notification
///
/// The flat lists mirror what bounce handlers traditionally consume.
/// `bounced_addresses` and `status_codes` have one entry per recipient, in
/// report order. `status_messages` and `status_message_details` do not: a
/// recipient may contribute zero or several messages. Use `recipients` when
/// per-recipient pairing matters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BounceInfo {
    /// Recipient addresses that bounced
    pub bounced_addresses: Vec<String>,

    /// Raw `Status` value of each recipient (empty when absent)
    pub status_codes: Vec<String>,

    /// Classification titles and diagnostic texts
    pub status_messages: Vec<String>,

    /// Classification descriptions
    pub status_message_details: Vec<String>,

    /// Sender of the message that bounced
    pub original_from: Option<String>,

    /// Addressee of the message that bounced
    pub original_to: Option<String>,

    /// Subject of the message that bounced
    pub original_subject: Option<String>,

    /// MTA that generated the report
    pub reporting_mta: Option<String>,

    /// When the reporting MTA received the original message
    pub arrival_date: Option<DateTime<Utc>>,

    /// Structured per-recipient view
    pub recipients: Vec<BouncedRecipient>,

    pub parse_method: ParseMethod,
}

impl BounceInfo {
    /// Number of recipients in the report
    #[must_use]
    pub const fn recipient_count(&self) -> usize {
        self.recipients.len()
    }
}

/// One recipient of a delivery report
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BouncedRecipient {
    /// Address with angle brackets removed (empty when the report gave none)
    pub address: String,

    /// Raw `Status` value
    pub status_code: Option<String>,

    /// Classification of `status_code`, when it could be classified
    pub classification: Option<StatusClassification>,

    pub diagnostic_code: Option<TypedValue>,

    /// Classification of an enhanced code found in the diagnostic text
    pub diagnostic_classification: Option<StatusClassification>,

    pub action: Option<Action>,
    pub remote_mta: Option<String>,
    pub last_attempt_date: Option<DateTime<Utc>>,
}

impl BouncedRecipient {
    /// True when the status code is in class 5
    #[must_use]
    pub fn is_permanent(&self) -> bool {
        self.classification
            .as_ref()
            .is_some_and(|c| c.code.class == 5)
    }
}
