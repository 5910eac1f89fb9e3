//! Field parsing for the `message/delivery-status` part (RFC 3464)

use crate::error::{ParseOutcome, Result};
use crate::headers::{HeaderMap, parse_header_block};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::trace;

/// A `kind; value` field such as `rfc822; user@example.org`
///
/// For `Diagnostic-Code` the kind is the protocol (usually `smtp`) and the
/// value is the free text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedValue {
    pub kind: String,
    pub value: String,
}

impl TypedValue {
    /// Split on the first `;`. Without one, the whole field is the value.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.split_once(';') {
            Some((kind, value)) => Self {
                kind: kind.trim().to_string(),
                value: value.trim().to_string(),
            },
            None => Self {
                kind: String::new(),
                value: raw.trim().to_string(),
            },
        }
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kind.is_empty() {
            write!(f, "{}", self.value)
        } else {
            write!(f, "{}; {}", self.kind, self.value)
        }
    }
}

/// Per-recipient `Action` field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Failed,
    Delayed,
    Delivered,
    Relayed,
    Expanded,
    Other(String),
}

impl Action {
    #[must_use]
    pub fn from_field(value: &str) -> Self {
        let value = value.trim();
        match value.to_ascii_lowercase().as_str() {
            "failed" => Self::Failed,
            "delayed" => Self::Delayed,
            "delivered" => Self::Delivered,
            "relayed" => Self::Relayed,
            "expanded" => Self::Expanded,
            _ => Self::Other(value.to_string()),
        }
    }
}

/// Message level fields of a delivery report
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerMessageFields {
    pub reporting_mta: Option<TypedValue>,
    pub dsn_gateway: Option<TypedValue>,
    pub received_from_mta: Option<TypedValue>,
    pub original_envelope_id: Option<String>,
    pub arrival_date: Option<DateTime<Utc>>,

    /// Every field of the group, including the ones above
    pub fields: HeaderMap,
}

impl PerMessageFields {
    fn from_fields(fields: HeaderMap) -> Self {
        Self {
            reporting_mta: typed_field(&fields, "Reporting-MTA"),
            dsn_gateway: typed_field(&fields, "DSN-Gateway"),
            received_from_mta: typed_field(&fields, "Received-From-MTA"),
            original_envelope_id: fields.get_non_empty("Original-Envelope-Id").map(str::to_string),
            arrival_date: date_field(&fields, "Arrival-Date"),
            fields,
        }
    }
}

/// One per-recipient field group
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipientBlock {
    pub final_recipient: Option<TypedValue>,
    pub original_recipient: Option<TypedValue>,

    /// Raw enhanced status code (e.g., "5.1.1")
    pub status: Option<String>,

    pub diagnostic_code: Option<TypedValue>,
    pub action: Option<Action>,
    pub remote_mta: Option<TypedValue>,
    pub last_attempt_date: Option<DateTime<Utc>>,

    /// Every field of the group, including the ones above
    pub fields: HeaderMap,
}

impl RecipientBlock {
    fn from_fields(fields: HeaderMap) -> Self {
        Self {
            final_recipient: typed_field(&fields, "Final-Recipient"),
            original_recipient: typed_field(&fields, "Original-Recipient"),
            status: fields.get_non_empty("Status").map(str::to_string),
            diagnostic_code: typed_field(&fields, "Diagnostic-Code"),
            action: fields.get_non_empty("Action").map(Action::from_field),
            remote_mta: typed_field(&fields, "Remote-MTA"),
            last_attempt_date: date_field(&fields, "Last-Attempt-Date"),
            fields,
        }
    }

    /// The address that bounced
    ///
    /// `Original-Recipient` wins over `Final-Recipient` when it carries an
    /// address. Enclosing angle brackets are removed.
    #[must_use]
    pub fn resolved_address(&self) -> Option<String> {
        [&self.original_recipient, &self.final_recipient]
            .into_iter()
            .flatten()
            .map(|r| strip_angle_brackets(&r.value))
            .find(|addr| !addr.is_empty())
            .map(str::to_string)
    }
}

fn strip_angle_brackets(address: &str) -> &str {
    let address = address.trim();
    address
        .strip_prefix('<')
        .and_then(|a| a.strip_suffix('>'))
        .map_or(address, str::trim)
}

/// Parsed content of a `message/delivery-status` part
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DsnFieldTree {
    /// The part's own MIME headers
    pub mime_header: HeaderMap,
    pub per_message: PerMessageFields,
    pub per_recipient: Vec<RecipientBlock>,
}

impl DsnFieldTree {
    /// Parse a `message/delivery-status` part, MIME headers included
    ///
    /// Groups are separated by blank lines. The first group is the part's MIME
    /// header (possibly empty), the next is the per-message group, and every
    /// later group describes one recipient. Blank groups and stray `--`
    /// fragments are skipped.
    pub fn parse(part: &str) -> Result<Self> {
        let mut blocks = part.split("\r\n\r\n");

        let mime_header = parse_header_block(blocks.next().unwrap_or_default());

        let mut groups = blocks.filter(|b| {
            let trimmed = b.trim();
            !trimmed.is_empty() && trimmed != "--"
        });

        let per_message = groups
            .next()
            .map(|b| PerMessageFields::from_fields(parse_header_block(b)))
            .unwrap_or_default();

        let per_recipient = groups
            .enumerate()
            .map(|(i, block)| parse_recipient_block(i + 1, block))
            .collect::<Result<Vec<_>>>()?;

        trace!("Delivery-status part has {} recipient block(s)", per_recipient.len());

        Ok(Self {
            mime_header,
            per_message,
            per_recipient,
        })
    }
}

fn parse_recipient_block(position: usize, block: &str) -> Result<RecipientBlock> {
    let fields = parse_header_block(block);
    if fields.is_empty() {
        return Err(ParseOutcome::Malformed(format!(
            "recipient block {position} contains no fields"
        )));
    }

    let recipient = RecipientBlock::from_fields(fields);
    if recipient.final_recipient.is_none() && recipient.original_recipient.is_none() {
        return Err(ParseOutcome::Malformed(format!(
            "recipient block {position} names no recipient"
        )));
    }

    Ok(recipient)
}

fn typed_field(fields: &HeaderMap, name: &str) -> Option<TypedValue> {
    fields.get_non_empty(name).map(TypedValue::parse)
}

fn date_field(fields: &HeaderMap, name: &str) -> Option<DateTime<Utc>> {
    fields
        .get_non_empty(name)
        .and_then(|v| DateTime::parse_from_rfc2822(v).ok())
        .map(|dt| dt.with_timezone(&Utc))
}
