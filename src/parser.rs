//! Main bounce parser implementation

use crate::content_type::is_compliant;
use crate::dsn::{DsnFieldTree, RecipientBlock};
use crate::error::{ParseOutcome, Result};
use crate::headers::parse_header_block;
use crate::normalize::{normalize_line_endings, split_head_body};
use crate::original::OriginalMessage;
use crate::sections::{SplitStrategy, split_sections};
use crate::status::{StatusCode, classify};
use crate::types::{BounceInfo, BouncedRecipient, ParseMethod};
use tracing::debug;

/// Parse a raw delivery status notification with default options
pub fn parse_bounce(raw: &str) -> Result<BounceInfo> {
    BounceParser::default().parse(raw)
}

/// Parse raw bytes, replacing invalid UTF-8
pub fn parse_bounce_bytes(raw: &[u8]) -> Result<BounceInfo> {
    BounceParser::default().parse_bytes(raw)
}

/// Configurable bounce parser
///
/// Holds options only; a single parser may be shared across threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BounceParser {
    strategy: SplitStrategy,
    max_input_len: Option<usize>,
}

impl BounceParser {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose how report parts are located
    #[must_use]
    pub const fn with_strategy(mut self, strategy: SplitStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Reject inputs longer than `limit` bytes
    #[must_use]
    pub const fn with_max_input_len(mut self, limit: usize) -> Self {
        self.max_input_len = Some(limit);
        self
    }

    #[must_use]
    pub const fn strategy(&self) -> SplitStrategy {
        self.strategy
    }

    pub fn parse_bytes(&self, raw: &[u8]) -> Result<BounceInfo> {
        self.parse(&String::from_utf8_lossy(raw))
    }

    pub fn parse(&self, raw: &str) -> Result<BounceInfo> {
        if let Some(limit) = self.max_input_len
            && raw.len() > limit
        {
            return Err(ParseOutcome::Malformed(format!(
                "input of {} bytes exceeds limit of {limit} bytes",
                raw.len()
            )));
        }

        let text = normalize_line_endings(raw);
        let (head, body) = split_head_body(&text);
        let headers = parse_header_block(head);

        if !is_compliant(&headers) {
            debug!("Not a delivery-status report: {:?}", headers.get("Content-Type"));
            return Err(ParseOutcome::NotCompliant);
        }

        let boundary = headers
            .content_type()
            .and_then(|ct| ct.boundary().map(str::to_string))
            .ok_or(ParseOutcome::NotCompliant)?;

        debug!("Splitting delivery-status report on boundary {boundary}");

        let sections = split_sections(body, &boundary, self.strategy)?;
        let tree = DsnFieldTree::parse(&sections.machine_parsable)?;
        let original = OriginalMessage::extract(&sections.returned_message);

        let mut info = BounceInfo {
            original_from: original.from,
            original_to: original.to,
            original_subject: original.subject,
            reporting_mta: tree.per_message.reporting_mta.map(|mta| mta.value),
            arrival_date: tree.per_message.arrival_date,
            parse_method: ParseMethod::Rfc1892,
            ..BounceInfo::default()
        };

        for block in tree.per_recipient {
            let recipient = build_recipient(block);
            push_flat_entries(&mut info, &recipient);
            info.recipients.push(recipient);
        }

        debug!(
            "Parsed bounce: {} recipient(s), original subject {:?}",
            info.recipients.len(),
            info.original_subject
        );

        Ok(info)
    }
}

fn build_recipient(block: RecipientBlock) -> BouncedRecipient {
    let address = block.resolved_address().unwrap_or_default();
    let status_code = block.status.as_deref().map(|s| s.trim().to_string());

    let classification = status_code.as_deref().and_then(classify);
    if classification.is_none() {
        debug!("Unclassifiable status {status_code:?} for {address}");
    }

    let diagnostic_classification = block
        .diagnostic_code
        .as_ref()
        .and_then(|d| StatusCode::find_in(&d.value))
        .and_then(|code| code.classify());

    BouncedRecipient {
        address,
        status_code,
        classification,
        diagnostic_code: block.diagnostic_code,
        diagnostic_classification,
        action: block.action,
        remote_mta: block.remote_mta.map(|mta| mta.value),
        last_attempt_date: block.last_attempt_date,
    }
}

/// Append a recipient's contribution to the flat lists
///
/// Order per recipient: status classification, diagnostic text, then the
/// classification of any code found in the diagnostic text.
fn push_flat_entries(info: &mut BounceInfo, recipient: &BouncedRecipient) {
    info.bounced_addresses.push(recipient.address.clone());
    info.status_codes.push(recipient.status_code.clone().unwrap_or_default());

    if let Some(c) = &recipient.classification {
        info.status_messages.push(c.message());
        info.status_message_details.push(c.details());
    }

    if let Some(diagnostic) = &recipient.diagnostic_code
        && !diagnostic.value.is_empty()
    {
        info.status_messages.push(diagnostic.value.clone());
    }

    if let Some(c) = &recipient.diagnostic_classification {
        info.status_messages.push(c.message());
        info.status_message_details.push(c.details());
    }
}
