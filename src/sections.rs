//! Splitting a `multipart/report` body into its three parts

use crate::error::{ParseOutcome, Result};
use mailparse::MailHeaderMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// How the report parts are located once the body is split on the boundary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SplitStrategy {
    /// Use each part's declared Content-Type, falling back to position when
    /// no part declares itself as `message/delivery-status`
    #[default]
    ByContentType,
    /// Parts 1, 2 and 3 are human readable, machine readable and returned
    ByPosition,
}

/// The three parts of a delivery report
///
/// Each part keeps its own MIME header block followed by a blank line and its
/// content, exactly as it appeared between two boundary lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MimeSections {
    /// Free text meant for a mail client
    pub human_readable: String,

    /// The `message/delivery-status` part
    pub machine_parsable: String,

    /// Headers (and possibly body) of the message that bounced
    pub returned_message: String,
}

const DELIVERY_STATUS_TYPES: &[&str] = &[
    "message/delivery-status",
    "message/global-delivery-status",
];

const RETURNED_MESSAGE_TYPES: &[&str] = &[
    "message/rfc822",
    "text/rfc822-headers",
    "message/global",
    "message/global-headers",
];

/// Split `body` on `boundary` and pick out the report parts
///
/// Fewer than three boundary occurrences is always malformed, whatever the
/// strategy.
pub fn split_sections(body: &str, boundary: &str, strategy: SplitStrategy) -> Result<MimeSections> {
    let segments: Vec<&str> = body.split(boundary).map(strip_delimiter_dashes).collect();

    if segments.len() < 4 {
        return Err(ParseOutcome::Malformed(format!(
            "expected 3 parts delimited by boundary {boundary:?}, found {}",
            segments.len().saturating_sub(1)
        )));
    }

    trace!("Body split into {} segments", segments.len());

    if strategy == SplitStrategy::ByContentType
        && let Some(sections) = locate_by_content_type(&segments[1..])
    {
        return Ok(sections);
    }

    debug!("Locating report parts by position");
    Ok(MimeSections {
        human_readable: segments[1].to_string(),
        machine_parsable: segments[2].to_string(),
        returned_message: segments[3].to_string(),
    })
}

/// Drop the `--` that precedes the next boundary occurrence
fn strip_delimiter_dashes(segment: &str) -> &str {
    segment
        .strip_suffix("\r\n--")
        .or_else(|| segment.strip_suffix("--"))
        .unwrap_or(segment)
}

fn locate_by_content_type(parts: &[&str]) -> Option<MimeSections> {
    let mut human_readable = None;
    let mut machine_parsable = None;
    let mut returned_message = None;

    for (i, part) in parts.iter().enumerate() {
        let Some(mime_type) = declared_mime_type(part) else {
            continue;
        };

        if DELIVERY_STATUS_TYPES.contains(&mime_type.as_str()) {
            machine_parsable.get_or_insert(i);
        } else if RETURNED_MESSAGE_TYPES.contains(&mime_type.as_str()) {
            returned_message.get_or_insert(i);
        } else if mime_type.starts_with("text/") || mime_type.starts_with("multipart/") {
            human_readable.get_or_insert(i);
        }
    }

    let machine_parsable = machine_parsable?;
    debug!("Located delivery-status part by Content-Type");

    // An unlisted returned part is the first leftover part with content
    let returned_message = returned_message.or_else(|| {
        (0..parts.len()).find(|&i| {
            i != machine_parsable
                && Some(i) != human_readable
                && !parts[i].trim().is_empty()
                && !parts[i].starts_with("--")
        })
    });

    let part_at = |idx: Option<usize>| idx.map_or_else(String::new, |i| parts[i].to_string());

    Some(MimeSections {
        human_readable: part_at(human_readable),
        machine_parsable: parts[machine_parsable].to_string(),
        returned_message: part_at(returned_message),
    })
}

/// Lowercased Content-Type a part declares in its own header block
fn declared_mime_type(part: &str) -> Option<String> {
    let part = part.strip_prefix("\r\n").unwrap_or(part);
    let (headers, _) = mailparse::parse_headers(part.as_bytes()).ok()?;
    let value = headers.get_first_value("Content-Type")?;
    Some(mailparse::parse_content_type(&value).mimetype.to_lowercase())
}
