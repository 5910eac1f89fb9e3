// Enforce at crate level
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! Bounce Parser
//!
//! Parses RFC 1892/3464 delivery status notifications
//! (`multipart/report; report-type=delivery-status`) into a normalized
//! result: the recipients that bounced, their RFC 3463 enhanced status codes
//! with human readable descriptions, and the From/To/Subject of the message
//! that bounced.
//!
//! Parsing is a pure function of the input. Messages that are not delivery
//! reports yield [`ParseOutcome::NotCompliant`]; reports with a broken layout
//! yield [`ParseOutcome::Malformed`].
//!
//! # Example
//!
//! ```rust
//! use bounce_extract::parse_bounce;
//!
//! let raw = "Content-Type: multipart/report; report-type=delivery-status; boundary=\"==dsn==\"\r\n\
//!            \r\n\
//!            --==dsn==\r\nContent-Type: text/plain\r\n\r\nDelivery failed.\r\n\
//!            --==dsn==\r\nContent-Type: message/delivery-status\r\n\r\n\
//!            Reporting-MTA: dns; mx.example.net\r\n\r\n\
//!            Final-Recipient: rfc822; <user@example.org>\r\nAction: failed\r\nStatus: 5.1.1\r\n\
//!            --==dsn==\r\nContent-Type: message/rfc822\r\n\r\n\
//!            From: sender@example.com\r\nTo: user@example.org\r\nSubject: Hello\r\n\
//!            --==dsn==--\r\n";
//!
//! let bounce = parse_bounce(raw).unwrap();
//! assert_eq!(bounce.bounced_addresses, ["user@example.org"]);
//! assert_eq!(bounce.status_codes, ["5.1.1"]);
//! assert_eq!(bounce.original_subject.as_deref(), Some("Hello"));
//! ```

mod content_type;
mod dsn;
mod error;
mod headers;
mod normalize;
mod original;
mod parser;
mod sections;
mod status;
mod types;

pub use content_type::{ContentTypeInfo, is_compliant};
pub use dsn::*;
pub use error::{ParseOutcome, Result};
pub use headers::{
    HeaderMap, MergePolicy, canonical_field_name, parse_header_block, parse_header_lines,
};
pub use normalize::{normalize_line_endings, split_head_body};
pub use original::{OriginalMessage, extract_address};
pub use parser::{BounceParser, parse_bounce, parse_bounce_bytes};
pub use sections::{MimeSections, SplitStrategy, split_sections};
pub use status::*;
pub use types::*;
