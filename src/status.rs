//! RFC 3463 enhanced status codes and their descriptions

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

static DOTTED_REGEX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"^([245])\.([0-7])\.([0-8])").unwrap());

static COMPACT_REGEX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"^([245])([0-7])([0-8])").unwrap());

static LEADING_REGEX: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"^(?:[245]\d\d[\s-]+)?#?([245])\.([0-7])\.([0-8])(?:\s|$)").unwrap()
});

/// An enhanced status code, `class.subject.detail`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatusCode {
    pub class: u8,
    pub subject: u8,
    pub detail: u8,
}

impl StatusCode {
    /// Parse the code at the start of `raw`
    ///
    /// Accepts the dotted form (`5.1.1`) and, failing that, a compact
    /// three digit form (`550` reads as `5.5.0`) seen in damaged reports.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        DOTTED_REGEX
            .captures(raw)
            .or_else(|| COMPACT_REGEX.captures(raw))
            .and_then(|caps| Self::from_captures(&caps))
    }

    /// Dotted code leading a diagnostic text, e.g. `550 5.1.1 No such user`
    ///
    /// The code must open the text, optionally after an SMTP reply code, so
    /// dotted numbers inside addresses or versions are not taken for codes.
    #[must_use]
    pub fn find_in(text: &str) -> Option<Self> {
        LEADING_REGEX
            .captures(text.trim())
            .and_then(|caps| Self::from_captures(&caps))
    }

    fn from_captures(caps: &regex::Captures<'_>) -> Option<Self> {
        let digit = |i: usize| caps.get(i)?.as_str().parse::<u8>().ok();
        Some(Self {
            class: digit(1)?,
            subject: digit(2)?,
            detail: digit(3)?,
        })
    }

    /// Human readable classification, if the class is known
    #[must_use]
    pub fn classify(&self) -> Option<StatusClassification> {
        let class = CLASS_TABLE.iter().find(|c| c.class == self.class)?;
        let subject = SUBJECT_TABLE
            .iter()
            .find(|s| s.subject == self.subject && s.detail == self.detail);

        Some(StatusClassification {
            code: *self,
            class_title: class.title.to_string(),
            class_description: class.description.to_string(),
            subject_title: subject.map(|s| s.title.to_string()),
            subject_description: subject.map(|s| s.description.to_string()),
        })
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.class, self.subject, self.detail)
    }
}

/// Classify a raw status string
///
/// Returns `None` when the string is not a status code or its class is not
/// one of 2, 4 or 5.
#[must_use]
pub fn classify(code: &str) -> Option<StatusClassification> {
    StatusCode::parse(code)?.classify()
}

/// Descriptions attached to a status code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusClassification {
    pub code: StatusCode,
    pub class_title: String,
    pub class_description: String,

    /// Absent when `subject.detail` has no table entry
    pub subject_title: Option<String>,
    pub subject_description: Option<String>,
}

impl StatusClassification {
    /// Short message, e.g. "Permanent Failure: Bad destination mailbox address"
    #[must_use]
    pub fn message(&self) -> String {
        match &self.subject_title {
            Some(subject) => format!("{}: {subject}", self.class_title),
            None => self.class_title.clone(),
        }
    }

    /// Both descriptions joined
    #[must_use]
    pub fn details(&self) -> String {
        match &self.subject_description {
            Some(subject) => format!("{} {subject}", self.class_description),
            None => self.class_description.clone(),
        }
    }
}

/// Entry of the class table, keyed by the leading digit
#[derive(Debug)]
pub struct ClassEntry {
    pub class: u8,
    pub title: &'static str,
    pub description: &'static str,
}

/// Entry of the subject table, keyed by `subject.detail`
///
/// Entries apply to every class: `X.1.1` reads the same for 4 and 5.
#[derive(Debug)]
pub struct SubjectEntry {
    pub subject: u8,
    pub detail: u8,
    pub title: &'static str,
    pub description: &'static str,
}

pub static CLASS_TABLE: &[ClassEntry] = &[
    ClassEntry {
        class: 2,
        title: "Success",
        description: "Success specifies that the DSN is reporting a positive delivery action. \
            Detail sub-codes may provide notification of transformations required for delivery.",
    },
    ClassEntry {
        class: 4,
        title: "Persistent Transient Failure",
        description: "A persistent transient failure is one in which the message as sent is valid, \
            but some temporary event prevents the successful sending of the message. \
            Sending in the future may be successful.",
    },
    ClassEntry {
        class: 5,
        title: "Permanent Failure",
        description: "A permanent failure is one which is not likely to be resolved by resending \
            the message in the current form. Some change to the message or the destination \
            must be made for successful delivery.",
    },
];

const fn entry(
    subject: u8,
    detail: u8,
    title: &'static str,
    description: &'static str,
) -> SubjectEntry {
    SubjectEntry {
        subject,
        detail,
        title,
        description,
    }
}

pub static SUBJECT_TABLE: &[SubjectEntry] = &[
    entry(0, 0, "Other undefined Status",
        "Other undefined status is the only undefined error code. It should be used for all errors for which only the class of the error is known."),

    // Addressing
    entry(1, 0, "Other address status",
        "Something about the address specified in the message caused this DSN."),
    entry(1, 1, "Bad destination mailbox address",
        "The mailbox specified in the address does not exist. For Internet mail names, this means the address portion to the left of the @ sign is invalid."),
    entry(1, 2, "Bad destination system address",
        "The destination system specified in the address does not exist or is incapable of accepting mail. For Internet mail names, this means the address portion to the right of the @ is invalid for mail."),
    entry(1, 3, "Bad destination mailbox address syntax",
        "The destination address was syntactically invalid. This can apply to any field in the address."),
    entry(1, 4, "Destination mailbox address ambiguous",
        "The mailbox address as specified matches one or more recipients on the destination system."),
    entry(1, 5, "Destination address valid",
        "This mailbox address as specified was valid."),
    entry(1, 6, "Destination mailbox has moved, No forwarding address",
        "The mailbox address provided was at one time valid, but mail is no longer being accepted for that address."),
    entry(1, 7, "Bad sender's mailbox address syntax",
        "The sender's address was syntactically invalid."),
    entry(1, 8, "Bad sender's system address",
        "The sender's system specified in the address does not exist or is incapable of accepting return mail."),

    // Mailbox
    entry(2, 0, "Other or undefined mailbox status",
        "The mailbox exists, but something about the destination mailbox has caused the sending of this DSN."),
    entry(2, 1, "Mailbox disabled, not accepting messages",
        "The mailbox exists, but is not accepting messages. This may be a permanent error if the mailbox will never be re-enabled or a transient error if the mailbox is only temporarily disabled."),
    entry(2, 2, "Mailbox full",
        "The mailbox is full because the user has exceeded a per-mailbox administrative quota or physical capacity."),
    entry(2, 3, "Message length exceeds administrative limit",
        "A per-mailbox administrative message length limit has been exceeded."),
    entry(2, 4, "Mailing list expansion problem",
        "The mailbox is a mailing list address and the mailing list was unable to be expanded."),

    // Mail system
    entry(3, 0, "Other or undefined mail system status",
        "The destination system exists and normally accepts mail, but something about the system has caused the generation of this DSN."),
    entry(3, 1, "Mail system full",
        "Mail system storage has been exceeded."),
    entry(3, 2, "System not accepting network messages",
        "The host on which the mailbox is resident is not accepting messages."),
    entry(3, 3, "System not capable of selected features",
        "Selected features specified for the message are not supported by the destination system."),
    entry(3, 4, "Message too big for system",
        "The message is larger than per-message size limit. This limit may either be for physical or administrative reasons."),
    entry(3, 5, "System incorrectly configured",
        "The system is not configured in a manner which will permit it to accept this message."),

    // Network and routing
    entry(4, 0, "Other or undefined network or routing status",
        "Something went wrong with the networking, but it is not clear what the problem is, or the problem cannot be well expressed with any of the other provided detail codes."),
    entry(4, 1, "No answer from host",
        "The outbound connection attempt was not answered, either because the remote system was busy, or otherwise unable to take a call."),
    entry(4, 2, "Bad connection",
        "The outbound connection was established, but was otherwise unable to complete the message transaction, either because of time-out, or inadequate connection quality."),
    entry(4, 3, "Directory server failure",
        "The network system was unable to forward the message, because a directory server was unavailable."),
    entry(4, 4, "Unable to route",
        "The mail system was unable to determine the next hop for the message because the necessary routing information was unavailable from the directory server."),
    entry(4, 5, "Mail system congestion",
        "The mail system was unable to deliver the message because the mail system was congested."),
    entry(4, 6, "Routing loop detected",
        "A routing loop caused the message to be forwarded too many times, either because of incorrect routing tables or a user forwarding loop."),
    entry(4, 7, "Delivery time expired",
        "The message was considered too old by the rejecting system, either because it remained on that host too long or because the time-to-live value specified by the sender of the message was exceeded."),

    // Mail delivery protocol
    entry(5, 0, "Other or undefined protocol status",
        "Something was wrong with the protocol necessary to deliver the message to the next hop and the problem cannot be well expressed with any of the other provided detail codes."),
    entry(5, 1, "Invalid command",
        "A mail transaction protocol command was issued which was either out of sequence or unsupported."),
    entry(5, 2, "Syntax error",
        "A mail transaction protocol command was issued which could not be interpreted, either because the syntax was wrong or the command is unrecognized."),
    entry(5, 3, "Too many recipients",
        "More recipients were specified for the message than could have been delivered by the protocol."),
    entry(5, 4, "Invalid command arguments",
        "A valid mail transaction protocol command was issued with invalid arguments, either because the arguments were out of range or represented unrecognized features."),
    entry(5, 5, "Wrong protocol version",
        "A protocol version mis-match existed which could not be automatically resolved by the communicating parties."),

    // Message content or media
    entry(6, 0, "Other or undefined media error",
        "Something about the content of a message caused it to be considered undeliverable and the problem cannot be well expressed with any of the other provided detail codes."),
    entry(6, 1, "Media not supported",
        "The media of the message is not supported by either the delivery protocol or the next system in the forwarding path."),
    entry(6, 2, "Conversion required and prohibited",
        "The content of the message must be converted before it can be delivered and such conversion is not permitted."),
    entry(6, 3, "Conversion required but not supported",
        "The message content must be converted to be forwarded but such conversion is not possible or is not practical by a host in the forwarding path."),
    entry(6, 4, "Conversion with loss performed",
        "This is a warning sent to the sender when message delivery was successfully but when the delivery required a conversion in which some data was lost."),
    entry(6, 5, "Conversion Failed",
        "A conversion was required but was unsuccessful."),

    // Security or policy
    entry(7, 0, "Other or undefined security status",
        "Something related to security caused the message to be returned, and the problem cannot be well expressed with any of the other provided detail codes."),
    entry(7, 1, "Delivery not authorized, message refused",
        "The sender is not authorized to send to the destination. This can be the result of per-host or per-recipient filtering."),
    entry(7, 2, "Mailing list expansion prohibited",
        "The sender is not authorized to send a message to the intended mailing list."),
    entry(7, 3, "Security conversion required but not possible",
        "A conversion from one secure messaging protocol to another was required for delivery and such conversion was not possible."),
    entry(7, 4, "Security features not supported",
        "A message contained security features such as secure authentication that could not be supported on the delivery protocol."),
    entry(7, 5, "Cryptographic failure",
        "A transport system otherwise authorized to validate or decrypt a message in transport was unable to do so because necessary information such as key was not available or such information was invalid."),
    entry(7, 6, "Cryptographic algorithm not supported",
        "A transport system otherwise authorized to validate or decrypt a message was unable to do so because the necessary algorithm was not supported."),
    entry(7, 7, "Message integrity failure",
        "A transport system otherwise authorized to validate a message was unable to do so because the message was corrupted or altered."),
];
