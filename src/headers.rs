//! RFC 822 style header block parsing
//!
//! The same parser handles the top-level message headers, the field groups
//! inside a `message/delivery-status` part, and the headers of the returned
//! original message.

use regex::Regex;
use serde::{Deserialize, Serialize};

static FIELD_REGEX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"^([^\s:]+):\s(.*)").unwrap());

/// How a repeated field is folded into the existing entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergePolicy {
    /// Keep the first value and drop later occurrences
    FirstWins,
    /// Append later values to the first, separated by `|`
    ConcatenateWithPipe,
}

impl MergePolicy {
    /// Policy for a canonical field name
    ///
    /// Only `Received` may legitimately repeat and is worth keeping in full.
    #[must_use]
    pub fn for_field(name: &str) -> Self {
        if name == "Received" {
            Self::ConcatenateWithPipe
        } else {
            Self::FirstWins
        }
    }
}

/// Canonical form of a field name: first letter uppercase, the rest lowercase
///
/// `CONTENT-TYPE` and `content-type` both become `Content-type`.
#[must_use]
pub fn canonical_field_name(name: &str) -> String {
    let lower = name.to_lowercase();
    let mut chars = lower.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Ordered map of canonical field names to values
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderMap {
    entries: Vec<(String, String)>,
}

impl HeaderMap {
    /// Look up a field by name, in any case
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        let name = canonical_field_name(name);
        self.entries
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Look up a field and drop it if blank
    #[must_use]
    pub fn get_non_empty(&self, name: &str) -> Option<&str> {
        self.get(name).map(str::trim).filter(|v| !v.is_empty())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate fields in the order they were first seen
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Record a field, honouring its merge policy
    ///
    /// Returns the index of the entry now holding the value, or `None` when
    /// the value was dropped.
    fn record(&mut self, name: String, value: &str) -> Option<usize> {
        match self.entries.iter().position(|(key, _)| *key == name) {
            None => {
                self.entries.push((name, value.to_string()));
                Some(self.entries.len() - 1)
            }
            Some(idx) => match MergePolicy::for_field(&name) {
                MergePolicy::FirstWins => None,
                MergePolicy::ConcatenateWithPipe => {
                    let existing = &mut self.entries[idx].1;
                    existing.push('|');
                    existing.push_str(value);
                    Some(idx)
                }
            },
        }
    }

    fn append_continuation(&mut self, idx: usize, line: &str) {
        let existing = &mut self.entries[idx].1;
        existing.push(' ');
        existing.push_str(line);
    }
}

/// Parse a CRLF separated header block
#[must_use]
pub fn parse_header_block(block: &str) -> HeaderMap {
    parse_header_lines(block.split("\r\n"))
}

/// Parse header lines that were already split
///
/// Lines that are not `name: value` are folded onto the field set by the most
/// recent header line. A continuation that follows a dropped duplicate is
/// dropped with it, and one that arrives before any field is ignored.
#[must_use]
pub fn parse_header_lines<'a, I>(lines: I) -> HeaderMap
where
    I: IntoIterator<Item = &'a str>,
{
    let mut map = HeaderMap::default();
    let mut last: Option<usize> = None;

    for line in lines {
        if let Some(caps) = FIELD_REGEX.captures(line) {
            let name = canonical_field_name(&caps[1]);
            last = map.record(name, caps[2].trim_end());
            continue;
        }

        let content = line.trim();
        if content.is_empty() {
            continue;
        }
        if let Some(idx) = last {
            map.append_continuation(idx, content);
        }
    }

    map
}
