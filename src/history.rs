//! Append-only log of calculation records.
//!
//! Tools describe each calculation with three short text fields. The log is
//! only ever appended to and exported; nothing reads it back.

use std::fmt;
use std::ops::Deref;

use thiserror::Error;

use crate::constants::RECORD_FIELD_LEN;

/// Text longer than a record field allows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("text of {len} characters exceeds the {max}-character record field")]
pub struct TextTooLong {
    /// Characters supplied.
    pub len: usize,
    /// Field capacity.
    pub max: usize,
}

/// A string of at most 63 characters.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String"))]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BoundedText(String);

impl BoundedText {
    /// Accepts `text` only if it fits.
    pub fn new(text: impl Into<String>) -> Result<Self, TextTooLong> {
        let text = text.into();
        let len = text.chars().count();
        if len > RECORD_FIELD_LEN {
            return Err(TextTooLong {
                len,
                max: RECORD_FIELD_LEN,
            });
        }
        Ok(Self(text))
    }

    /// Keeps the first 63 characters of `text`.
    #[must_use]
    pub fn truncated(text: &str) -> Self {
        Self(text.chars().take(RECORD_FIELD_LEN).collect())
    }

    /// Borrowed contents.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for BoundedText {
    type Error = TextTooLong;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        Self::new(text)
    }
}

impl Deref for BoundedText {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BoundedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One logged calculation.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalcRecord {
    /// Tool that ran, e.g. `4-Band Encode`.
    pub tool: BoundedText,
    /// Summary of the inputs.
    pub inputs: BoundedText,
    /// Summary of the result.
    pub result: BoundedText,
}

impl CalcRecord {
    /// Builds a record, truncating each field to fit.
    #[must_use]
    pub fn new(tool: &str, inputs: &str, result: &str) -> Self {
        Self {
            tool: BoundedText::truncated(tool),
            inputs: BoundedText::truncated(inputs),
            result: BoundedText::truncated(result),
        }
    }
}

/// Destination for calculation records.
pub trait RecordSink {
    /// Appends a record at the end of the log.
    fn append(&mut self, record: CalcRecord);
}

/// In-memory ordered record log.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    records: Vec<CalcRecord>,
}

impl History {
    /// Creates an empty log.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Records in insertion order.
    #[must_use]
    pub fn records(&self) -> &[CalcRecord] {
        &self.records
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when nothing has been logged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RecordSink for History {
    fn append(&mut self, record: CalcRecord) {
        tracing::debug!(tool = record.tool.as_str(), "record appended");
        self.records.push(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounded_text_rejects_or_truncates() {
        let long = "x".repeat(70);
        assert_eq!(
            BoundedText::new(long.clone()),
            Err(TextTooLong { len: 70, max: 63 })
        );
        assert_eq!(BoundedText::truncated(&long).len(), 63);
        assert_eq!(BoundedText::new("ok").unwrap().as_str(), "ok");
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let text = "Ω".repeat(64);
        let bounded = BoundedText::truncated(&text);
        assert_eq!(bounded.chars().count(), 63);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialization_enforces_field_length() {
        let ok: BoundedText = serde_json::from_str(&format!("\"{}\"", "a".repeat(63))).unwrap();
        assert_eq!(ok.len(), 63);
        let long = format!("\"{}\"", "a".repeat(64));
        assert!(serde_json::from_str::<BoundedText>(&long).is_err());
        assert_eq!(serde_json::to_string(&ok).unwrap(), format!("\"{}\"", "a".repeat(63)));
    }

    #[test]
    fn history_keeps_insertion_order() {
        let mut history = History::new();
        history.append(CalcRecord::new("A", "in", "out"));
        history.append(CalcRecord::new("B", "in", "out"));
        let tools: Vec<_> = history.records().iter().map(|r| r.tool.as_str()).collect();
        assert_eq!(tools, ["A", "B"]);
    }
}
