//! Core types for lint messages and reports.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Severity level attached to an enabled rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Warning that should be addressed.
    #[serde(rename = "warn")]
    Warning,
    /// Error that must be fixed.
    #[serde(rename = "error")]
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Warning => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A single rule violation within one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Human-readable message.
    pub message: String,
    /// Severity of the violated rule.
    pub level: Severity,
    /// Line number (1-indexed), when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    /// Column number (1-indexed), when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub col: Option<usize>,
}

impl Message {
    /// Creates a new message without position information.
    #[must_use]
    pub fn new(message: impl Into<String>, level: Severity) -> Self {
        Self {
            message: message.into(),
            level,
            line: None,
            col: None,
        }
    }
}

impl std::fmt::Display for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let (Some(line), Some(col)) = (self.line, self.col) {
            write!(f, "{line}:{col}: ")?;
        }
        write!(f, "{}: {}", self.level, self.message)
    }
}

/// Violations for one document, keyed by rule id.
///
/// A rule id appears at most once per document.
pub type Messages = BTreeMap<String, Message>;

/// Violations for a whole run, keyed by input identifier
/// (a path relative to the working directory, or an absolute URL).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Report {
    entries: BTreeMap<String, Messages>,
}

impl Report {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the messages of one input. Inputs without messages are omitted.
    pub fn insert(&mut self, input: impl Into<String>, messages: Messages) {
        if !messages.is_empty() {
            self.entries.insert(input.into(), messages);
        }
    }

    /// Returns the messages recorded for an input.
    #[must_use]
    pub fn get(&self, input: &str) -> Option<&Messages> {
        self.entries.get(input)
    }

    /// Iterates over `(input, messages)` pairs in input order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Messages)> {
        self.entries.iter()
    }

    /// Returns true if no input produced a message.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of inputs with at least one message.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Total number of messages across all inputs.
    #[must_use]
    pub fn total(&self) -> usize {
        self.entries.values().map(BTreeMap::len).sum()
    }

    /// Counts messages by severity as `(errors, warnings)`.
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize) {
        let mut errors = 0;
        let mut warnings = 0;
        for message in self.entries.values().flat_map(BTreeMap::values) {
            match message.level {
                Severity::Error => errors += 1,
                Severity::Warning => warnings += 1,
            }
        }
        (errors, warnings)
    }

    /// Checks if any message meets or exceeds the given severity threshold.
    #[must_use]
    pub fn has_violations_at(&self, severity: Severity) -> bool {
        self.entries
            .values()
            .flat_map(BTreeMap::values)
            .any(|m| m.level >= severity)
    }

    /// Adds the entries of another report.
    pub fn extend(&mut self, other: Self) {
        self.entries.extend(other.entries);
    }
}

impl<'a> IntoIterator for &'a Report {
    type Item = (&'a String, &'a Messages);
    type IntoIter = std::collections::btree_map::Iter<'a, String, Messages>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
