//! Canonical event record

use super::fields::{FieldValue, Fields};
use super::payload::ErrorPayload;
use super::severity::Severity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Exception details attached to an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExceptionInfo {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Stack decomposed into trimmed, non-empty lines
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub stack: Vec<String>,
}

impl ExceptionInfo {
    /// Build from a raw error payload, splitting its stack text into
    /// trimmed lines
    pub fn from_payload(payload: &ErrorPayload) -> Self {
        let stack = payload
            .stack
            .as_deref()
            .map(|s| {
                s.lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            message: payload.message.clone(),
            code: payload.code.clone(),
            stack,
        }
    }

    /// Rejoin the decomposed stack with newlines
    pub fn stack_text(&self) -> String {
        self.stack.join("\n")
    }
}

/// A normalized log event, immutable once dispatched
///
/// The timestamp is assigned at normalization time: it records when the call
/// site logged, not when the batch was flushed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub severity: Severity,
    /// Numeric verbosity rank; lower values are shown more readily
    pub level: i64,
    pub message: String,
    #[serde(skip_serializing_if = "Fields::is_empty", default)]
    pub fields: Fields,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exception: Option<ExceptionInfo>,
    /// Side-effect requests carried through uninterpreted
    #[serde(skip_serializing_if = "Fields::is_empty", default)]
    pub directives: Fields,
}

impl Event {
    /// Whether a side-effect directive of the given name was requested
    pub fn has_directive(&self, name: &str) -> bool {
        self.directives.contains_key(name)
    }

    pub fn directive(&self, name: &str) -> Option<&FieldValue> {
        self.directives.get(name)
    }
}
