//! Event normalizer
//!
//! Converts raw call arguments into a canonical [`Event`]. The transform is
//! pure apart from timestamp assignment, which happens here so the record is
//! stamped at the call site rather than at flush. No input shape is fatal:
//! logging must never be the cause of an application crash, so degraded
//! inputs stringify best-effort instead of erroring.

use super::event::{Event, ExceptionInfo};
use super::fields::{FieldValue, Fields};
use super::payload::{CallContext, Payload};
use super::severity::Severity;
use chrono::Utc;
use serde_json::Value;

/// Normalize a raw call into an event record
///
/// `inherited` is the logger node's effective context; the call's own context
/// fields are layered on top of it (call keys win). An `Error` context
/// populates the exception and, when the payload carries no text, supplies
/// the message.
pub fn normalize(
    severity: Severity,
    payload: Payload,
    inherited: &Fields,
    context: Option<CallContext>,
    directives: Fields,
) -> Event {
    let mut exception = None;

    let mut fields = match context {
        Some(CallContext::Fields(call_fields)) => inherited.merged_with(&call_fields),
        Some(CallContext::Error(err)) => {
            exception = Some(ExceptionInfo::from_payload(&err));
            inherited.clone()
        }
        None => inherited.clone(),
    };

    let text = match payload {
        Payload::Text(s) => s,
        Payload::Structured(v) => render_value(&v),
        Payload::List(items) => items
            .iter()
            .map(render_value)
            .collect::<Vec<_>>()
            .join(" "),
        Payload::Error(err) => {
            let message = err.message.clone();
            // A payload error takes precedence over a context error
            exception = Some(ExceptionInfo::from_payload(&err));
            message
        }
    };

    // An inherited message field wins; the call's text becomes a subject
    // sub-message so a child logger can annotate without discarding it.
    let mut message = match fields.remove("message") {
        Some(FieldValue::String(existing)) => {
            if !text.is_empty() {
                fields.insert("subject", text);
            }
            existing
        }
        Some(other) => {
            fields.insert("message", other);
            text
        }
        None => text,
    };

    if message.is_empty() {
        if let Some(ref exc) = exception {
            message = exc.message.clone();
        }
    }

    // A caller-supplied level is never overridden
    let level = match fields.remove("level") {
        Some(FieldValue::Int(l)) => l,
        Some(other) => {
            fields.insert("level", other);
            severity.default_level()
        }
        None => severity.default_level(),
    };

    let mut directives = directives;
    if directives.contains_key("template") && !directives.contains_key("notify") {
        directives.insert("notify", true);
    }

    Event {
        severity,
        level,
        message,
        fields,
        timestamp: Utc::now(),
        exception,
        directives,
    }
}

fn render_value(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
