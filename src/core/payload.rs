//! Tagged raw-call inputs resolved once by the normalizer
//!
//! The API boundary accepts a small sum type instead of re-sniffing argument
//! shapes at every call site: a call's payload is text, a structured value, a
//! list of values, or an error; its context is either a field map or an error
//! standing in for the whole context.

use super::fields::Fields;
use serde_json::Value;

/// The message argument of a log call
#[derive(Debug, Clone)]
pub enum Payload {
    /// Plain text message
    Text(String),
    /// Structured value, rendered to its JSON representation
    Structured(Value),
    /// Sequence of values, joined with single spaces
    List(Vec<Value>),
    /// Error carried as the message itself
    Error(ErrorPayload),
}

impl From<String> for Payload {
    fn from(s: String) -> Self {
        Payload::Text(s)
    }
}

impl From<&str> for Payload {
    fn from(s: &str) -> Self {
        Payload::Text(s.to_string())
    }
}

impl From<Value> for Payload {
    fn from(v: Value) -> Self {
        Payload::Structured(v)
    }
}

impl From<Vec<Value>> for Payload {
    fn from(v: Vec<Value>) -> Self {
        Payload::List(v)
    }
}

impl From<ErrorPayload> for Payload {
    fn from(e: ErrorPayload) -> Self {
        Payload::Error(e)
    }
}

/// Error-like value captured as a log payload
///
/// Never re-thrown by the pipeline; always normalized into the event's
/// `exception` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorPayload {
    pub message: String,
    pub code: Option<String>,
    /// Raw stack text, decomposed into trimmed lines during normalization
    pub stack: Option<String>,
}

impl ErrorPayload {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
            stack: None,
        }
    }

    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    #[must_use]
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    /// Capture any std error as a payload
    pub fn from_error(err: &dyn std::error::Error) -> Self {
        Self::new(err.to_string())
    }
}

/// The context argument of a log call
#[derive(Debug, Clone)]
pub enum CallContext {
    /// Contextual fields layered over the logger's inherited context
    Fields(Fields),
    /// The caller passed only an error; it becomes the exception source
    Error(ErrorPayload),
}

impl From<Fields> for CallContext {
    fn from(f: Fields) -> Self {
        CallContext::Fields(f)
    }
}

impl From<ErrorPayload> for CallContext {
    fn from(e: ErrorPayload) -> Self {
        CallContext::Error(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_from_text() {
        let p: Payload = "hello".into();
        assert!(matches!(p, Payload::Text(ref s) if s == "hello"));
    }

    #[test]
    fn test_error_payload_builder() {
        let e = ErrorPayload::new("boom")
            .with_code("E42")
            .with_stack("at main\nat start");
        assert_eq!(e.message, "boom");
        assert_eq!(e.code.as_deref(), Some("E42"));
        assert!(e.stack.as_deref().unwrap().contains("at main"));
    }

    #[test]
    fn test_from_std_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let e = ErrorPayload::from_error(&io);
        assert_eq!(e.message, "gone");
        assert!(e.stack.is_none());
    }
}
