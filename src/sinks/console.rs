//! Console sink implementation
//!
//! Reference adapter for the [`Sink`](crate::core::Sink) contract: formats a
//! whole batch into one buffer per output stream and performs a single write
//! for each, routing error-severity events to stderr.

use crate::core::{Event, Result, Severity, Sink, TimestampFormat};
use colored::Colorize;
use std::io::Write;

/// Output style for the console sink
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConsoleFormat {
    /// Human-readable text lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

pub struct ConsoleSink {
    use_colors: bool,
    timestamp_format: TimestampFormat,
    format: ConsoleFormat,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self {
            use_colors: true,
            timestamp_format: TimestampFormat::default(),
            format: ConsoleFormat::default(),
        }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self {
            use_colors,
            ..Self::new()
        }
    }

    /// Set the output format for this sink
    #[must_use]
    pub fn with_format(mut self, format: ConsoleFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the timestamp format for this sink
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    fn format_event(&self, event: &Event) -> Result<String> {
        match self.format {
            ConsoleFormat::Text => Ok(self.format_text(event)),
            ConsoleFormat::Json => Ok(serde_json::to_string(event)?),
        }
    }

    /// Format as text with optional colors
    fn format_text(&self, event: &Event) -> String {
        let severity_str = if self.use_colors {
            format!("{:9}", event.severity.to_str())
                .color(event.severity.color_code())
                .to_string()
        } else {
            format!("{:9}", event.severity.to_str())
        };

        let mut line = format!(
            "[{}] [{}] {}",
            self.timestamp_format.format(&event.timestamp),
            severity_str,
            event.message
        );

        if !event.fields.is_empty() {
            line.push(' ');
            line.push_str(&event.fields.format_fields());
        }

        if let Some(ref exc) = event.exception {
            for frame in &exc.stack {
                line.push_str("\n    ");
                line.push_str(frame);
            }
        }

        line
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for ConsoleSink {
    fn write(&self, batch: &[Event]) -> Result<()> {
        let mut out = String::new();
        let mut err = String::new();

        for event in batch {
            let target = match event.severity {
                Severity::Error | Severity::Exception => &mut err,
                _ => &mut out,
            };
            target.push_str(&self.format_event(event)?);
            target.push('\n');
        }

        if !out.is_empty() {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(out.as_bytes())?;
            handle.flush()?;
        }
        if !err.is_empty() {
            let stderr = std::io::stderr();
            let mut handle = stderr.lock();
            handle.write_all(err.as_bytes())?;
            handle.flush()?;
        }

        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ErrorPayload, ExceptionInfo, Fields};
    use chrono::Utc;

    fn event(severity: Severity, message: &str) -> Event {
        Event {
            severity,
            level: 0,
            message: message.into(),
            fields: Fields::new(),
            timestamp: Utc::now(),
            exception: None,
            directives: Fields::new(),
        }
    }

    #[test]
    fn test_text_format_contains_severity_and_message() {
        let sink = ConsoleSink::with_colors(false);
        let line = sink.format_event(&event(Severity::Info, "server started")).unwrap();
        assert!(line.contains("INFO"));
        assert!(line.contains("server started"));
    }

    #[test]
    fn test_text_format_appends_fields() {
        let sink = ConsoleSink::with_colors(false);
        let mut e = event(Severity::Debug, "query done");
        e.fields = Fields::new().with_field("rows", 12);
        let line = sink.format_event(&e).unwrap();
        assert!(line.contains("rows=12"));
    }

    #[test]
    fn test_text_format_indents_stack_frames() {
        let sink = ConsoleSink::with_colors(false);
        let mut e = event(Severity::Exception, "boom");
        e.exception = Some(ExceptionInfo::from_payload(
            &ErrorPayload::new("boom").with_stack("at main\nat start"),
        ));
        let line = sink.format_event(&e).unwrap();
        assert!(line.contains("\n    at main"));
        assert!(line.contains("\n    at start"));
    }

    #[test]
    fn test_json_format_is_parseable() {
        let sink = ConsoleSink::with_colors(false).with_format(ConsoleFormat::Json);
        let line = sink.format_event(&event(Severity::Error, "bad")).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["severity"], "error");
        assert_eq!(parsed["message"], "bad");
    }
}
