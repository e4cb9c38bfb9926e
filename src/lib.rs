//! # sievelog
//!
//! A structured event-logging pipeline: log calls carrying a payload,
//! contextual fields, and side-effect directives are normalized into
//! canonical event records, matched against a rule-based severity filter,
//! and delivered batched and in submission order to pluggable sinks.
//!
//! ## Features
//!
//! - **Context inheritance**: derived loggers layer fields over their
//!   ancestors while sharing one filter and batch buffer
//! - **Rule-based filtering**: per-field value-to-level overrides refine a
//!   global verbosity cutoff
//! - **Ordered batching**: submissions coalesce into one flush, preserving
//!   FIFO order end to end
//! - **Fire-and-forget**: sink failures are isolated and never surface to
//!   the logging caller

pub mod core;
pub mod hooks;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        CallContext, ErrorPayload, Event, ExceptionInfo, FieldValue, Fields, FilterRule,
        FilterSpec, Logger, LoggerBuilder, Payload, PipelineError, Result, Severity, Sink,
        TimestampFormat,
    };
    #[cfg(feature = "console")]
    pub use crate::sinks::{ConsoleFormat, ConsoleSink};
    pub use crate::sinks::MemorySink;
}

pub use crate::core::{
    CallContext, ErrorPayload, Event, ExceptionInfo, FieldValue, Fields, FilterRule, FilterSpec,
    Logger, LoggerBuilder, Payload, PipelineError, Result, Severity, Sink, TimestampFormat,
};
#[cfg(feature = "console")]
pub use crate::sinks::{ConsoleFormat, ConsoleSink};
pub use crate::sinks::MemorySink;
