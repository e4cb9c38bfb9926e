//! Core pipeline types and traits

pub mod dispatch;
pub mod error;
pub mod event;
pub mod fields;
pub mod filter;
pub mod logger;
pub mod normalize;
pub mod payload;
pub mod severity;
pub mod sink;
pub mod timestamp;

pub use error::{PipelineError, Result};
pub use event::{Event, ExceptionInfo};
pub use fields::{FieldValue, Fields};
pub use filter::{FilterRule, FilterSpec, REJECT_LEVEL, RULE_DEFAULT_LEVEL};
pub use logger::{Logger, LoggerBuilder};
pub use normalize::normalize;
pub use payload::{CallContext, ErrorPayload, Payload};
pub use severity::{Severity, DEFAULT_LEVEL, TRACE_LEVEL};
pub use sink::Sink;
pub use timestamp::TimestampFormat;
