//! Sink trait for batch delivery targets

use super::{error::Result, event::Event};

/// Pluggable delivery target for batches of normalized events
///
/// `write` is invoked once per flush with the full ordered batch, never one
/// event at a time, so an implementation may format and join multiple lines
/// into a single I/O call. Sinks are shared across derived loggers, so
/// implementations needing mutable state use interior mutability. Sinks must
/// not suspend the caller indefinitely; long-running targets should perform
/// their own internal queuing.
pub trait Sink: Send + Sync {
    fn write(&self, batch: &[Event]) -> Result<()>;
    fn name(&self) -> &str;
}
