//! Logger nodes and the pipeline entry points
//!
//! A `Logger` is one node in a context tree. All nodes derived from the same
//! root share the root's filter specification and batch scheduler; each node
//! owns its effective context (ancestor chain merged root-first) and a
//! copy-on-derive list of sinks.

use super::dispatch::Scheduler;
use super::event::Event;
use super::fields::Fields;
use super::filter::FilterSpec;
use super::normalize::normalize;
use super::payload::{CallContext, ErrorPayload, Payload};
use super::severity::Severity;
use super::sink::Sink;
use parking_lot::RwLock;
use std::sync::Arc;

/// Root-owned state shared by every node of a logger tree
struct RootState {
    /// Authoritative filter specification
    filter: RwLock<FilterSpec>,
    scheduler: Scheduler,
}

/// One node of the logger tree
///
/// Cloning a `Logger` yields another handle to the same node; use
/// [`Logger::derive`] to create a child with additional context.
///
/// # Example
///
/// ```
/// use sievelog::prelude::*;
///
/// let sink = MemorySink::new();
/// let logger = Logger::builder()
///     .global_level(0)
///     .sink(sink.clone())
///     .build();
///
/// logger.info("service started");
/// logger.flush();
/// assert_eq!(sink.events().len(), 1);
/// ```
#[derive(Clone)]
pub struct Logger {
    root: Arc<RootState>,
    /// Effective context: root-to-node chain merged, most specific last
    context: Fields,
    sinks: Vec<Arc<dyn Sink>>,
    synchronous: bool,
}

impl Logger {
    /// Create a root logger with default configuration
    ///
    /// Global level 0, no filter rules, no sinks, deferred flushing.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a builder for a root logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Derive a child node layering `additional` context over this node's
    ///
    /// The child shares the root's filter and batch buffer, and starts with
    /// a copy of this node's sink list taken now: sinks added to this node
    /// afterward do not propagate to the child. The child never mutates an
    /// ancestor's context.
    #[must_use]
    pub fn derive(&self, additional: Fields) -> Logger {
        Logger {
            root: Arc::clone(&self.root),
            context: self.context.merged_with(&additional),
            sinks: self.sinks.clone(),
            synchronous: self.synchronous,
        }
    }

    /// Append a sink to this node's list
    ///
    /// Append-only: sinks cannot be removed for the node's lifetime.
    pub fn add_sink(&mut self, sink: Arc<dyn Sink>) {
        self.sinks.push(sink);
    }

    /// Replace the tree's filter specification (root-authoritative)
    pub fn set_filter(&self, filter: FilterSpec) {
        *self.root.filter.write() = filter;
    }

    /// Snapshot of the tree's filter specification
    pub fn filter(&self) -> FilterSpec {
        self.root.filter.read().clone()
    }

    /// This node's effective context
    pub fn context(&self) -> &Fields {
        &self.context
    }

    /// Full-form entry point: normalize, filter, and buffer one call
    ///
    /// Runs synchronously on the calling thread. Rejected events are dropped
    /// with no observable effect. Accepted events join the shared pending
    /// batch; a synchronous node flushes inline before returning, otherwise
    /// the first submission since the last flush marks a flush as pending
    /// and later submissions coalesce into the same batch until the host
    /// calls [`Logger::flush`].
    pub fn dispatch(
        &self,
        severity: Severity,
        payload: Payload,
        context: Option<CallContext>,
        directives: Fields,
    ) {
        let event = normalize(severity, payload, &self.context, context, directives);
        self.submit(event);
    }

    /// Submit an already-normalized event
    pub fn submit(&self, event: Event) {
        if !self.root.filter.read().should_emit(&event) {
            return;
        }

        self.root.scheduler.enqueue(event, self.sinks.clone());

        if self.synchronous {
            self.root.scheduler.flush();
        }
    }

    /// Deliver the pending batch to sinks
    ///
    /// Detaches the whole buffer before any sink runs and clears the
    /// pending-flush mark. A no-op when nothing is buffered.
    pub fn flush(&self) {
        self.root.scheduler.flush();
    }

    /// Whether a flush is pending ("flush on idle" signal for the host)
    pub fn flush_pending(&self) -> bool {
        self.root.scheduler.flush_pending()
    }

    /// Number of accepted events awaiting flush
    pub fn pending_len(&self) -> usize {
        self.root.scheduler.pending_len()
    }

    #[inline]
    pub fn debug(&self, payload: impl Into<Payload>) {
        self.dispatch(Severity::Debug, payload.into(), None, Fields::new());
    }

    #[inline]
    pub fn info(&self, payload: impl Into<Payload>) {
        self.dispatch(Severity::Info, payload.into(), None, Fields::new());
    }

    #[inline]
    pub fn trace(&self, payload: impl Into<Payload>) {
        self.dispatch(Severity::Trace, payload.into(), None, Fields::new());
    }

    #[inline]
    pub fn error(&self, payload: impl Into<Payload>) {
        self.dispatch(Severity::Error, payload.into(), None, Fields::new());
    }

    /// Log an error-like value as an exception event
    pub fn exception(&self, error: ErrorPayload) {
        self.dispatch(
            Severity::Exception,
            Payload::Error(error),
            None,
            Fields::new(),
        );
    }

    /// Log with per-call context fields
    pub fn log_with(&self, severity: Severity, payload: impl Into<Payload>, fields: Fields) {
        self.dispatch(
            severity,
            payload.into(),
            Some(CallContext::Fields(fields)),
            Fields::new(),
        );
    }

    /// Helper for structured info logging
    pub fn info_with(&self, payload: impl Into<Payload>, fields: Fields) {
        self.log_with(Severity::Info, payload, fields);
    }

    /// Helper for structured error logging
    pub fn error_with(&self, payload: impl Into<Payload>, fields: Fields) {
        self.log_with(Severity::Error, payload, fields);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing a root `Logger` with a fluent API
///
/// # Example
///
/// ```
/// use sievelog::prelude::*;
///
/// let logger = Logger::builder()
///     .global_level(2)
///     .filter_text("source=aws:4,web:-1")
///     .unwrap()
///     .context(Fields::new().with_field("service", "api"))
///     .build();
/// # let _ = logger;
/// ```
pub struct LoggerBuilder {
    filter: FilterSpec,
    sinks: Vec<Arc<dyn Sink>>,
    context: Fields,
    synchronous: bool,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self {
            filter: FilterSpec::default(),
            sinks: Vec::new(),
            context: Fields::new(),
            synchronous: false,
        }
    }

    /// Set the global verbosity cutoff
    #[must_use = "builder methods return a new value"]
    pub fn global_level(mut self, level: i64) -> Self {
        self.filter.global_level = level;
        self
    }

    /// Replace the whole filter specification, including its global level
    #[must_use = "builder methods return a new value"]
    pub fn filter(mut self, filter: FilterSpec) -> Self {
        self.filter = filter;
        self
    }

    /// Parse filter rules from the compact textual grammar
    ///
    /// Keeps the currently configured global level. A malformed clause is a
    /// configuration error surfaced here, at setup time.
    pub fn filter_text(mut self, text: &str) -> super::error::Result<Self> {
        let parsed = FilterSpec::parse(text)?;
        self.filter.rules = parsed.rules;
        Ok(self)
    }

    /// Add a sink
    #[must_use = "builder methods return a new value"]
    pub fn sink<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.sinks.push(Arc::new(sink));
        self
    }

    /// Add an already-shared sink
    #[must_use = "builder methods return a new value"]
    pub fn shared_sink(mut self, sink: Arc<dyn Sink>) -> Self {
        self.sinks.push(sink);
        self
    }

    /// Set the root node's own context fields
    #[must_use = "builder methods return a new value"]
    pub fn context(mut self, context: Fields) -> Self {
        self.context = context;
        self
    }

    /// Flush inline on every submission instead of deferring
    ///
    /// For nodes attached only to immediate-output sinks.
    #[must_use = "builder methods return a new value"]
    pub fn synchronous(mut self, synchronous: bool) -> Self {
        self.synchronous = synchronous;
        self
    }

    /// Build the root logger
    pub fn build(self) -> Logger {
        Logger {
            root: Arc::new(RootState {
                filter: RwLock::new(self.filter),
                scheduler: Scheduler::new(),
            }),
            context: self.context,
            sinks: self.sinks,
            synchronous: self.synchronous,
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
