//! Batch scheduler
//!
//! Root-owned buffering for accepted events. Submissions append in arrival
//! order; `flush` detaches the whole pending batch before any sink runs, so
//! a sink that logs re-entrantly lands in a fresh buffer instead of the one
//! it is being handed. Delivery failures are isolated per sink and reported
//! to stderr, never propagated to the submitting caller.

use super::event::Event;
use super::sink::Sink;
use parking_lot::Mutex;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub(crate) type SinkList = Vec<Arc<dyn Sink>>;

/// Pending buffer plus the coalescing flag, shared by a whole logger tree
pub(crate) struct Scheduler {
    /// Accepted events with the submitting node's sink list captured at
    /// submission time
    pending: Mutex<Vec<(Event, SinkList)>>,
    flush_scheduled: AtomicBool,
}

impl Scheduler {
    pub(crate) fn new() -> Self {
        Self {
            pending: Mutex::new(Vec::new()),
            flush_scheduled: AtomicBool::new(false),
        }
    }

    /// Append an accepted event, returning true when this submission is the
    /// first since the last flush (i.e. it scheduled the pending flush)
    pub(crate) fn enqueue(&self, event: Event, sinks: SinkList) -> bool {
        let mut pending = self.pending.lock();
        pending.push((event, sinks));
        !self.flush_scheduled.swap(true, Ordering::SeqCst)
    }

    /// Whether a flush has been scheduled and not yet performed
    pub(crate) fn flush_pending(&self) -> bool {
        self.flush_scheduled.load(Ordering::SeqCst)
    }

    pub(crate) fn pending_len(&self) -> usize {
        self.pending.lock().len()
    }

    /// Detach the pending batch and deliver it
    ///
    /// A no-op when nothing is pending: no sink receives an empty batch.
    pub(crate) fn flush(&self) {
        let batch = {
            let mut pending = self.pending.lock();
            self.flush_scheduled.store(false, Ordering::SeqCst);
            std::mem::take(&mut *pending)
        };

        if batch.is_empty() {
            return;
        }

        deliver(&batch);
    }
}

/// Hand the ordered batch to every sink registered at submission time
///
/// Sinks are visited in first-registration order; each receives, in order,
/// the events whose submitting node had it registered. For a single-node
/// tree this is the whole batch to every sink.
fn deliver(batch: &[(Event, SinkList)]) {
    let mut sinks: Vec<Arc<dyn Sink>> = Vec::new();
    for (_, list) in batch {
        for sink in list {
            if !sinks.iter().any(|known| Arc::ptr_eq(known, sink)) {
                sinks.push(Arc::clone(sink));
            }
        }
    }

    for sink in &sinks {
        let events: Vec<Event> = batch
            .iter()
            .filter(|(_, list)| list.iter().any(|s| Arc::ptr_eq(s, sink)))
            .map(|(event, _)| event.clone())
            .collect();

        let result = catch_unwind(AssertUnwindSafe(|| sink.write(&events)));
        match result {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                eprintln!("[SIEVELOG ERROR] sink '{}' failed: {}", sink.name(), e);
            }
            Err(panic_info) => {
                let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                    (*s).to_string()
                } else if let Some(s) = panic_info.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "unknown panic".to_string()
                };
                eprintln!(
                    "[SIEVELOG CRITICAL] sink '{}' panicked: {}. \
                     Remaining sinks still receive the batch.",
                    sink.name(),
                    panic_msg
                );
            }
        }
    }
}
