//! In-memory capture sink
//!
//! Records every delivered batch. Useful for tests and for embedding hosts
//! that want to inspect the side channel (directives) after a flush. Clones
//! share the same buffer, so a handle kept by the test observes batches
//! delivered through the logger.

use crate::core::{Event, Result, Sink};
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Clone, Default)]
pub struct MemorySink {
    batches: Arc<Mutex<Vec<Vec<Event>>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All delivered batches, in delivery order
    pub fn batches(&self) -> Vec<Vec<Event>> {
        self.batches.lock().clone()
    }

    /// All delivered events, flattened in delivery order
    pub fn events(&self) -> Vec<Event> {
        self.batches.lock().iter().flatten().cloned().collect()
    }

    /// Number of `write` calls received
    pub fn batch_count(&self) -> usize {
        self.batches.lock().len()
    }

    pub fn clear(&self) {
        self.batches.lock().clear();
    }
}

impl Sink for MemorySink {
    fn write(&self, batch: &[Event]) -> Result<()> {
        self.batches.lock().push(batch.to_vec());
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
