//! # Event Sink Module
//!
//! Seam between the engine and whatever audit trail the orchestration
//! layer wires in. The engine emits one event per committed mutation,
//! after the commit; a sink must never fail the operation it records.

use paystream_core::StreamEvent;
use std::sync::Mutex;

/// Receives one event per committed mutation.
pub trait EventSink: Send + Sync {
    fn record(&self, event: &StreamEvent);
}

/// Discards everything. The default when no audit trail is configured.
pub struct NullSink;

impl EventSink for NullSink {
    fn record(&self, _event: &StreamEvent) {}
}

/// Buffers events in memory, for tests and short-lived tooling.
pub struct MemorySink {
    events: Mutex<Vec<StreamEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    pub fn snapshot(&self) -> Vec<StreamEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for MemorySink {
    fn record(&self, event: &StreamEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}
