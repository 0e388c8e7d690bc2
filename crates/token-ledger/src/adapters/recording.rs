//! # Recording Publisher
//!
//! An [`EventPublisher`] that appends every event to an in-memory log.
//! Used by embedders that poll for events instead of subscribing, and by tests
//! asserting exact emission order.

use crate::ports::outbound::EventPublisher;
use async_trait::async_trait;
use ledger_types::LedgerEvent;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Publisher that records events in emission order.
#[derive(Debug, Default)]
pub struct RecordingPublisher {
    events: Mutex<Vec<LedgerEvent>>,
    /// Lifetime count, unaffected by `take`.
    published: AtomicU64,
}

impl RecordingPublisher {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every event recorded so far.
    #[must_use]
    pub fn events(&self) -> Vec<LedgerEvent> {
        self.events.lock().clone()
    }

    /// Remove and return every recorded event.
    pub fn take(&self) -> Vec<LedgerEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    /// Number of events currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    /// True if nothing has been recorded since the last `take`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

#[async_trait]
impl EventPublisher for RecordingPublisher {
    async fn publish(&self, event: LedgerEvent) -> usize {
        self.events.lock().push(event);
        self.published.fetch_add(1, Ordering::Relaxed);
        1
    }

    fn events_published(&self) -> u64 {
        self.published.load(Ordering::Relaxed)
    }
}
