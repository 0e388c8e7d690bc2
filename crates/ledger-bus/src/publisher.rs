//! # Event Publisher
//!
//! The outbound side of the bus: the [`EventPublisher`] port and its
//! broadcast-channel implementation.
//!
//! Filtering happens per receiver, so every live subscription counts as a
//! receiver of every event regardless of its filter.

use crate::filter::EventFilter;
use crate::subscriber::{EventStream, Subscription};
use crate::DEFAULT_CHANNEL_CAPACITY;
use async_trait::async_trait;
use ledger_types::LedgerEvent;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::broadcast;
use tracing::{debug, trace};

/// Delivers committed ledger events.
///
/// The ledger service depends on this trait only, so hosts can swap the
/// in-memory bus for a persistent log or a network fan-out.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish one event. Returns how many receivers it reached.
    async fn publish(&self, event: LedgerEvent) -> usize;

    /// Events published over the publisher's lifetime, monotonic.
    fn events_published(&self) -> u64;
}

/// Broadcast bus backed by `tokio::sync::broadcast`.
///
/// A subscriber that falls more than `capacity` events behind loses the
/// oldest ones and sees a lag count instead.
pub struct InMemoryEventBus {
    sender: broadcast::Sender<LedgerEvent>,
    published: AtomicU64,
    capacity: usize,
}

impl InMemoryEventBus {
    /// Bus with [`DEFAULT_CHANNEL_CAPACITY`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Bus buffering up to `capacity` events per subscriber.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. `LedgerConfig::validate` rejects that.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            published: AtomicU64::new(0),
            capacity,
        }
    }

    /// Subscription receiving events published from now on.
    #[must_use]
    pub fn subscribe(&self, filter: EventFilter) -> Subscription {
        debug!(topics = ?filter.topics, accounts = filter.accounts.len(), "Subscribed");
        Subscription::new(self.sender.subscribe(), filter)
    }

    /// Same as [`Self::subscribe`], as a `Stream`.
    #[must_use]
    pub fn event_stream(&self, filter: EventFilter) -> EventStream {
        EventStream::new(self.sender.subscribe(), filter)
    }

    /// Live subscriptions and streams.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Per-subscriber buffer size.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventBus {
    async fn publish(&self, event: LedgerEvent) -> usize {
        let topic = event.topic();
        self.published.fetch_add(1, Ordering::Relaxed);

        // `send` only fails when nobody is subscribed.
        let receivers = self.sender.send(event).unwrap_or(0);
        if receivers == 0 {
            trace!(?topic, "Event dropped, no subscribers");
        } else {
            debug!(?topic, receivers, "Event broadcast");
        }
        receivers
    }

    fn events_published(&self) -> u64 {
        self.published.load(Ordering::Relaxed)
    }
}
