//! # Ledger Runtime
//!
//! Wires a [`TokenLedgerService`] to an [`InMemoryEventBus`] and runs a
//! background task that logs every published event as JSON.
//!
//! ## Lifecycle
//!
//! 1. `LedgerRuntime::new` validates configuration and builds the bus and service.
//! 2. `start` subscribes the event logger before returning, so no event
//!    committed afterwards is missed.
//! 3. `shutdown` signals the logger and waits for it to drain.

use anyhow::{Context, Result};
use ledger_bus::{EventFilter, InMemoryEventBus};
use std::sync::Arc;
use token_ledger::config::ServiceConfig;
use token_ledger::service::TokenLedgerService;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_stream::StreamExt;
use tracing::{info, warn};

/// The ledger service type hosted by the runtime.
pub type LedgerService = TokenLedgerService<InMemoryEventBus>;

/// Running ledger host.
pub struct LedgerRuntime {
    bus: Arc<InMemoryEventBus>,
    service: Arc<LedgerService>,
    shutdown_tx: watch::Sender<bool>,
    event_logger: Option<JoinHandle<u64>>,
}

impl LedgerRuntime {
    /// Build the bus and service from validated configuration.
    pub fn new(config: ServiceConfig) -> Result<Self> {
        config
            .ledger
            .validate()
            .context("invalid ledger configuration")?;

        let bus = Arc::new(InMemoryEventBus::with_capacity(
            config.ledger.event_channel_capacity,
        ));
        let service = TokenLedgerService::from_config(config, Arc::clone(&bus))
            .context("failed to construct ledger")?;
        let (shutdown_tx, _) = watch::channel(false);

        Ok(Self {
            bus,
            service: Arc::new(service),
            shutdown_tx,
            event_logger: None,
        })
    }

    /// The hosted service.
    #[must_use]
    pub fn service(&self) -> Arc<LedgerService> {
        Arc::clone(&self.service)
    }

    /// The event bus the service publishes to.
    #[must_use]
    pub fn bus(&self) -> Arc<InMemoryEventBus> {
        Arc::clone(&self.bus)
    }

    /// Start the event logger. Calling it twice has no further effect.
    pub fn start(&mut self) {
        if self.event_logger.is_some() {
            return;
        }

        let mut events = self.bus.event_stream(EventFilter::all());
        let mut shutdown_rx = self.shutdown_tx.subscribe();

        self.event_logger = Some(tokio::spawn(async move {
            let mut logged = 0u64;
            loop {
                tokio::select! {
                    biased;
                    event = events.next() => {
                        let Some(event) = event else { break };
                        match serde_json::to_string(&event) {
                            Ok(json) => info!(target: "ledger_events", event = %json, "Ledger event"),
                            Err(e) => warn!(error = %e, "Failed to encode ledger event"),
                        }
                        logged += 1;
                    }
                    _ = shutdown_rx.changed() => break,
                }
            }
            logged
        }));

        info!(capacity = self.bus.capacity(), "Ledger runtime started");
    }

    /// Stop the event logger. Returns the number of events it logged.
    pub async fn shutdown(mut self) -> u64 {
        // Send only fails when the logger already exited.
        let _ = self.shutdown_tx.send(true);

        let logged = match self.event_logger.take() {
            Some(handle) => handle.await.unwrap_or_else(|e| {
                warn!(error = %e, "Event logger task failed");
                0
            }),
            None => 0,
        };

        let stats = self.service.stats().await;
        info!(
            operations_applied = stats.operations_applied,
            operations_rejected = stats.operations_rejected,
            events_logged = logged,
            "Ledger runtime stopped"
        );
        logged
    }
}
