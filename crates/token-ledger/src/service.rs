//! # Token Ledger Service
//!
//! Async host for [`LedgerCore`] that publishes committed events.
//!
//! ## Concurrency
//!
//! One `tokio::sync::Mutex` guards the whole ledger. Every operation runs its
//! checks, commits, and publishes its events inside that single critical
//! section, so operations are linearizable and subscribers see events in
//! commit order.
//!
//! ## Event Delivery
//!
//! Events are published only after a successful commit. A rejected operation
//! publishes nothing.

use crate::config::{LedgerConfig, ServiceConfig};
use crate::domain::entities::LedgerSnapshot;
use crate::domain::errors::LedgerResult;
use crate::domain::invariants::check_all_invariants;
use crate::domain::ledger::LedgerCore;
use crate::ports::inbound::TokenLedgerApi;
use crate::ports::outbound::EventPublisher;

use async_trait::async_trait;
use ledger_types::{Address, Amount, LedgerEvent};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error, info, instrument, warn};

/// Statistics for the ledger service.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ServiceStats {
    /// Operations committed.
    pub operations_applied: u64,
    /// Operations rejected with an error.
    pub operations_rejected: u64,
    /// Events handed to the publisher.
    pub events_published: u64,
    /// Invariant checks that failed after a commit.
    pub invariant_violations: u64,
}

/// The ledger service.
///
/// Generic over the publisher so the same host runs against the broadcast
/// bus in production and a recorder in tests.
pub struct TokenLedgerService<P: EventPublisher> {
    /// Service configuration.
    config: ServiceConfig,
    /// Ledger state, one critical section per operation.
    core: Mutex<LedgerCore>,
    /// Outbound event port.
    publisher: Arc<P>,
    /// Service statistics.
    stats: RwLock<ServiceStats>,
}

impl<P: EventPublisher> TokenLedgerService<P> {
    /// Create a service over a fresh ledger with default settings.
    ///
    /// Fails with `InvalidCap` if `cap` is zero.
    pub fn new(owner: Address, cap: Amount, publisher: Arc<P>) -> LedgerResult<Self> {
        let ledger = LedgerConfig {
            owner,
            cap,
            ..LedgerConfig::default()
        };
        Self::from_config(ServiceConfig::new(ledger), publisher)
    }

    /// Create a service from configuration.
    pub fn from_config(config: ServiceConfig, publisher: Arc<P>) -> LedgerResult<Self> {
        let core = LedgerCore::new(config.ledger.owner, config.ledger.cap)?;
        info!(
            owner = %config.ledger.owner,
            cap = %config.ledger.cap,
            check_invariants = config.check_invariants,
            "Token ledger service created"
        );
        Ok(Self {
            config,
            core: Mutex::new(core),
            publisher,
            stats: RwLock::new(ServiceStats::default()),
        })
    }

    /// Service configuration.
    #[must_use]
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// The publisher events are delivered to.
    #[must_use]
    pub fn publisher(&self) -> &Arc<P> {
        &self.publisher
    }

    /// Get current service statistics.
    pub async fn stats(&self) -> ServiceStats {
        self.stats.read().await.clone()
    }

    /// Number of accounts holding a non-zero balance.
    pub async fn account_count(&self) -> usize {
        self.core.lock().await.account_count()
    }

    /// Minters in address order.
    pub async fn minters(&self) -> Vec<Address> {
        self.core.lock().await.minters()
    }

    /// Run one fallible operation inside the critical section.
    async fn execute<F>(&self, operation: &'static str, op: F) -> LedgerResult<Vec<LedgerEvent>>
    where
        F: FnOnce(&mut LedgerCore) -> LedgerResult<Vec<LedgerEvent>> + Send,
    {
        let mut core = self.core.lock().await;
        match op(&mut core) {
            Ok(events) => {
                self.after_commit(&core, operation, &events).await;
                Ok(events)
            }
            Err(err) => {
                warn!(operation, error = %err, "Ledger operation rejected");
                self.stats.write().await.operations_rejected += 1;
                Err(err)
            }
        }
    }

    /// Post-commit work. Must be called with the ledger lock held.
    async fn after_commit(&self, core: &LedgerCore, operation: &'static str, events: &[LedgerEvent]) {
        if self.config.check_invariants {
            let check = check_all_invariants(&core.snapshot());
            if !check.is_valid() {
                error!(operation, violations = ?check.violations(), "Ledger invariant violated");
                self.stats.write().await.invariant_violations += 1;
            }
        }

        for event in events {
            let receivers = self.publisher.publish(event.clone()).await;
            debug!(operation, topic = ?event.topic(), receivers, "Event published");
        }

        let mut stats = self.stats.write().await;
        stats.operations_applied += 1;
        stats.events_published += events.len() as u64;
    }
}

#[async_trait]
impl<P: EventPublisher> TokenLedgerApi for TokenLedgerService<P> {
    async fn balance_of(&self, account: Address) -> Amount {
        self.core.lock().await.balance_of(&account)
    }

    async fn total_supply(&self) -> Amount {
        self.core.lock().await.total_supply()
    }

    async fn cap(&self) -> Amount {
        self.core.lock().await.cap()
    }

    async fn is_minter(&self, account: Address) -> bool {
        self.core.lock().await.is_minter(&account)
    }

    async fn owner(&self) -> Address {
        self.core.lock().await.owner()
    }

    async fn allowance(&self, owner: Address, spender: Address) -> Amount {
        self.core.lock().await.allowance(&owner, &spender)
    }

    async fn snapshot(&self) -> LedgerSnapshot {
        self.core.lock().await.snapshot()
    }

    #[instrument(skip(self))]
    async fn mint(
        &self,
        caller: Address,
        recipient: Address,
        amount: Amount,
    ) -> LedgerResult<Vec<LedgerEvent>> {
        self.execute("mint", |core| core.mint(&caller, recipient, amount))
            .await
    }

    #[instrument(skip(self))]
    async fn transfer(
        &self,
        caller: Address,
        recipient: Address,
        amount: Amount,
    ) -> LedgerResult<Vec<LedgerEvent>> {
        self.execute("transfer", |core| core.transfer(&caller, recipient, amount))
            .await
    }

    #[instrument(skip(self))]
    async fn approve(&self, caller: Address, spender: Address, amount: Amount) -> LedgerEvent {
        let mut core = self.core.lock().await;
        let event = core.approve(&caller, spender, amount);
        self.after_commit(&core, "approve", std::slice::from_ref(&event))
            .await;
        event
    }

    #[instrument(skip(self))]
    async fn transfer_from(
        &self,
        caller: Address,
        owner: Address,
        recipient: Address,
        amount: Amount,
    ) -> LedgerResult<Vec<LedgerEvent>> {
        self.execute("transfer_from", |core| {
            core.transfer_from(&caller, owner, recipient, amount)
        })
        .await
    }

    #[instrument(skip(self))]
    async fn increase_allowance(
        &self,
        caller: Address,
        spender: Address,
        added: Amount,
    ) -> LedgerResult<Vec<LedgerEvent>> {
        self.execute("increase_allowance", |core| {
            core.increase_allowance(&caller, spender, added)
        })
        .await
    }

    #[instrument(skip(self))]
    async fn decrease_allowance(
        &self,
        caller: Address,
        spender: Address,
        subtracted: Amount,
    ) -> LedgerResult<Vec<LedgerEvent>> {
        self.execute("decrease_allowance", |core| {
            core.decrease_allowance(&caller, spender, subtracted)
        })
        .await
    }

    #[instrument(skip(self))]
    async fn grant_minter(
        &self,
        caller: Address,
        target: Address,
    ) -> LedgerResult<Vec<LedgerEvent>> {
        self.execute("grant_minter", |core| core.grant_minter(&caller, target))
            .await
    }

    #[instrument(skip(self))]
    async fn revoke_minter(
        &self,
        caller: Address,
        target: Address,
    ) -> LedgerResult<Vec<LedgerEvent>> {
        self.execute("revoke_minter", |core| core.revoke_minter(&caller, target))
            .await
    }

    #[instrument(skip(self))]
    async fn transfer_ownership(
        &self,
        caller: Address,
        new_owner: Address,
    ) -> LedgerResult<Vec<LedgerEvent>> {
        self.execute("transfer_ownership", |core| {
            core.transfer_ownership(&caller, new_owner)
        })
        .await
    }
}
