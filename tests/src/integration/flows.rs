//! # Integration Test Flows
//!
//! End-to-end ledger behavior through the service and the event bus.
//!
//! ## Flows Tested:
//!
//! 1. **Issuance**: cap enforcement and minter gating at 18-decimal scale
//! 2. **Delegated spending**: approve, `transfer_from`, allowance exhaustion
//! 3. **Role administration**: grant, mint, revoke, ownership hand-off
//! 4. **Delivery**: subscribers and streams see committed events only, in order
//! 5. **Runtime**: configuration from a lookup, start, log, shutdown

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::timeout;
    use tokio_stream::StreamExt;

    use ledger_bus::{EventFilter, EventPublisher, InMemoryEventBus};
    use ledger_runtime::LedgerRuntime;
    use ledger_types::{Address, Amount, LedgerEvent, LedgerTopic};
    use token_ledger::config::{LedgerConfig, ServiceConfig};
    use token_ledger::domain::entities::LedgerSnapshot;
    use token_ledger::domain::errors::{ErrorKind, LedgerError};
    use token_ledger::domain::invariants::check_all_invariants;
    use token_ledger::ports::inbound::TokenLedgerApi;
    use token_ledger::service::TokenLedgerService;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    const OWNER: Address = Address::repeat_byte(0x11);
    const ADDR1: Address = Address::repeat_byte(0x22);
    const ADDR2: Address = Address::repeat_byte(0x33);

    /// Whole token units at 18 decimals.
    fn units(n: u64) -> Amount {
        Amount::from(n) * Amount::exp10(18)
    }

    fn init_logging() {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter("debug")
            .try_init();
    }

    /// Service with a one-million-unit cap on a fresh bus.
    fn deploy() -> (Arc<InMemoryEventBus>, TokenLedgerService<InMemoryEventBus>) {
        init_logging();
        let bus = Arc::new(InMemoryEventBus::new());
        let config = ServiceConfig::new(LedgerConfig {
            owner: OWNER,
            cap: units(1_000_000),
            ..LedgerConfig::default()
        })
        .with_invariant_checks(true);
        let service = TokenLedgerService::from_config(config, Arc::clone(&bus)).unwrap();
        (bus, service)
    }

    // =============================================================================
    // ISSUANCE
    // =============================================================================

    #[tokio::test]
    async fn test_cap_is_configured() {
        let (_, service) = deploy();
        assert_eq!(service.cap().await, units(1_000_000));
        assert_eq!(service.total_supply().await, Amount::zero());
    }

    #[tokio::test]
    async fn test_mint_tokens() {
        let (_, service) = deploy();
        service.mint(OWNER, ADDR1, units(1000)).await.unwrap();

        assert_eq!(service.balance_of(ADDR1).await, units(1000));
        assert_eq!(service.total_supply().await, units(1000));
    }

    #[tokio::test]
    async fn test_mint_above_cap_rejected() {
        let (bus, service) = deploy();
        let err = service
            .mint(OWNER, ADDR1, units(1_000_001))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::CapExceeded);
        assert_eq!(service.total_supply().await, Amount::zero());
        assert_eq!(bus.events_published(), 0);
    }

    #[tokio::test]
    async fn test_mint_from_non_minter_rejected() {
        let (_, service) = deploy();
        let err = service.mint(ADDR1, ADDR2, units(100)).await.unwrap_err();

        assert_eq!(err, LedgerError::NotMinter { caller: ADDR1 });
        assert_eq!(err.to_string(), "Caller is not a minter");
        assert_eq!(service.balance_of(ADDR2).await, Amount::zero());
    }

    #[tokio::test]
    async fn test_cap_scenario() {
        init_logging();
        let bus = Arc::new(InMemoryEventBus::new());
        let service =
            TokenLedgerService::new(OWNER, Amount::from(1_000_000u64), Arc::clone(&bus)).unwrap();

        service
            .mint(OWNER, ADDR1, Amount::from(1000u64))
            .await
            .unwrap();
        assert_eq!(service.balance_of(ADDR1).await, Amount::from(1000u64));
        assert_eq!(service.total_supply().await, Amount::from(1000u64));

        let result = service.mint(OWNER, ADDR1, Amount::from(999_001u64)).await;
        assert!(matches!(result, Err(LedgerError::CapExceeded { .. })));
        assert_eq!(service.total_supply().await, Amount::from(1000u64));

        let result = service.mint(ADDR1, ADDR2, Amount::from(1u64)).await;
        assert!(matches!(result, Err(LedgerError::NotMinter { .. })));

        // Exactly to the cap is allowed.
        service
            .mint(OWNER, ADDR2, Amount::from(999_000u64))
            .await
            .unwrap();
        assert_eq!(service.total_supply().await, service.cap().await);
        assert!(check_all_invariants(&service.snapshot().await).is_valid());
    }

    // =============================================================================
    // DELEGATED SPENDING
    // =============================================================================

    #[tokio::test]
    async fn test_allowance_flow() {
        let (bus, service) = deploy();
        let mut sub = bus.subscribe(EventFilter::accounts(vec![ADDR1]));

        service.mint(OWNER, ADDR1, units(500)).await.unwrap();
        service.approve(ADDR1, ADDR2, units(300)).await;
        service
            .transfer_from(ADDR2, ADDR1, OWNER, units(200))
            .await
            .unwrap();

        assert_eq!(service.allowance(ADDR1, ADDR2).await, units(100));
        assert_eq!(service.balance_of(ADDR1).await, units(300));
        assert_eq!(service.balance_of(OWNER).await, units(200));

        let before = service.snapshot().await;
        let err = service
            .transfer_from(ADDR2, ADDR1, OWNER, units(101))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            LedgerError::InsufficientAllowance {
                required: units(101),
                available: units(100),
            }
        );
        assert_eq!(service.snapshot().await, before);

        let events = sub.drain().unwrap();
        assert_eq!(
            events,
            vec![
                LedgerEvent::Minted {
                    recipient: ADDR1,
                    amount: units(500)
                },
                LedgerEvent::Approval {
                    owner: ADDR1,
                    spender: ADDR2,
                    amount: units(300)
                },
                LedgerEvent::Transferred {
                    from: ADDR1,
                    to: OWNER,
                    amount: units(200)
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_transfer_beyond_balance_changes_nothing() {
        let (_, service) = deploy();
        service.mint(OWNER, ADDR1, units(10)).await.unwrap();

        let result = service.transfer(ADDR1, ADDR2, units(11)).await;
        assert!(matches!(
            result,
            Err(LedgerError::InsufficientBalance { .. })
        ));
        assert_eq!(service.balance_of(ADDR1).await, units(10));
        assert_eq!(service.balance_of(ADDR2).await, Amount::zero());
    }

    // =============================================================================
    // ROLE ADMINISTRATION
    // =============================================================================

    #[tokio::test]
    async fn test_role_flow() {
        let (bus, service) = deploy();
        let mut roles = bus.subscribe(EventFilter::topics(vec![LedgerTopic::Roles]));

        service.grant_minter(OWNER, ADDR1).await.unwrap();
        // Second grant is a no-op and emits nothing.
        assert!(service.grant_minter(OWNER, ADDR1).await.unwrap().is_empty());

        service.mint(ADDR1, ADDR2, units(5)).await.unwrap();
        service.revoke_minter(OWNER, ADDR1).await.unwrap();
        assert!(service.revoke_minter(OWNER, ADDR2).await.unwrap().is_empty());

        assert!(service.mint(ADDR1, ADDR2, units(5)).await.is_err());
        assert_eq!(service.balance_of(ADDR2).await, units(5));

        service.transfer_ownership(OWNER, ADDR2).await.unwrap();
        assert_eq!(
            service.grant_minter(OWNER, ADDR1).await,
            Err(LedgerError::NotOwner { caller: OWNER })
        );

        let events = roles.drain().unwrap();
        assert_eq!(
            events,
            vec![
                LedgerEvent::MinterGranted { target: ADDR1 },
                LedgerEvent::MinterRevoked { target: ADDR1 },
                LedgerEvent::OwnershipTransferred {
                    previous_owner: OWNER,
                    new_owner: ADDR2
                },
            ]
        );
    }

    // =============================================================================
    // DELIVERY
    // =============================================================================

    #[tokio::test]
    async fn test_event_stream_sees_commit_order() {
        let (bus, service) = deploy();
        let mut stream = bus.event_stream(EventFilter::topics(vec![
            LedgerTopic::Supply,
            LedgerTopic::Transfers,
        ]));

        service.mint(OWNER, ADDR1, units(3)).await.unwrap();
        service.approve(ADDR1, ADDR2, units(1)).await;
        service.transfer(ADDR1, ADDR2, units(2)).await.unwrap();

        let first = timeout(Duration::from_secs(1), stream.next())
            .await
            .expect("Timeout waiting for event")
            .expect("Stream ended");
        let second = timeout(Duration::from_secs(1), stream.next())
            .await
            .expect("Timeout waiting for event")
            .expect("Stream ended");

        assert_eq!(first.topic(), LedgerTopic::Supply);
        assert_eq!(
            second,
            LedgerEvent::Transferred {
                from: ADDR1,
                to: ADDR2,
                amount: units(2)
            }
        );
    }

    #[tokio::test]
    async fn test_bus_events_survive_json_round_trip() {
        let (bus, service) = deploy();
        let mut sub = bus.subscribe(EventFilter::all());

        service.mint(OWNER, ADDR1, units(7)).await.unwrap();
        service.approve(ADDR1, ADDR2, units(7)).await;
        service
            .transfer_from(ADDR2, ADDR1, ADDR2, units(2))
            .await
            .unwrap();
        service.grant_minter(OWNER, ADDR1).await.unwrap();
        service.revoke_minter(OWNER, ADDR1).await.unwrap();
        service.transfer_ownership(OWNER, ADDR2).await.unwrap();

        let events = sub.drain().unwrap();
        assert_eq!(events.len(), 6);

        let json = serde_json::to_string(&events).unwrap();
        let decoded: Vec<LedgerEvent> = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, events);

        let snapshot = service.snapshot().await;
        let decoded: LedgerSnapshot =
            serde_json::from_value(serde_json::to_value(&snapshot).unwrap()).unwrap();
        assert_eq!(decoded, snapshot);
    }

    #[tokio::test]
    async fn test_concurrent_callers_see_consistent_state() {
        let (bus, service) = deploy();
        let service = Arc::new(service);
        service.mint(OWNER, ADDR1, units(100)).await.unwrap();

        let mut handles = Vec::new();
        for i in 0..10u8 {
            let service = Arc::clone(&service);
            handles.push(tokio::spawn(async move {
                service
                    .transfer(ADDR1, Address::repeat_byte(0x40 + i), units(15))
                    .await
            }));
        }

        let mut succeeded = 0u64;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                succeeded += 1;
            }
        }

        // 100 units cover six transfers of 15.
        assert_eq!(succeeded, 6);
        assert_eq!(service.balance_of(ADDR1).await, units(10));
        assert_eq!(bus.events_published(), 1 + succeeded);
        assert!(check_all_invariants(&service.snapshot().await).is_valid());
    }

    // =============================================================================
    // RUNTIME
    // =============================================================================

    #[tokio::test]
    async fn test_runtime_from_lookup() {
        init_logging();
        let ledger = LedgerConfig::from_lookup(|key| match key {
            "LEDGER_OWNER" => Some(format!("0x{}", "11".repeat(20))),
            "LEDGER_CAP" => Some("1000".to_string()),
            _ => None,
        })
        .unwrap();
        ledger.validate_for_production().unwrap();

        let mut runtime = LedgerRuntime::new(ServiceConfig::new(ledger)).unwrap();
        runtime.start();

        let service = runtime.service();
        service
            .mint(OWNER, ADDR1, Amount::from(1000u64))
            .await
            .unwrap();
        assert!(service.mint(OWNER, ADDR1, Amount::one()).await.is_err());

        assert_eq!(runtime.shutdown().await, 1);
    }
}
