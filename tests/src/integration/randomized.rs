//! # Randomized Multi-Actor Runs
//!
//! Seeded random operation sequences driven through the service and checked
//! step by step against a small reference model.
//!
//! The model tracks balances, allowances, supply, and roles in `u128`, which is
//! wide enough for the amounts generated here. After every step the service
//! result must agree with the model's prediction, and the ledger snapshot
//! must satisfy every invariant.

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::{BTreeSet, HashMap};
    use std::sync::Arc;

    use ledger_types::{Address, Amount};
    use token_ledger::adapters::RecordingPublisher;
    use token_ledger::config::{LedgerConfig, ServiceConfig};
    use token_ledger::domain::errors::ErrorKind;
    use token_ledger::domain::invariants::check_all_invariants;
    use token_ledger::ports::inbound::TokenLedgerApi;
    use token_ledger::service::TokenLedgerService;

    const ACTORS: u8 = 6;
    const CAP: u128 = 10_000;
    const STEPS: usize = 400;

    fn actor(i: u8) -> Address {
        Address::repeat_byte(0xA0 + i)
    }

    fn amount(n: u128) -> Amount {
        Amount::from(n)
    }

    // =============================================================================
    // REFERENCE MODEL
    // =============================================================================

    #[derive(Debug)]
    enum Op {
        Mint { caller: u8, to: u8, amount: u128 },
        Transfer { caller: u8, to: u8, amount: u128 },
        Approve { caller: u8, spender: u8, amount: u128 },
        TransferFrom { caller: u8, owner: u8, to: u8, amount: u128 },
        Grant { caller: u8, target: u8 },
        Revoke { caller: u8, target: u8 },
    }

    impl Op {
        fn random(rng: &mut StdRng) -> Self {
            let mut who = || rng.gen_range(0..ACTORS);
            let (a, b, c) = (who(), who(), who());
            // Small amounts keep most operations valid; zero exercises the
            // amount check.
            let amount = rng.gen_range(0..=CAP / 10);
            match rng.gen_range(0..10) {
                0..=2 => Op::Mint { caller: a, to: b, amount },
                3..=5 => Op::Transfer { caller: a, to: b, amount },
                6 => Op::Approve { caller: a, spender: b, amount },
                7 => Op::TransferFrom { caller: a, owner: b, to: c, amount },
                8 => Op::Grant { caller: a, target: b },
                _ => Op::Revoke { caller: a, target: b },
            }
        }
    }

    /// Expected outcome of an operation under the documented precondition order.
    #[derive(Default)]
    struct Model {
        owner: u8,
        minters: BTreeSet<u8>,
        supply: u128,
        balances: HashMap<u8, u128>,
        allowances: HashMap<(u8, u8), u128>,
    }

    impl Model {
        fn new() -> Self {
            Self {
                owner: 0,
                minters: BTreeSet::from([0]),
                ..Self::default()
            }
        }

        fn balance(&self, id: u8) -> u128 {
            self.balances.get(&id).copied().unwrap_or(0)
        }

        fn apply(&mut self, op: &Op) -> Result<(), ErrorKind> {
            match *op {
                Op::Mint { caller, to, amount } => {
                    if amount == 0 {
                        return Err(ErrorKind::InvalidAmount);
                    }
                    if !self.minters.contains(&caller) {
                        return Err(ErrorKind::NotMinter);
                    }
                    if self.supply + amount > CAP {
                        return Err(ErrorKind::CapExceeded);
                    }
                    self.supply += amount;
                    *self.balances.entry(to).or_default() += amount;
                }
                Op::Transfer { caller, to, amount } => {
                    self.move_balance(caller, to, amount)?;
                }
                Op::Approve {
                    caller,
                    spender,
                    amount,
                } => {
                    self.allowances.insert((caller, spender), amount);
                }
                Op::TransferFrom {
                    caller,
                    owner,
                    to,
                    amount,
                } => {
                    if amount == 0 {
                        return Err(ErrorKind::InvalidAmount);
                    }
                    let allowed = self.allowances.get(&(owner, caller)).copied().unwrap_or(0);
                    if allowed < amount {
                        return Err(ErrorKind::InsufficientAllowance);
                    }
                    self.move_balance(owner, to, amount)?;
                    self.allowances.insert((owner, caller), allowed - amount);
                }
                Op::Grant { caller, target } => {
                    if caller != self.owner {
                        return Err(ErrorKind::NotOwner);
                    }
                    self.minters.insert(target);
                }
                Op::Revoke { caller, target } => {
                    if caller != self.owner {
                        return Err(ErrorKind::NotOwner);
                    }
                    self.minters.remove(&target);
                }
            }
            Ok(())
        }

        fn move_balance(&mut self, from: u8, to: u8, amount: u128) -> Result<(), ErrorKind> {
            if amount == 0 {
                return Err(ErrorKind::InvalidAmount);
            }
            let available = self.balance(from);
            if available < amount {
                return Err(ErrorKind::InsufficientBalance);
            }
            self.balances.insert(from, available - amount);
            *self.balances.entry(to).or_default() += amount;
            Ok(())
        }
    }

    // =============================================================================
    // DRIVER
    // =============================================================================

    fn service() -> TokenLedgerService<RecordingPublisher> {
        let config = ServiceConfig::new(LedgerConfig {
            owner: actor(0),
            cap: amount(CAP),
            ..LedgerConfig::default()
        })
        .with_invariant_checks(true);
        TokenLedgerService::from_config(config, Arc::new(RecordingPublisher::new())).unwrap()
    }

    async fn execute(service: &TokenLedgerService<RecordingPublisher>, op: &Op) -> Result<(), ErrorKind> {
        let result = match *op {
            Op::Mint { caller, to, amount: n } => {
                service.mint(actor(caller), actor(to), amount(n)).await
            }
            Op::Transfer { caller, to, amount: n } => {
                service.transfer(actor(caller), actor(to), amount(n)).await
            }
            Op::Approve {
                caller,
                spender,
                amount: n,
            } => Ok(vec![service.approve(actor(caller), actor(spender), amount(n)).await]),
            Op::TransferFrom {
                caller,
                owner,
                to,
                amount: n,
            } => {
                service
                    .transfer_from(actor(caller), actor(owner), actor(to), amount(n))
                    .await
            }
            Op::Grant { caller, target } => service.grant_minter(actor(caller), actor(target)).await,
            Op::Revoke { caller, target } => {
                service.revoke_minter(actor(caller), actor(target)).await
            }
        };
        result.map(|_| ()).map_err(|e| e.kind())
    }

    async fn run_seed(seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        let service = service();
        let mut model = Model::new();

        for step in 0..STEPS {
            let op = Op::random(&mut rng);
            let before = service.snapshot().await;

            let expected = model.apply(&op);
            let actual = execute(&service, &op).await;
            assert_eq!(actual, expected, "seed {seed} step {step}: {op:?}");

            let after = service.snapshot().await;
            let check = check_all_invariants(&after);
            assert!(check.is_valid(), "seed {seed} step {step}: {check:?}");
            if actual.is_err() {
                assert_eq!(after, before, "seed {seed} step {step}: rejected op mutated state");
            }
        }

        assert_eq!(service.total_supply().await, amount(model.supply));
        for i in 0..ACTORS {
            assert_eq!(service.balance_of(actor(i)).await, amount(model.balance(i)));
            assert_eq!(service.is_minter(actor(i)).await, model.minters.contains(&i));
        }
        assert_eq!(service.stats().await.invariant_violations, 0);
    }

    #[tokio::test]
    async fn test_randomized_runs_match_model() {
        for seed in 0..16 {
            run_seed(seed).await;
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_parallel_transfers_conserve_supply() {
        let service = Arc::new(service());
        for i in 0..ACTORS {
            service.mint(actor(0), actor(i), amount(1_000)).await.unwrap();
        }

        let mut handles = Vec::new();
        for worker in 0..8u64 {
            let service = Arc::clone(&service);
            handles.push(tokio::spawn(async move {
                let mut rng = StdRng::seed_from_u64(1_000 + worker);
                for _ in 0..200 {
                    let from = actor(rng.gen_range(0..ACTORS));
                    let to = actor(rng.gen_range(0..ACTORS));
                    let n = rng.gen_range(1..=300u128);
                    let _ = service.transfer(from, to, amount(n)).await;
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let snapshot = service.snapshot().await;
        assert_eq!(snapshot.total_supply, amount(u128::from(ACTORS) * 1_000));
        assert!(check_all_invariants(&snapshot).is_valid());

        let stats = service.stats().await;
        assert_eq!(
            stats.operations_applied + stats.operations_rejected,
            u64::from(ACTORS) + 8 * 200
        );
    }
}
