use crate::domain::crew::{CrewMember, HireStatus};
use crate::domain::money::Money;
use crate::domain::ports::{CrewStoreBox, WalletStoreBox};
use crate::domain::wallet::Wallet;
use crate::error::{LedgerError, RejectReason, Result};

/// Snapshots produced by a fully committed transaction.
///
/// Callers replace their local wallet/crew state with these; state is never
/// updated optimistically before both writes have been confirmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionOutcome {
    pub wallet: Wallet,
    pub crew: CrewMember,
}

/// The main entry point for the crew hiring ledger.
///
/// `HiringEngine` owns the storage backends and keeps no state of its own:
/// every call reads fresh snapshots through the ports, applies the pure
/// wallet arithmetic, and issues the two dependent writes (wallet, then
/// hired flag). The store offers no multi-row commit, so a flag write that
/// fails after the wallet write succeeded triggers a compensating wallet
/// write; if that also fails, the persisted state is inconsistent and the
/// caller gets `PartialTransactionFailure`.
pub struct HiringEngine {
    wallet_store: WalletStoreBox,
    crew_store: CrewStoreBox,
}

impl HiringEngine {
    pub fn new(wallet_store: WalletStoreBox, crew_store: CrewStoreBox) -> Self {
        Self {
            wallet_store,
            crew_store,
        }
    }

    /// Fetches the current wallet snapshot.
    pub async fn wallet(&self) -> Result<Wallet> {
        self.wallet_store
            .read_wallet()
            .await
            .map_err(|e| LedgerError::ReadFailure(format!("wallet: {e}")))?
            .ok_or(LedgerError::MissingWallet)
    }

    /// Fetches all crew rows.
    pub async fn roster(&self) -> Result<Vec<CrewMember>> {
        self.crew_store
            .read_crew()
            .await
            .map_err(|e| LedgerError::ReadFailure(format!("crew: {e}")))
    }

    /// Hires a crew member, debiting the wallet by the stored cost.
    ///
    /// Rejected synchronously, before any write, when the member is unknown,
    /// already hired, or unaffordable. Rejections leave all state untouched.
    pub async fn hire(&self, crew_id: u64) -> Result<TransactionOutcome> {
        let mut wallet = self.wallet().await?;
        let mut crew = self.crew_member(crew_id).await?;

        if crew.status.is_hired() {
            return Err(LedgerError::RejectedTransaction(RejectReason::AlreadyHired));
        }
        if !wallet.can_afford(&crew.cost) {
            return Err(LedgerError::RejectedTransaction(
                RejectReason::InsufficientFunds,
            ));
        }

        let funds_before = wallet.funds;
        wallet.debit(&crew.cost)?;

        self.commit(&wallet, &funds_before, crew_id, true).await?;
        crew.status = HireStatus::Hired;
        Ok(TransactionOutcome { wallet, crew })
    }

    /// Releases a hired crew member, refunding exactly the stored cost.
    pub async fn unhire(&self, crew_id: u64) -> Result<TransactionOutcome> {
        let mut wallet = self.wallet().await?;
        let mut crew = self.crew_member(crew_id).await?;

        if !crew.status.is_hired() {
            return Err(LedgerError::RejectedTransaction(RejectReason::NotHired));
        }

        let funds_before = wallet.funds;
        wallet.credit(&crew.cost)?;

        self.commit(&wallet, &funds_before, crew_id, false).await?;
        crew.status = HireStatus::Available;
        Ok(TransactionOutcome { wallet, crew })
    }

    async fn crew_member(&self, crew_id: u64) -> Result<CrewMember> {
        self.crew_store
            .get_crew(crew_id)
            .await
            .map_err(|e| LedgerError::ReadFailure(format!("crew {crew_id}: {e}")))?
            .ok_or(LedgerError::RejectedTransaction(
                RejectReason::UnknownCrewMember,
            ))
    }

    /// Issues the wallet write, then the flag write. Compensates the wallet
    /// when only the flag write fails.
    async fn commit(
        &self,
        wallet: &Wallet,
        funds_before: &Money,
        crew_id: u64,
        hired: bool,
    ) -> Result<()> {
        self.wallet_store
            .write_wallet(wallet.id, &wallet.funds)
            .await
            .map_err(|e| LedgerError::WriteFailure(format!("wallet: {e}")))?;

        if let Err(flag_err) = self.crew_store.write_hired_flag(crew_id, hired).await {
            return match self
                .wallet_store
                .write_wallet(wallet.id, funds_before)
                .await
            {
                // Wallet restored; the transaction failed cleanly.
                Ok(()) => Err(LedgerError::WriteFailure(format!(
                    "hired flag for crew {crew_id}: {flag_err}"
                ))),
                Err(undo_err) => Err(LedgerError::PartialTransactionFailure(format!(
                    "wallet debited but hired flag for crew {crew_id} not written \
                     ({flag_err}); compensating wallet write failed ({undo_err})"
                ))),
            };
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{CrewStore, WalletStore};
    use crate::infrastructure::in_memory::{InMemoryCrewStore, InMemoryWalletStore};
    use async_trait::async_trait;
    use std::io;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    fn member(id: u64, name: &str, cost: Money) -> CrewMember {
        CrewMember {
            id,
            name: name.to_string(),
            cost,
            image: format!("/crew/{name}.png"),
            status: HireStatus::Available,
            description: String::new(),
            class: "Fighter".to_string(),
            level_range: "1-4".to_string(),
        }
    }

    fn engine_with(wallet_funds: Money, crew: Vec<CrewMember>) -> HiringEngine {
        let wallet_store = InMemoryWalletStore::with_wallet(Wallet::new(1, wallet_funds));
        let crew_store = InMemoryCrewStore::with_members(crew);
        HiringEngine::new(Box::new(wallet_store), Box::new(crew_store))
    }

    #[tokio::test]
    async fn test_hire_debits_and_flags() {
        // 1 gold against a 50 silver cost leaves 50 silver.
        let engine = engine_with(
            Money::new(1, 0, 0),
            vec![member(1, "brynn", Money::new(0, 50, 0))],
        );

        let outcome = engine.hire(1).await.unwrap();
        assert_eq!(outcome.wallet.funds, Money::new(0, 50, 0));
        assert_eq!(outcome.crew.status, HireStatus::Hired);

        // Persisted state matches the returned snapshots.
        assert_eq!(engine.wallet().await.unwrap().funds, Money::new(0, 50, 0));
        let roster = engine.roster().await.unwrap();
        assert!(roster[0].status.is_hired());
    }

    #[tokio::test]
    async fn test_hire_rejected_when_unaffordable() {
        let engine = engine_with(
            Money::new(0, 5, 0), // 500 units
            vec![member(1, "brynn", Money::new(0, 6, 0))], // 600 units
        );

        let result = engine.hire(1).await;
        assert!(matches!(
            result,
            Err(LedgerError::RejectedTransaction(
                RejectReason::InsufficientFunds
            ))
        ));

        // Nothing changed.
        assert_eq!(engine.wallet().await.unwrap().funds, Money::new(0, 5, 0));
        assert!(!engine.roster().await.unwrap()[0].status.is_hired());
    }

    #[tokio::test]
    async fn test_hire_rejected_when_already_hired() {
        let mut hired = member(1, "brynn", Money::new(0, 1, 0));
        hired.status = HireStatus::Hired;
        let engine = engine_with(Money::new(1, 0, 0), vec![hired]);

        let result = engine.hire(1).await;
        assert!(matches!(
            result,
            Err(LedgerError::RejectedTransaction(RejectReason::AlreadyHired))
        ));
        assert_eq!(engine.wallet().await.unwrap().funds, Money::new(1, 0, 0));
    }

    #[tokio::test]
    async fn test_hire_unknown_crew_member() {
        let engine = engine_with(Money::new(1, 0, 0), vec![]);
        let result = engine.hire(42).await;
        assert!(matches!(
            result,
            Err(LedgerError::RejectedTransaction(
                RejectReason::UnknownCrewMember
            ))
        ));
    }

    #[tokio::test]
    async fn test_unhire_refunds_stored_cost() {
        let mut hired = member(1, "brynn", Money::new(0, 10, 0));
        hired.status = HireStatus::Hired;
        let engine = engine_with(Money::ZERO, vec![hired]);

        let outcome = engine.unhire(1).await.unwrap();
        assert_eq!(outcome.wallet.funds, Money::new(0, 10, 0));
        assert_eq!(outcome.crew.status, HireStatus::Available);
        assert!(!engine.roster().await.unwrap()[0].status.is_hired());
    }

    #[tokio::test]
    async fn test_unhire_rejected_when_not_hired() {
        let engine = engine_with(
            Money::new(1, 0, 0),
            vec![member(1, "brynn", Money::new(0, 10, 0))],
        );

        let result = engine.unhire(1).await;
        assert!(matches!(
            result,
            Err(LedgerError::RejectedTransaction(RejectReason::NotHired))
        ));
        assert_eq!(engine.wallet().await.unwrap().funds, Money::new(1, 0, 0));
    }

    #[tokio::test]
    async fn test_hire_then_unhire_restores_wallet() {
        let engine = engine_with(
            Money::new(2, 13, 37),
            vec![member(1, "brynn", Money::new(1, 99, 1))],
        );
        let before = engine.wallet().await.unwrap().total();

        engine.hire(1).await.unwrap();
        engine.unhire(1).await.unwrap();

        assert_eq!(engine.wallet().await.unwrap().total(), before);
    }

    #[tokio::test]
    async fn test_sequential_hires_exhaust_wallet() {
        // Combined cost exactly exhausts the wallet; the second hire is
        // evaluated against the post-debit snapshot.
        let engine = engine_with(
            Money::new(1, 0, 0),
            vec![
                member(1, "brynn", Money::new(0, 60, 0)),
                member(2, "kargath", Money::new(0, 40, 0)),
                member(3, "sariel", Money::new(0, 0, 1)),
            ],
        );

        engine.hire(1).await.unwrap();
        engine.hire(2).await.unwrap();
        assert_eq!(engine.wallet().await.unwrap().funds, Money::ZERO);

        let result = engine.hire(3).await;
        assert!(matches!(
            result,
            Err(LedgerError::RejectedTransaction(
                RejectReason::InsufficientFunds
            ))
        ));
    }

    /// Wallet store that can be told to fail writes, for exercising the
    /// compensation path.
    #[derive(Clone)]
    struct FlakyWalletStore {
        inner: InMemoryWalletStore,
        fail_writes: Arc<AtomicBool>,
    }

    #[async_trait]
    impl WalletStore for FlakyWalletStore {
        async fn read_wallet(&self) -> io::Result<Option<Wallet>> {
            self.inner.read_wallet().await
        }

        async fn write_wallet(&self, id: u64, funds: &Money) -> io::Result<()> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(io::Error::other("injected wallet failure"));
            }
            self.inner.write_wallet(id, funds).await
        }
    }

    /// Crew store that always fails flag writes.
    #[derive(Clone)]
    struct BrokenFlagStore {
        inner: InMemoryCrewStore,
    }

    #[async_trait]
    impl CrewStore for BrokenFlagStore {
        async fn read_crew(&self) -> io::Result<Vec<CrewMember>> {
            self.inner.read_crew().await
        }

        async fn get_crew(&self, id: u64) -> io::Result<Option<CrewMember>> {
            self.inner.get_crew(id).await
        }

        async fn write_hired_flag(&self, _id: u64, _hired: bool) -> io::Result<()> {
            Err(io::Error::other("injected flag failure"))
        }
    }

    #[tokio::test]
    async fn test_flag_write_failure_compensates_wallet() {
        let wallet_store = FlakyWalletStore {
            inner: InMemoryWalletStore::with_wallet(Wallet::new(1, Money::new(1, 0, 0))),
            fail_writes: Arc::new(AtomicBool::new(false)),
        };
        let crew_store = BrokenFlagStore {
            inner: InMemoryCrewStore::with_members(vec![member(1, "brynn", Money::new(0, 50, 0))]),
        };
        let wallet_view = wallet_store.clone();
        let engine = HiringEngine::new(Box::new(wallet_store), Box::new(crew_store));

        let result = engine.hire(1).await;
        assert!(matches!(result, Err(LedgerError::WriteFailure(_))));

        // Compensation restored the debited wallet.
        let wallet = wallet_view.read_wallet().await.unwrap().unwrap();
        assert_eq!(wallet.funds, Money::new(1, 0, 0));
    }

    #[tokio::test]
    async fn test_flag_and_compensation_failure_is_partial() {
        let fail_writes = Arc::new(AtomicBool::new(false));
        let wallet_store = FlakyWalletStore {
            inner: InMemoryWalletStore::with_wallet(Wallet::new(1, Money::new(1, 0, 0))),
            fail_writes: fail_writes.clone(),
        };
        let crew_store = BrokenFlagStore {
            inner: InMemoryCrewStore::with_members(vec![member(1, "brynn", Money::new(0, 50, 0))]),
        };

        // First wallet write goes through, then everything fails.
        let crew_view = crew_store.inner.clone();
        let wallet_view = wallet_store.clone();
        let engine = HiringEngine::new(
            Box::new(SecondWriteFails {
                inner: wallet_store,
                armed: fail_writes,
            }),
            Box::new(crew_store),
        );

        let result = engine.hire(1).await;
        assert!(matches!(
            result,
            Err(LedgerError::PartialTransactionFailure(_))
        ));

        // The debit stuck while the flag did not: inconsistent on purpose.
        let wallet = wallet_view.inner.read_wallet().await.unwrap().unwrap();
        assert_eq!(wallet.funds, Money::new(0, 50, 0));
        assert!(!crew_view.get_crew(1).await.unwrap().unwrap().status.is_hired());
    }

    /// Lets the first wallet write through, then arms the inner store to
    /// fail the compensating one.
    struct SecondWriteFails {
        inner: FlakyWalletStore,
        armed: Arc<AtomicBool>,
    }

    #[async_trait]
    impl WalletStore for SecondWriteFails {
        async fn read_wallet(&self) -> io::Result<Option<Wallet>> {
            self.inner.read_wallet().await
        }

        async fn write_wallet(&self, id: u64, funds: &Money) -> io::Result<()> {
            let result = self.inner.write_wallet(id, funds).await;
            self.armed.store(true, Ordering::SeqCst);
            result
        }
    }
}
