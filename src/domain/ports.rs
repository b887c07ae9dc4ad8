use super::crew::CrewMember;
use super::money::Money;
use super::wallet::Wallet;
use async_trait::async_trait;
use std::io;

/// Store boundary for the single party wallet.
///
/// Ports speak `io::Result` so the engine can classify a failure by which
/// call produced it (read vs. write) when mapping into `LedgerError`.
#[async_trait]
pub trait WalletStore: Send + Sync {
    /// Fetches the singleton wallet row, if one exists.
    async fn read_wallet(&self) -> io::Result<Option<Wallet>>;
    /// Persists new denomination fields for the wallet with that id.
    async fn write_wallet(&self, id: u64, funds: &Money) -> io::Result<()>;
}

/// Store boundary for crew rows.
#[async_trait]
pub trait CrewStore: Send + Sync {
    async fn read_crew(&self) -> io::Result<Vec<CrewMember>>;
    async fn get_crew(&self, id: u64) -> io::Result<Option<CrewMember>>;
    /// Persists the hired flag for the crew member with that id.
    async fn write_hired_flag(&self, id: u64, hired: bool) -> io::Result<()>;
}

pub type WalletStoreBox = Box<dyn WalletStore>;
pub type CrewStoreBox = Box<dyn CrewStore>;
