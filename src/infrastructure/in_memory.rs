use crate::domain::crew::CrewMember;
use crate::domain::money::Money;
use crate::domain::ports::{CrewStore, WalletStore};
use crate::domain::wallet::Wallet;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::io;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory wallet store.
///
/// Holds the singleton wallet row behind `Arc<RwLock<..>>`; `Clone` shares
/// the underlying state. Ideal for tests and the CSV driver, where the
/// roster lives only for one run.
#[derive(Default, Clone)]
pub struct InMemoryWalletStore {
    wallet: Arc<RwLock<Option<Wallet>>>,
}

impl InMemoryWalletStore {
    /// Creates a store with no wallet row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with the given wallet.
    pub fn with_wallet(wallet: Wallet) -> Self {
        Self {
            wallet: Arc::new(RwLock::new(Some(wallet))),
        }
    }
}

#[async_trait]
impl WalletStore for InMemoryWalletStore {
    async fn read_wallet(&self) -> io::Result<Option<Wallet>> {
        let wallet = self.wallet.read().await;
        Ok(wallet.clone())
    }

    async fn write_wallet(&self, id: u64, funds: &Money) -> io::Result<()> {
        let mut wallet = self.wallet.write().await;
        match wallet.as_mut() {
            Some(row) if row.id == id => {
                row.funds = *funds;
                Ok(())
            }
            _ => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no wallet row with id {id}"),
            )),
        }
    }
}

/// A thread-safe in-memory crew store.
///
/// `BTreeMap` keeps `read_crew` output in stable id order, which the CSV
/// report relies on.
#[derive(Default, Clone)]
pub struct InMemoryCrewStore {
    members: Arc<RwLock<BTreeMap<u64, CrewMember>>>,
}

impl InMemoryCrewStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with the given rows. On duplicate ids the
    /// first row wins; callers validating input should reject duplicates
    /// before seeding.
    pub fn with_members(members: Vec<CrewMember>) -> Self {
        let mut map = BTreeMap::new();
        for member in members {
            map.entry(member.id).or_insert(member);
        }
        Self {
            members: Arc::new(RwLock::new(map)),
        }
    }

    /// Inserts or replaces a crew row.
    pub async fn insert(&self, member: CrewMember) {
        let mut members = self.members.write().await;
        members.insert(member.id, member);
    }
}

#[async_trait]
impl CrewStore for InMemoryCrewStore {
    async fn read_crew(&self) -> io::Result<Vec<CrewMember>> {
        let members = self.members.read().await;
        Ok(members.values().cloned().collect())
    }

    async fn get_crew(&self, id: u64) -> io::Result<Option<CrewMember>> {
        let members = self.members.read().await;
        Ok(members.get(&id).cloned())
    }

    async fn write_hired_flag(&self, id: u64, hired: bool) -> io::Result<()> {
        let mut members = self.members.write().await;
        match members.get_mut(&id) {
            Some(row) => {
                row.status = hired.into();
                Ok(())
            }
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no crew row with id {id}"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::crew::HireStatus;

    fn member(id: u64) -> CrewMember {
        CrewMember {
            id,
            name: format!("crew-{id}"),
            cost: Money::new(0, 10, 0),
            image: String::new(),
            status: HireStatus::Available,
            description: String::new(),
            class: String::new(),
            level_range: String::new(),
        }
    }

    #[tokio::test]
    async fn test_wallet_store_read_write() {
        let store = InMemoryWalletStore::with_wallet(Wallet::new(1, Money::new(2, 0, 0)));

        store.write_wallet(1, &Money::new(1, 50, 0)).await.unwrap();
        let wallet = store.read_wallet().await.unwrap().unwrap();
        assert_eq!(wallet.funds, Money::new(1, 50, 0));
    }

    #[tokio::test]
    async fn test_wallet_store_write_unknown_id() {
        let store = InMemoryWalletStore::with_wallet(Wallet::new(1, Money::ZERO));
        let result = store.write_wallet(2, &Money::ZERO).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_empty_wallet_store() {
        let store = InMemoryWalletStore::new();
        assert!(store.read_wallet().await.unwrap().is_none());
        assert!(store.write_wallet(1, &Money::ZERO).await.is_err());
    }

    #[tokio::test]
    async fn test_crew_store_ordering_and_flag() {
        let store = InMemoryCrewStore::with_members(vec![member(3), member(1), member(2)]);

        let crew = store.read_crew().await.unwrap();
        let ids: Vec<u64> = crew.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        store.write_hired_flag(2, true).await.unwrap();
        assert!(store.get_crew(2).await.unwrap().unwrap().status.is_hired());
        assert!(!store.get_crew(1).await.unwrap().unwrap().status.is_hired());
    }

    #[tokio::test]
    async fn test_crew_store_duplicate_ids_first_wins() {
        let mut renamed = member(1);
        renamed.name = "imposter".to_string();
        let store = InMemoryCrewStore::with_members(vec![member(1), renamed]);

        let crew = store.read_crew().await.unwrap();
        assert_eq!(crew.len(), 1);
        assert_eq!(crew[0].name, "crew-1");
    }

    #[tokio::test]
    async fn test_crew_store_unknown_member() {
        let store = InMemoryCrewStore::new();
        assert!(store.get_crew(9).await.unwrap().is_none());
        assert!(store.write_hired_flag(9, true).await.is_err());
    }
}
