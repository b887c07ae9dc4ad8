use crate::domain::crew::CrewMember;
use crate::domain::money::Money;
use crate::domain::ports::{CrewStore, WalletStore};
use crate::domain::wallet::Wallet;
use async_trait::async_trait;
use rocksdb::{ColumnFamilyDescriptor, DB, Options};
use std::io;
use std::path::Path;
use std::sync::Arc;

/// Column Family for the singleton wallet row.
pub const CF_WALLET: &str = "wallet";
/// Column Family for crew rows.
pub const CF_CREW: &str = "crew";

/// A persistent store implementation using RocksDB.
///
/// Keeps the wallet and crew rows in separate Column Families with
/// serde_json values and big-endian id keys, so crew iteration comes back
/// in id order. This struct is thread-safe (`Clone` shares the underlying
/// `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDbStore {
    db: Arc<DB>,
}

impl RocksDbStore {
    /// Opens or creates a RocksDB instance at the specified path, ensuring
    /// both column families exist.
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_wallet = ColumnFamilyDescriptor::new(CF_WALLET, Options::default());
        let cf_crew = ColumnFamilyDescriptor::new(CF_CREW, Options::default());

        let db = DB::open_cf_descriptors(&opts, path, vec![cf_wallet, cf_crew])
            .map_err(io::Error::other)?;

        Ok(Self { db: Arc::new(db) })
    }

    /// True when no wallet row has been written yet, i.e. a fresh database
    /// that still needs seeding.
    pub fn needs_seeding(&self) -> io::Result<bool> {
        let cf = self.cf(CF_WALLET)?;
        let mut iter = self.db.iterator_cf(cf, rocksdb::IteratorMode::Start);
        match iter.next() {
            Some(Ok(_)) => Ok(false),
            Some(Err(e)) => Err(io::Error::other(e)),
            None => Ok(true),
        }
    }

    /// Writes a full wallet row. Used for seeding; transactions go through
    /// the `WalletStore` port.
    pub fn put_wallet(&self, wallet: &Wallet) -> io::Result<()> {
        let cf = self.cf(CF_WALLET)?;
        let value = encode(wallet)?;
        self.db
            .put_cf(cf, wallet.id.to_be_bytes(), value)
            .map_err(io::Error::other)
    }

    /// Writes a full crew row. Used for seeding.
    pub fn put_crew_member(&self, member: &CrewMember) -> io::Result<()> {
        let cf = self.cf(CF_CREW)?;
        let value = encode(member)?;
        self.db
            .put_cf(cf, member.id.to_be_bytes(), value)
            .map_err(io::Error::other)
    }

    fn cf(&self, name: &str) -> io::Result<&rocksdb::ColumnFamily> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| io::Error::other(format!("{name} column family not found")))
    }
}

fn encode<T: serde::Serialize>(value: &T) -> io::Result<Vec<u8>> {
    serde_json::to_vec(value)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("serialization: {e}")))
}

fn decode<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> io::Result<T> {
    serde_json::from_slice(bytes)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("deserialization: {e}")))
}

#[async_trait]
impl WalletStore for RocksDbStore {
    async fn read_wallet(&self) -> io::Result<Option<Wallet>> {
        let cf = self.cf(CF_WALLET)?;
        let mut iter = self.db.iterator_cf(cf, rocksdb::IteratorMode::Start);
        match iter.next() {
            Some(item) => {
                let (_key, value) = item.map_err(io::Error::other)?;
                Ok(Some(decode(&value)?))
            }
            None => Ok(None),
        }
    }

    async fn write_wallet(&self, id: u64, funds: &Money) -> io::Result<()> {
        let cf = self.cf(CF_WALLET)?;
        let key = id.to_be_bytes();
        let existing = self.db.get_cf(cf, key).map_err(io::Error::other)?;
        let mut wallet: Wallet = match existing {
            Some(bytes) => decode(&bytes)?,
            None => {
                return Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("no wallet row with id {id}"),
                ));
            }
        };

        wallet.funds = *funds;
        self.db
            .put_cf(cf, key, encode(&wallet)?)
            .map_err(io::Error::other)
    }
}

#[async_trait]
impl CrewStore for RocksDbStore {
    async fn read_crew(&self) -> io::Result<Vec<CrewMember>> {
        let cf = self.cf(CF_CREW)?;
        let mut crew = Vec::new();
        for item in self.db.iterator_cf(cf, rocksdb::IteratorMode::Start) {
            let (_key, value) = item.map_err(io::Error::other)?;
            crew.push(decode(&value)?);
        }
        Ok(crew)
    }

    async fn get_crew(&self, id: u64) -> io::Result<Option<CrewMember>> {
        let cf = self.cf(CF_CREW)?;
        match self
            .db
            .get_cf(cf, id.to_be_bytes())
            .map_err(io::Error::other)?
        {
            Some(bytes) => Ok(Some(decode(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn write_hired_flag(&self, id: u64, hired: bool) -> io::Result<()> {
        let cf = self.cf(CF_CREW)?;
        let key = id.to_be_bytes();
        let mut member: CrewMember = match self.db.get_cf(cf, key).map_err(io::Error::other)? {
            Some(bytes) => decode(&bytes)?,
            None => {
                return Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("no crew row with id {id}"),
                ));
            }
        };

        member.status = hired.into();
        self.db
            .put_cf(cf, key, encode(&member)?)
            .map_err(io::Error::other)
    }
}
