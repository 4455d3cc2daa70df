//! redb-backed client state storage
//!
//! The durable substrate behind both state containers. Everything the
//! client persists (table session fields, cart contents, auth token,
//! order history) lives in one string table under disjoint keys, so a
//! process restart restores exactly what a browser reload would.
//!
//! | Key | Written by | Value |
//! |-----|------------|-------|
//! | `saltbee-table-number`   | session container | table id string |
//! | `saltbee-order-type`     | session container | "dine-in" / "takeaway" |
//! | `saltbee-checkout-locked`| session container | "true" / "false" |
//! | `saltbee-session-token`  | session container | backend session token |
//! | `saltbee-customer-id`    | session container | customer id |
//! | `saltbee-cart`           | cart container    | JSON cart lines |
//! | `saltbee-active-orders`  | order history     | JSON record list |
//! | `saltbee-auth-token`     | auth manager      | bearer token |
//! | `hasUsedGoogleAuth`      | auth manager      | "true" once used |
//! | `qr-scan-success`        | scan coordinator  | table id, one-shot |

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Single state table: key = namespaced state key, value = serialized value
const STATE_TABLE: TableDefinition<&str, &str> = TableDefinition::new("client_state");

/// Storage keys written by the state containers
pub mod keys {
    pub const TABLE_NUMBER: &str = "saltbee-table-number";
    pub const ORDER_TYPE: &str = "saltbee-order-type";
    pub const CHECKOUT_LOCKED: &str = "saltbee-checkout-locked";
    pub const ACTIVE_ORDERS: &str = "saltbee-active-orders";
    pub const SESSION_TOKEN: &str = "saltbee-session-token";
    pub const CUSTOMER_ID: &str = "saltbee-customer-id";
    pub const AUTH_TOKEN: &str = "saltbee-auth-token";
    pub const CART: &str = "saltbee-cart";
    pub const GOOGLE_AUTH_USED: &str = "hasUsedGoogleAuth";
    pub const QR_SCAN_SUCCESS: &str = "qr-scan-success";
}

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Key/value persistence port for the state containers
///
/// Containers write through on every mutation. `put` replaces any
/// previous value; `remove` of a missing key is a no-op. Tests inject an
/// in-memory implementation instead of touching disk.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    fn put(&self, key: &str, value: &str) -> StorageResult<()>;
    fn remove(&self, key: &str) -> StorageResult<()>;

    /// Consume a one-shot flag: read it and remove it
    fn take(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self.get(key)?;
        if value.is_some() {
            self.remove(key)?;
        }
        Ok(value)
    }
}

/// Client state storage backed by redb
///
/// redb commits with `Durability::Immediate`, so every write-through is
/// persistent once `put` returns; the database file stays consistent
/// across abrupt shutdowns.
#[derive(Clone)]
pub struct ClientStore {
    db: Arc<Database>,
}

impl ClientStore {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        Self::with_database(db)
    }

    /// Open an in-memory database (tests, demos)
    pub fn open_in_memory() -> StorageResult<Self> {
        let db =
            Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::with_database(db)
    }

    fn with_database(db: Database) -> StorageResult<Self> {
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(STATE_TABLE)?;
        }
        write_txn.commit()?;
        Ok(Self { db: Arc::new(db) })
    }
}

impl KeyValueStore for ClientStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(STATE_TABLE)?;
        Ok(table.get(key)?.map(|guard| guard.value().to_string()))
    }

    fn put(&self, key: &str, value: &str) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(STATE_TABLE)?;
            table.insert(key, value)?;
        }
        txn.commit()?;
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(STATE_TABLE)?;
            table.remove(key)?;
        }
        txn.commit()?;
        Ok(())
    }

    /// Read and remove in a single transaction
    fn take(&self, key: &str) -> StorageResult<Option<String>> {
        let txn = self.db.begin_write()?;
        let value = {
            let mut table = txn.open_table(STATE_TABLE)?;
            table.remove(key)?.map(|guard| guard.value().to_string())
        };
        txn.commit()?;
        Ok(value)
    }
}

/// Read a key, logging instead of failing; client storage is
/// best-effort and a read error must not take down the session.
pub(crate) fn read_key(store: &dyn KeyValueStore, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(key, error = %err, "failed to read client state");
            None
        }
    }
}

/// Write-through a key; `None` removes it. Failures are logged and the
/// in-memory state stays authoritative until the next write.
pub(crate) fn write_key(store: &dyn KeyValueStore, key: &str, value: Option<&str>) {
    let result = match value {
        Some(v) => store.put(key, v),
        None => store.remove(key),
    };
    if let Err(err) = result {
        tracing::warn!(key, error = %err, "failed to persist client state");
    }
}
