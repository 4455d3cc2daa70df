//! Local order history
//!
//! Client-only records written at checkout confirmation, used as the
//! fallback display when the authoritative server order is unavailable.
//! [`OrderHistory::view`] is the single place where the precedence
//! between the two representations is decided.

use crate::storage::{KeyValueStore, keys, read_key, write_key};
use shared::order::{LocalOrderRecord, OrderView, ServerOrder};
use std::sync::Arc;

/// Persisted list of client-recorded orders
pub struct OrderHistory {
    store: Arc<dyn KeyValueStore>,
    records: Vec<LocalOrderRecord>,
}

impl OrderHistory {
    /// Create a history, rehydrating persisted records
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        let records = read_key(&*store, keys::ACTIVE_ORDERS)
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default();
        Self { store, records }
    }

    pub fn records(&self) -> &[LocalOrderRecord] {
        &self.records
    }

    /// Append a record written at checkout confirmation
    pub fn push(&mut self, record: LocalOrderRecord) {
        self.records.push(record);
        self.persist();
    }

    /// Drop all records
    pub fn clear(&mut self) {
        self.records.clear();
        self.persist();
    }

    /// What the orders screen should show: the server snapshot when the
    /// session has one, else the local records, else nothing.
    pub fn view(&self, server: Option<&ServerOrder>) -> OrderView {
        OrderView::resolve(server.cloned(), self.records.clone())
    }

    fn persist(&self) {
        match serde_json::to_string(&self.records) {
            Ok(raw) => write_key(&*self.store, keys::ACTIVE_ORDERS, Some(&raw)),
            Err(err) => tracing::warn!(error = %err, "failed to serialize order history"),
        }
    }
}
