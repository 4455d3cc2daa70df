//! Client-side order view
//!
//! One tagged union decides what the orders screen shows, instead of two
//! parallel caches with implicit precedence.

use super::snapshot::{LocalOrderRecord, ServerOrder};

/// What the customer should currently see as "my order"
#[derive(Debug, Clone, PartialEq)]
pub enum OrderView {
    /// Authoritative backend snapshot for the active table session
    Server(ServerOrder),
    /// Client-recorded orders, shown only when no server order exists
    LocalFallback(Vec<LocalOrderRecord>),
    /// Nothing to show yet
    Empty,
}

impl OrderView {
    /// Precedence rule: server order wins, local records are the
    /// fallback, empty otherwise.
    pub fn resolve(server: Option<ServerOrder>, local: Vec<LocalOrderRecord>) -> Self {
        match server {
            Some(order) => OrderView::Server(order),
            None if local.is_empty() => OrderView::Empty,
            None => OrderView::LocalFallback(local),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, OrderView::Empty)
    }
}
