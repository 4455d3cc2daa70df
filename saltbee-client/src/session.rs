//! Session/order state container
//!
//! Single source of truth for "which table and order type am I operating
//! under" and for the cached backend view of the current order. Every
//! field change is written through to client storage so a reload restores
//! the session exactly.
//!
//! The container performs no autonomous transitions: the scan
//! coordinator, an explicit order-type choice, or a checkout confirmation
//! drive it from outside. The single exception is the one-shot
//! [`SessionContainer::on_session_acquired`] refresh, invoked by
//! [`SessionContainer::begin_session`] after a token is installed.

use crate::error::{ClientError, ClientResult};
use crate::http::OrderingApi;
use crate::storage::{KeyValueStore, keys, read_key, write_key};
use shared::client::{AddOrderItemRequest, StartSessionRequest, StartSessionResponse};
use shared::order::{CartItem, OrderType, ServerOrder};
use std::sync::Arc;
use thiserror::Error;

/// Session lifecycle phase, derived from the container fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No table, no order type
    Uninitialized,
    /// Order type chosen; takeaway needs no table
    TypeSelected,
    /// Table number and session token both present
    SessionActive,
    /// Order confirmed; cart submissions blocked until reset
    CheckoutLocked,
}

/// Batch submission failure: `submitted` lines reached the backend before
/// `source` stopped the run. Items already accepted stay on the server
/// (the backend is the system of record), so callers retry only the
/// remainder.
#[derive(Debug, Error)]
#[error("submitted {submitted} item(s) before failing: {source}")]
pub struct SubmitError {
    pub submitted: usize,
    #[source]
    pub source: ClientError,
}

/// Session/order state container
pub struct SessionContainer {
    api: Arc<dyn OrderingApi>,
    store: Arc<dyn KeyValueStore>,
    table_number: Option<String>,
    order_type: Option<OrderType>,
    session_token: Option<String>,
    customer_id: Option<String>,
    checkout_locked: bool,
    current_order: Option<ServerOrder>,
}

impl SessionContainer {
    /// Create a container, rehydrating persisted fields. The cached
    /// server order is not persisted; it refills on the next refresh.
    pub fn new(api: Arc<dyn OrderingApi>, store: Arc<dyn KeyValueStore>) -> Self {
        let table_number = read_key(&*store, keys::TABLE_NUMBER);
        let order_type =
            read_key(&*store, keys::ORDER_TYPE).and_then(|raw| OrderType::parse(&raw));
        let session_token = read_key(&*store, keys::SESSION_TOKEN);
        let customer_id = read_key(&*store, keys::CUSTOMER_ID);
        let checkout_locked =
            read_key(&*store, keys::CHECKOUT_LOCKED).as_deref() == Some("true");

        Self {
            api,
            store,
            table_number,
            order_type,
            session_token,
            customer_id,
            checkout_locked,
            current_order: None,
        }
    }

    // ========== Accessors ==========

    pub fn table_number(&self) -> Option<&str> {
        self.table_number.as_deref()
    }

    pub fn order_type(&self) -> Option<OrderType> {
        self.order_type
    }

    pub fn session_token(&self) -> Option<&str> {
        self.session_token.as_deref()
    }

    pub fn customer_id(&self) -> Option<&str> {
        self.customer_id.as_deref()
    }

    pub fn is_checkout_locked(&self) -> bool {
        self.checkout_locked
    }

    /// Cached backend snapshot of the current order, if any
    pub fn current_order(&self) -> Option<&ServerOrder> {
        self.current_order.as_ref()
    }

    /// Derived lifecycle phase
    pub fn phase(&self) -> SessionPhase {
        if self.checkout_locked {
            SessionPhase::CheckoutLocked
        } else if self.table_number.is_some() && self.session_token.is_some() {
            SessionPhase::SessionActive
        } else if self.order_type.is_some() {
            SessionPhase::TypeSelected
        } else {
            SessionPhase::Uninitialized
        }
    }

    // ========== Setters (write-through) ==========

    pub fn set_table_number(&mut self, table: Option<String>) {
        write_key(&*self.store, keys::TABLE_NUMBER, table.as_deref());
        self.table_number = table;
    }

    pub fn set_order_type(&mut self, order_type: Option<OrderType>) {
        write_key(
            &*self.store,
            keys::ORDER_TYPE,
            order_type.map(|t| t.as_str()),
        );
        self.order_type = order_type;
    }

    /// Plain setter; callers that install a token by hand follow up with
    /// [`Self::on_session_acquired`].
    pub fn set_session_token(&mut self, token: Option<String>) {
        write_key(&*self.store, keys::SESSION_TOKEN, token.as_deref());
        self.session_token = token;
    }

    pub fn set_customer_id(&mut self, id: Option<String>) {
        write_key(&*self.store, keys::CUSTOMER_ID, id.as_deref());
        self.customer_id = id;
    }

    pub fn set_checkout_locked(&mut self, locked: bool) {
        write_key(
            &*self.store,
            keys::CHECKOUT_LOCKED,
            Some(if locked { "true" } else { "false" }),
        );
        self.checkout_locked = locked;
    }

    /// Abandon the session: clears table, order type, checkout lock,
    /// session token, customer id, and the cached order snapshot in one
    /// transition.
    pub fn reset(&mut self) {
        self.set_table_number(None);
        self.set_order_type(None);
        self.set_checkout_locked(false);
        self.set_session_token(None);
        self.set_customer_id(None);
        self.current_order = None;
    }

    // ========== Backend Operations ==========

    /// Start a table session after a QR scan.
    ///
    /// On success the returned token and table id replace the session
    /// context, the order type flips to dine-in, and the one-shot
    /// [`Self::on_session_acquired`] refresh runs.
    pub async fn begin_session(
        &mut self,
        table_id: &str,
        request: &StartSessionRequest,
    ) -> ClientResult<StartSessionResponse> {
        let response = self.api.start_session(table_id, request).await?;

        self.set_session_token(Some(response.session_token.clone()));
        self.set_table_number(Some(response.table_id.to_string()));
        self.set_order_type(Some(OrderType::DineIn));
        self.on_session_acquired().await;

        Ok(response)
    }

    /// One-shot synchronization after a session token is installed.
    pub async fn on_session_acquired(&mut self) {
        self.refresh_order().await;
    }

    /// Refresh the cached server order for the active table session.
    ///
    /// No-op unless table number and session token are both present. A
    /// failed refresh keeps the previous snapshot; a transient error must
    /// not tear down an otherwise valid session. An unauthorized response
    /// means the token is no longer honored server-side, so it is dropped
    /// to force a fresh scan.
    pub async fn refresh_order(&mut self) {
        let (Some(table), Some(token)) =
            (self.table_number.clone(), self.session_token.clone())
        else {
            return;
        };

        match self.api.current_order(&table, &token).await {
            Ok(order) => self.current_order = Some(order),
            Err(ClientError::Unauthorized) => {
                tracing::warn!(table = %table, "session token rejected; clearing it");
                self.set_session_token(None);
            }
            Err(err) => {
                tracing::warn!(table = %table, error = %err, "order refresh failed; keeping last snapshot");
            }
        }
    }

    /// Submit cart lines to the active table order, one request per line.
    ///
    /// Requests go out sequentially so the backend observes the same
    /// ordering the customer chose and no two writes to the order
    /// interleave. The run stops at the first failure; the error reports
    /// how many lines made it. A successful run ends with a refresh, so
    /// the cached snapshot reflects at least the just-submitted items.
    pub async fn submit_items(&mut self, items: &[CartItem]) -> Result<usize, SubmitError> {
        let (Some(table), Some(token)) =
            (self.table_number.clone(), self.session_token.clone())
        else {
            return Err(SubmitError {
                submitted: 0,
                source: ClientError::SessionRequired("scan the table code before ordering"),
            });
        };

        let mut submitted = 0;
        for item in items {
            let request = AddOrderItemRequest::from(item);
            if let Err(err) = self.api.add_order_item(&table, &token, &request).await {
                tracing::warn!(
                    table = %table,
                    item = %item.id,
                    submitted,
                    error = %err,
                    "item submission aborted"
                );
                return Err(SubmitError {
                    submitted,
                    source: err,
                });
            }
            submitted += 1;
        }

        self.refresh_order().await;
        Ok(submitted)
    }

    /// Ask for the bill. Requires an active session; does not mutate
    /// local state; the status change arrives with the next refresh.
    pub async fn request_bill(&self) -> ClientResult<()> {
        let (Some(table), Some(token)) = (&self.table_number, &self.session_token) else {
            return Err(ClientError::SessionRequired(
                "scan the table code before requesting the bill",
            ));
        };
        self.api.request_bill(table, token).await
    }
}
