//! Checkout orchestration
//!
//! Bridges the cart, the session, and the order history at confirmation
//! time. A dine-in session submits cart lines to the table order;
//! anything else posts a standalone order. Success engages the checkout
//! lock, records a local fallback entry, and empties the cart. The
//! checkout lock is enforced here: once an order is confirmed, further
//! submissions are refused until the session resets.

use crate::cart::CartContainer;
use crate::error::ClientError;
use crate::history::OrderHistory;
use crate::http::OrderingApi;
use crate::session::{SessionContainer, SessionPhase, SubmitError};
use shared::client::{CreateOrderRequest, CustomerDetails, OrderLineItem};
use shared::order::{LocalOrderRecord, OrderType, PaymentMethod, PaymentStatus};
use std::sync::Arc;
use thiserror::Error;

/// Payment selection made on the checkout page
#[derive(Debug, Clone)]
pub struct PaymentSelection {
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    /// Delivery/pickup details for standalone orders
    pub customer_details: Option<CustomerDetails>,
}

impl PaymentSelection {
    /// Pay at the counter later
    pub fn pay_later(method: PaymentMethod) -> Self {
        Self {
            method,
            status: PaymentStatus::Pending,
            customer_details: None,
        }
    }
}

/// How the confirmed order reached the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// Lines were added to the active table order
    SubmittedToTable { submitted: usize },
    /// A standalone order was created (takeaway, or no table session)
    OrderCreated { order_id: Option<String> },
}

/// Checkout failure
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// An order was already confirmed; reset the session to order again
    #[error("checkout is locked; reset the session to order again")]
    Locked,

    #[error("cart is empty")]
    EmptyCart,

    /// Dine-in submission stopped partway; see the submitted count
    #[error(transparent)]
    Submit(#[from] SubmitError),

    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Checkout flow
pub struct Checkout {
    api: Arc<dyn OrderingApi>,
}

impl Checkout {
    pub fn new(api: Arc<dyn OrderingApi>) -> Self {
        Self { api }
    }

    /// Confirm the order in the cart.
    ///
    /// A partial dine-in failure leaves the cart and the lock untouched
    /// so the customer can retry the remainder; the embedded submitted
    /// count says exactly how many lines the backend already has.
    pub async fn confirm(
        &self,
        cart: &mut CartContainer,
        session: &mut SessionContainer,
        history: &mut OrderHistory,
        payment: PaymentSelection,
    ) -> Result<CheckoutOutcome, CheckoutError> {
        if session.is_checkout_locked() {
            return Err(CheckoutError::Locked);
        }
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let items = cart.items().to_vec();
        let total = cart.total_price();

        let outcome = if session.phase() == SessionPhase::SessionActive {
            let submitted = session.submit_items(&items).await?;
            CheckoutOutcome::SubmittedToTable { submitted }
        } else {
            let request = CreateOrderRequest {
                items: items.iter().map(OrderLineItem::from).collect(),
                total_price: total,
                table_number: session.table_number().map(str::to_string),
                order_type: session.order_type(),
                payment_method: payment.method,
                payment_status: payment.status,
                customer_details: payment.customer_details.clone(),
            };
            let created = self.api.create_order(&request).await?;
            CheckoutOutcome::OrderCreated {
                order_id: created.order_id,
            }
        };

        history.push(LocalOrderRecord::new(
            items,
            total,
            session.order_type().unwrap_or(OrderType::Takeaway),
            session.table_number().map(str::to_string),
            payment.status,
        ));
        session.set_checkout_locked(true);
        cart.clear();

        Ok(outcome)
    }
}
