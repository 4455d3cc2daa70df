//! Order snapshots
//!
//! [`ServerOrder`] is the client's cached copy of the backend's view of
//! the current table order; it is read-mostly and refreshed on demand.
//! [`LocalOrderRecord`] is the client-only fallback written at checkout
//! confirmation when no richer server order exists.

use super::types::{CartItem, LocalOrderStatus, OrderStatus, OrderType, PaymentStatus};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One line of a server-side order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServerOrderItem {
    pub menu_item_id: String,
    pub name: String,
    pub quantity: u32,
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
}

/// Backend view of the current order for a table session
///
/// Not authoritative client state: replaced wholesale on each successful
/// refresh, kept as-is when a refresh fails.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServerOrder {
    pub order_id: String,
    pub table_id: i64,
    #[serde(default)]
    pub items: Vec<ServerOrderItem>,
    pub total_amount: Decimal,
    pub final_amount: Decimal,
    pub status: OrderStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_charge_amount: Option<Decimal>,
}

/// Client-recorded order, created at local checkout confirmation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LocalOrderRecord {
    /// Client-generated id
    pub id: String,
    pub items: Vec<CartItem>,
    pub status: LocalOrderStatus,
    pub total_amount: Decimal,
    /// Creation time, UTC milliseconds
    pub timestamp: i64,
    pub order_type: OrderType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_number: Option<String>,
    pub payment_status: PaymentStatus,
}

impl LocalOrderRecord {
    pub fn new(
        items: Vec<CartItem>,
        total_amount: Decimal,
        order_type: OrderType,
        table_number: Option<String>,
        payment_status: PaymentStatus,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            items,
            status: LocalOrderStatus::Preparing,
            total_amount,
            timestamp: crate::util::now_millis(),
            order_type,
            table_number,
            payment_status,
        }
    }
}
