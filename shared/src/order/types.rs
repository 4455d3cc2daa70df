//! Order lifecycle enums and cart line types

use crate::models::MenuItem;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ============================================================================
// Order Type
// ============================================================================

/// How the customer is ordering
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum OrderType {
    /// Seated at a table with an active session
    DineIn,
    /// Pickup order, no table required
    Takeaway,
}

impl OrderType {
    /// Wire/storage representation ("dine-in" / "takeaway")
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::DineIn => "dine-in",
            OrderType::Takeaway => "takeaway",
        }
    }

    /// Parse the wire/storage representation
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "dine-in" => Some(OrderType::DineIn),
            "takeaway" => Some(OrderType::Takeaway),
            _ => None,
        }
    }
}

// ============================================================================
// Order Status
// ============================================================================

/// Server-side order lifecycle status
///
/// The backend owns this enumeration and may grow it; unrecognized values
/// deserialize to [`OrderStatus::Unknown`] so a new status never breaks
/// the client.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Preparing,
    Ready,
    Served,
    Completed,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    /// Display label; `Unknown` gets a neutral fallback
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::Preparing => "Preparing",
            OrderStatus::Ready => "Ready",
            OrderStatus::Served => "Served",
            OrderStatus::Completed => "Completed",
            OrderStatus::Cancelled => "Cancelled",
            OrderStatus::Unknown => "In progress",
        }
    }

    /// Whether the order has reached a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }
}

/// Lifecycle status of a client-recorded order (the local fallback path)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LocalOrderStatus {
    Preparing,
    Ready,
    Served,
}

// ============================================================================
// Payment
// ============================================================================

/// Payment method selected at checkout
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Card,
    Cash,
    Online,
}

/// Payment settlement status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Paid,
    Pending,
}

// ============================================================================
// Cart Item
// ============================================================================

/// One line of the not-yet-submitted cart, unique by menu item id
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Menu item identifier
    pub id: String,
    pub name: String,
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Always positive; a line at zero is removed instead
    pub quantity: u32,
}

impl CartItem {
    /// Line total: price x quantity
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

impl From<&MenuItem> for CartItem {
    fn from(item: &MenuItem) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            price: item.price,
            image: Some(item.image.clone()),
            category: Some(item.category.clone()),
            quantity: 1,
        }
    }
}
