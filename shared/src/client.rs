//! Client-related wire types
//!
//! Request/response bodies exchanged with the ordering backend. All
//! bodies are JSON with camelCase field names.

use crate::models::Customer;
use crate::order::{CartItem, OrderType, PaymentMethod, PaymentStatus};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// =============================================================================
// Table Session DTOs
// =============================================================================

/// Body of `POST /tables/{tableId}/start-session`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct StartSessionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_phone: Option<String>,
}

impl StartSessionRequest {
    /// Anonymous walk-in with the generic guest label
    pub fn anonymous() -> Self {
        Self {
            guest_name: Some("Guest".to_string()),
            guest_phone: None,
        }
    }

    /// Pre-filled from an authenticated customer identity
    pub fn prefilled(customer: &Customer) -> Self {
        Self {
            guest_name: Some(customer.name.clone()),
            guest_phone: customer.phone.clone(),
        }
    }
}

/// Response of a successful session start
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartSessionResponse {
    pub session_token: String,
    pub is_guest: bool,
    pub table_id: i64,
}

/// Body of `POST /tables/{tableId}/orders/items`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddOrderItemRequest {
    pub menu_item_id: String,
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
    #[serde(default)]
    pub modifiers: Vec<String>,
}

impl From<&CartItem> for AddOrderItemRequest {
    fn from(item: &CartItem) -> Self {
        Self {
            menu_item_id: item.id.clone(),
            quantity: item.quantity,
            special_instructions: None,
            modifiers: Vec::new(),
        }
    }
}

// =============================================================================
// Auth DTOs
// =============================================================================

/// Body of `POST /customer/login`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body of `POST /customer/signup`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Body of `POST /customer/google`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleLoginRequest {
    pub id_token: String,
}

/// Tokens issued on login/signup; `session_linked` reports whether the
/// active table session got attached to the account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthTokens {
    pub access_token: String,
    #[serde(default)]
    pub session_linked: bool,
}

// =============================================================================
// Checkout DTOs
// =============================================================================

/// One line of a standalone order submission
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineItem {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
}

impl From<&CartItem> for OrderLineItem {
    fn from(item: &CartItem) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            price: item.price,
            quantity: item.quantity,
        }
    }
}

/// Delivery/pickup details attached to a standalone order
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDetails {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pickup_time: Option<String>,
}

/// Body of `POST /orders`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub items: Vec<OrderLineItem>,
    pub total_price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_number: Option<String>,
    pub order_type: Option<OrderType>,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_details: Option<CustomerDetails>,
}

/// Acknowledgement of a standalone order submission
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreated {
    #[serde(default)]
    pub order_id: Option<String>,
}
