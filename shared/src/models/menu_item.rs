//! Menu item model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Menu item record as served by `GET /menu/items`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    /// Korean name rendered alongside the latin one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub korean: Option<String>,
    pub description: String,
    pub price: Decimal,
    pub image: String,
    pub category: String,
    #[serde(default)]
    pub spicy: bool,
    #[serde(default)]
    pub popular: bool,
    #[serde(default)]
    pub vegetarian: bool,
}
