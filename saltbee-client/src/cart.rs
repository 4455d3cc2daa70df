//! Cart state container
//!
//! Holds the not-yet-submitted selection. Lines are unique by menu item
//! id; the whole cart is written through to client storage on every
//! mutation and rehydrated on load. Totals are derived, never stored.

use crate::storage::{KeyValueStore, keys, read_key, write_key};
use rust_decimal::Decimal;
use shared::order::CartItem;
use std::sync::Arc;

/// Cart state container
pub struct CartContainer {
    store: Arc<dyn KeyValueStore>,
    items: Vec<CartItem>,
}

impl CartContainer {
    /// Create a container, rehydrating persisted cart lines
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        let items = read_key(&*store, keys::CART)
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default();
        Self { store, items }
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add one unit of the given item. An existing line with the same id
    /// gains quantity instead of duplicating; each call adds exactly one
    /// unit regardless of the incoming quantity field.
    pub fn add_item(&mut self, item: CartItem) {
        match self.items.iter_mut().find(|line| line.id == item.id) {
            Some(line) => line.quantity += 1,
            None => self.items.push(CartItem { quantity: 1, ..item }),
        }
        self.persist();
    }

    /// Set a line's quantity. Zero or below removes the line; quantities
    /// are never stored at zero or negative.
    pub fn update_quantity(&mut self, id: &str, quantity: i32) {
        if quantity <= 0 {
            self.items.retain(|line| line.id != id);
        } else if let Some(line) = self.items.iter_mut().find(|line| line.id == id) {
            line.quantity = quantity as u32;
        }
        self.persist();
    }

    /// Delete a line unconditionally
    pub fn remove_item(&mut self, id: &str) {
        self.items.retain(|line| line.id != id);
        self.persist();
    }

    /// Empty the cart
    pub fn clear(&mut self) {
        self.items.clear();
        self.persist();
    }

    /// Sum of line quantities
    pub fn total_items(&self) -> u32 {
        self.items.iter().map(|line| line.quantity).sum()
    }

    /// Sum of price x quantity over all lines, recomputed on demand
    pub fn total_price(&self) -> Decimal {
        self.items.iter().map(|line| line.line_total()).sum()
    }

    fn persist(&self) {
        match serde_json::to_string(&self.items) {
            Ok(raw) => write_key(&*self.store, keys::CART, Some(&raw)),
            Err(err) => tracing::warn!(error = %err, "failed to serialize cart"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::ClientStore;
    use rust_decimal_macros::dec;

    fn item(id: &str, price: Decimal) -> CartItem {
        CartItem {
            id: id.into(),
            name: id.into(),
            price,
            image: None,
            category: None,
            quantity: 1,
        }
    }

    fn cart() -> CartContainer {
        CartContainer::new(Arc::new(ClientStore::open_in_memory().unwrap()))
    }

    #[test]
    fn test_repeated_adds_merge_into_one_line() {
        let mut cart = cart();
        for _ in 0..4 {
            cart.add_item(item("bibimbap", dec!(12.50)));
        }

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 4);
        assert_eq!(cart.total_items(), 4);
    }

    #[test]
    fn test_update_quantity_zero_or_negative_removes_line() {
        let mut cart = cart();
        cart.add_item(item("kimchi", dec!(5.00)));
        cart.update_quantity("kimchi", 0);
        assert!(cart.is_empty());

        cart.add_item(item("kimchi", dec!(5.00)));
        cart.update_quantity("kimchi", -1);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_totals_recompute_after_every_mutation() {
        let mut cart = cart();
        cart.add_item(item("a", dec!(10.00)));
        cart.update_quantity("a", 2);
        cart.add_item(item("b", dec!(5.00)));

        assert_eq!(cart.total_price(), dec!(25.00));
        assert_eq!(cart.total_items(), 3);

        cart.remove_item("a");
        assert_eq!(cart.total_price(), dec!(5.00));
        assert_eq!(cart.total_items(), 1);

        cart.clear();
        assert_eq!(cart.total_price(), dec!(0));
        assert_eq!(cart.total_items(), 0);
    }

    #[test]
    fn test_cart_rehydrates_from_storage() {
        let store: Arc<dyn KeyValueStore> = Arc::new(ClientStore::open_in_memory().unwrap());

        {
            let mut cart = CartContainer::new(store.clone());
            cart.add_item(item("bulgogi", dec!(15.00)));
            cart.update_quantity("bulgogi", 3);
        }

        let cart = CartContainer::new(store);
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 3);
        assert_eq!(cart.total_price(), dec!(45.00));
    }

    #[test]
    fn test_update_quantity_on_missing_id_is_a_no_op() {
        let mut cart = cart();
        cart.add_item(item("a", dec!(10.00)));
        cart.update_quantity("ghost", 5);
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 1);
    }
}
