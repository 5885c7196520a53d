//! Shopping cart, order totals and order persistence.
//!
//! Prices are whole cents. Totals use checked arithmetic, so an absurd
//! quantity produces an error instead of wrapping.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::consts::{CART_KEY, ORDERS_KEY};
use crate::prelude::*;
use crate::storage::{KeyValueStore, StoreError, load_json, load_json_lenient, save_json};
use crate::Error;

/// An amount of money in cents.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, From, Into, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    pub const ZERO: Self = Self(0);

    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    pub const fn cents(self) -> u64 {
        self.0
    }

    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Self(cents)),
            None => None,
        }
    }

    pub const fn checked_mul(self, quantity: u32) -> Option<Self> {
        match self.0.checked_mul(quantity as u64) {
            Some(cents) => Some(Self(cents)),
            None => None,
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}.{:02}", self.0 / 100, self.0 % 100)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[display(fmt = "gems")]
    Gems,
    #[display(fmt = "psychological")]
    Psychological,
    #[display(fmt = "physiological")]
    Physiological,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopItem {
    pub id:          String,
    pub name:        String,
    pub description: String,
    pub price:       Price,
    pub category:    Category,
    pub image:       String,
    pub in_stock:    bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(flatten)]
    pub item:     ShopItem,
    pub quantity: u32,
}

impl CartItem {
    /// # Errors
    /// Returns `Error::InvalidInput` if price times quantity overflows.
    pub fn line_total(&self) -> Result<Price, Error> {
        self.item.price.checked_mul(self.quantity).ok_or_else(|| {
            Error::invalid_input(format!("line total for {} overflows", self.item.id))
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[display(fmt = "pending")]
    Pending,
    #[display(fmt = "processing")]
    Processing,
    #[display(fmt = "completed")]
    Completed,
    #[display(fmt = "cancelled")]
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id:         String,
    pub items:      Vec<CartItem>,
    pub total:      Price,
    pub status:     OrderStatus,
    pub created_at: DateTime<Utc>,
    pub user_id:    String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Adds one unit of `item`, merging with an existing line for the same id.
    ///
    /// # Errors
    /// Returns `Error::InvalidInput` for an out-of-stock item or when the
    /// line's quantity would overflow.
    pub fn add(&mut self, item: &ShopItem) -> Result<(), Error> {
        if !item.in_stock {
            return Err(Error::invalid_input(format!("{} is out of stock", item.id)));
        }
        if let Some(line) = self.items.iter_mut().find(|line| line.item.id == item.id) {
            line.quantity = line.quantity.checked_add(1).ok_or_else(|| {
                Error::invalid_input(format!("quantity of {} overflows", item.id))
            })?;
        } else {
            self.items.push(CartItem {
                item:     item.clone(),
                quantity: 1,
            });
        }
        Ok(())
    }

    /// Returns whether a line was removed.
    pub fn remove(&mut self, item_id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|line| line.item.id != item_id);
        self.items.len() != before
    }

    /// Sets the quantity of a line; zero removes it. Returns whether the line exists.
    pub fn update_quantity(&mut self, item_id: &str, quantity: u32) -> bool {
        if quantity == 0 {
            return self.remove(item_id);
        }
        match self.items.iter_mut().find(|line| line.item.id == item_id) {
            Some(line) => {
                line.quantity = quantity;
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of price times quantity across all lines.
    ///
    /// # Errors
    /// Returns `Error::InvalidInput` if the total overflows.
    pub fn total(&self) -> Result<Price, Error> {
        self.items.iter().try_fold(Price::ZERO, |acc, line| {
            acc.checked_add(line.line_total()?)
                .ok_or_else(|| Error::invalid_input("cart total overflows"))
        })
    }

    /// Sum of quantities across all lines.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// A pending order for the current contents. The cart is not changed.
    ///
    /// # Errors
    /// Returns `Error::InvalidInput` for an empty cart or an overflowing total.
    pub fn to_order(&self, user_id: &str, now: DateTime<Utc>) -> Result<Order, Error> {
        if self.is_empty() {
            return Err(Error::invalid_input("cannot check out an empty cart"));
        }
        Ok(Order {
            id:         now.timestamp_millis().to_string(),
            items:      self.items.clone(),
            total:      self.total()?,
            status:     OrderStatus::Pending,
            created_at: now,
            user_id:    user_id.to_owned(),
        })
    }

    /// Turns the cart into a pending order and empties it.
    ///
    /// # Errors
    /// As [`Cart::to_order`]; the cart is left untouched in that case.
    pub fn checkout(&mut self, user_id: &str, now: DateTime<Utc>) -> Result<Order, Error> {
        let order = self.to_order(user_id, now)?;
        self.clear();
        tracing::info!(order_id = %order.id, total = %order.total, lines = order.items.len(), "order placed");
        Ok(order)
    }
}

/// Persists the cart and the order history.
pub struct CartStore<S> {
    store: S,
}

impl<S: KeyValueStore> CartStore<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// The saved cart, or an empty one if nothing usable is stored.
    ///
    /// # Errors
    /// Returns `StoreError::Backend` when storage fails.
    pub fn load_cart(&self) -> Result<Cart, StoreError> {
        Ok(load_json_lenient(&self.store, CART_KEY)?.unwrap_or_default())
    }

    /// # Errors
    /// Returns `StoreError` when encoding or storage fails.
    pub fn save_cart(&mut self, cart: &Cart) -> Result<(), StoreError> {
        save_json(&mut self.store, CART_KEY, cart)
    }

    /// # Errors
    /// Returns `StoreError::Decode` if the stored order history is corrupt.
    pub fn orders(&self) -> Result<Vec<Order>, StoreError> {
        Ok(load_json(&self.store, ORDERS_KEY)?.unwrap_or_default())
    }

    /// Checks out `cart`, appends the order to the history and saves the
    /// emptied cart. `cart` is only cleared once both writes succeed; if the
    /// cart write fails the order is removed from the history again.
    ///
    /// # Errors
    /// Returns `StoreError::Invalid` for an empty cart, otherwise storage errors.
    pub fn checkout(
        &mut self,
        cart: &mut Cart,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Order, StoreError> {
        let mut orders = self.orders()?;
        let order = cart.to_order(user_id, now)?;
        orders.push(order.clone());
        save_json(&mut self.store, ORDERS_KEY, &orders)?;

        if let Err(err) = self.save_cart(&Cart::new()) {
            orders.pop();
            if let Err(rollback) = save_json(&mut self.store, ORDERS_KEY, &orders) {
                tracing::warn!(order_id = %order.id, error = %rollback, "failed to roll back order");
            }
            return Err(err);
        }

        cart.clear();
        tracing::info!(order_id = %order.id, total = %order.total, lines = order.items.len(), "order placed");
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use crate::storage::MemoryStore;
    use crate::test_utils::at;

    fn item(id: &str, cents: u64) -> ShopItem {
        ShopItem {
            id:          id.to_owned(),
            name:        format!("Item {id}"),
            description: String::new(),
            price:       Price::from_cents(cents),
            category:    Category::Gems,
            image:       String::new(),
            in_stock:    true,
        }
    }

    #[test]
    fn test_add_merges_lines() {
        let mut cart = Cart::new();
        let amethyst = item("amethyst", 2999);
        cart.add(&amethyst).unwrap();
        cart.add(&amethyst).unwrap();
        cart.add(&item("quartz", 1500)).unwrap();

        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.items()[0].quantity, 2);
        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.total().unwrap(), Price::from_cents(2 * 2999 + 1500));
    }

    #[test]
    fn test_add_out_of_stock() {
        let mut cart = Cart::new();
        let mut sold_out = item("opal", 5000);
        sold_out.in_stock = false;
        let err = cart.add(&sold_out).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity() {
        let mut cart = Cart::new();
        cart.add(&item("a", 100)).unwrap();
        cart.add(&item("b", 250)).unwrap();

        assert!(cart.update_quantity("a", 5));
        assert_eq!(cart.total().unwrap(), Price::from_cents(750));

        assert!(cart.update_quantity("b", 0));
        assert_eq!(cart.items().len(), 1);

        assert!(!cart.update_quantity("missing", 3));
        assert!(!cart.remove("missing"));
        assert!(cart.remove("a"));
        assert!(cart.is_empty());
        assert_eq!(cart.total().unwrap(), Price::ZERO);
    }

    #[test]
    fn test_add_quantity_overflow_is_error() {
        let mut cart = Cart::new();
        let quartz = item("quartz", 1);
        cart.add(&quartz).unwrap();
        cart.update_quantity("quartz", u32::MAX);

        let err = cart.add(&quartz).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(cart.items()[0].quantity, u32::MAX);
    }

    #[test]
    fn test_total_overflow_is_error() {
        let mut cart = Cart::new();
        cart.add(&item("huge", u64::MAX / 2)).unwrap();
        cart.update_quantity("huge", 3);
        assert_eq!(cart.total().unwrap_err().kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_checkout_builds_pending_order() {
        let mut cart = Cart::new();
        cart.add(&item("a", 1234)).unwrap();
        cart.update_quantity("a", 2);
        let now = at("2024-06-01T09:30:00Z");

        let order = cart.checkout("user-7", now).unwrap();
        assert_eq!(order.total, Price::from_cents(2468));
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.user_id, "user-7");
        assert_eq!(order.id, now.timestamp_millis().to_string());
        assert_eq!(order.items.len(), 1);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_checkout_empty_cart() {
        let mut cart = Cart::new();
        let err = cart.checkout("u", at("2024-06-01T09:30:00Z")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_price_display() {
        assert_eq!(Price::from_cents(0).to_string(), "$0.00");
        assert_eq!(Price::from_cents(5).to_string(), "$0.05");
        assert_eq!(Price::from_cents(2999).to_string(), "$29.99");
        assert_eq!(Price::from(120_000_u64).to_string(), "$1200.00");
    }

    #[test]
    fn test_cart_store_persists_and_records_orders() {
        let mut store = CartStore::new(MemoryStore::new());
        assert!(store.load_cart().unwrap().is_empty());

        let mut cart = Cart::new();
        cart.add(&item("a", 1000)).unwrap();
        store.save_cart(&cart).unwrap();
        let mut reloaded = store.load_cart().unwrap();
        assert_eq!(reloaded, cart);

        let order = store
            .checkout(&mut reloaded, "u1", at("2024-06-01T09:30:00Z"))
            .unwrap();
        assert!(store.load_cart().unwrap().is_empty());
        assert_eq!(store.orders().unwrap(), vec![order]);

        reloaded.add(&item("b", 50)).unwrap();
        store
            .checkout(&mut reloaded, "u1", at("2024-06-02T09:30:00Z"))
            .unwrap();
        assert_eq!(store.orders().unwrap().len(), 2);
    }

    #[test]
    fn test_cart_store_rejects_empty_checkout() {
        let mut store = CartStore::new(MemoryStore::new());
        let err = store
            .checkout(&mut Cart::new(), "u1", at("2024-06-01T09:30:00Z"))
            .unwrap_err();
        assert!(matches!(err, StoreError::Invalid(_)));
        assert!(store.orders().unwrap().is_empty());
    }

    /// Memory store whose writes to one key always fail.
    struct RejectingStore {
        inner:  MemoryStore,
        reject: &'static str,
    }

    impl KeyValueStore for RejectingStore {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
            if key == self.reject {
                return Err(StoreError::Backend(format!("write to {key} rejected")));
            }
            self.inner.set(key, value)
        }

        fn remove(&mut self, key: &str) -> Result<(), StoreError> {
            self.inner.remove(key)
        }
    }

    fn store_with_saved_cart(cart: &Cart, reject: &'static str) -> CartStore<RejectingStore> {
        let mut inner = MemoryStore::new();
        CartStore::new(&mut inner).save_cart(cart).unwrap();
        CartStore::new(RejectingStore { inner, reject })
    }

    #[test]
    fn test_failed_checkout_keeps_cart_and_history_consistent() {
        struct TestCase {
            description: &'static str,
            reject:      &'static str,
        }

        let cases = [
            TestCase {
                description: "order history write fails",
                reject:      ORDERS_KEY,
            },
            TestCase {
                description: "emptied cart write fails",
                reject:      CART_KEY,
            },
        ];

        for case in cases {
            let mut cart = Cart::new();
            cart.add(&item("a", 1000)).unwrap();
            let mut store = store_with_saved_cart(&cart, case.reject);

            let result = store.checkout(&mut cart, "u1", at("2024-06-01T09:30:00Z"));
            assert!(
                matches!(result, Err(StoreError::Backend(_))),
                "{}",
                case.description
            );
            assert_eq!(cart.item_count(), 1, "{}", case.description);
            assert_eq!(store.load_cart().unwrap(), cart, "{}", case.description);
            assert!(store.orders().unwrap().is_empty(), "{}", case.description);
        }
    }

    #[test]
    fn test_to_order_leaves_cart_untouched() {
        let mut cart = Cart::new();
        cart.add(&item("a", 500)).unwrap();
        let order = cart.to_order("u1", at("2024-06-01T09:30:00Z")).unwrap();
        assert_eq!(order.items, cart.items());
        assert_eq!(order.total, Price::from_cents(500));
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_order_serde_shape() {
        let mut cart = Cart::new();
        cart.add(&item("a", 1000)).unwrap();
        let order = cart.checkout("u1", at("2024-06-01T09:30:00Z")).unwrap();
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["status"], "pending");
        assert_eq!(json["total"], 1000);
        assert_eq!(json["items"][0]["quantity"], 1);
        assert_eq!(json["items"][0]["category"], "gems");
        assert_eq!(json["created_at"], "2024-06-01T09:30:00Z");
    }
}
