//! Shopping cart state model.
//!
//! The cart is a plain value type mutated through a fixed set of commands.
//! It performs no I/O: persistence is an explicit step owned by the caller
//! (the storefront writes the cart to the session after every mutation).
//!
//! # Invariants
//!
//! - Every item has `quantity >= 1`; a quantity that would drop to zero or
//!   below removes the item entirely.
//! - `items` holds at most one entry per product id; adding an id that is
//!   already present increments its quantity instead of appending.
//! - `name`, `price` and `image` are snapshots taken when the item is first
//!   added and are never revalidated against the catalog.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Owner tag used for carts belonging to anonymous sessions.
pub const GUEST_USER: &str = "guest";

/// A single line item in the cart: one product id and its quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product identifier, stable across sessions.
    pub id: String,
    /// Display name, snapshotted from the catalog at add-time.
    pub name: String,
    /// Unit price at add-time. Never re-fetched.
    pub price: Decimal,
    /// Image reference, snapshotted at add-time.
    pub image: String,
    /// Quantity, always >= 1 while the item exists.
    pub quantity: u32,
    /// Identity of the session that added the item, or [`GUEST_USER`].
    pub user_id: String,
}

impl CartItem {
    /// Price of this line: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Input for adding a product to the cart.
///
/// Quantity is implicit: a new entry starts at 1 and repeated adds of the
/// same id increment it.
#[derive(Debug, Clone)]
pub struct NewCartItem {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    pub image: String,
    pub user_id: String,
}

/// The cart: an insertion-ordered sequence of line items, unique by id.
///
/// Created empty at session start, hydrated from the session store if
/// present, and mutated only through the methods below. Every mutation
/// leaves the invariants documented at the module level intact.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// The line items, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Whether the cart has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add a product to the cart.
    ///
    /// If an item with the same id already exists its quantity is
    /// incremented by one and every other field is left unchanged
    /// (first-write-wins for the denormalized snapshot). Otherwise a new
    /// item is appended with quantity 1.
    pub fn add_item(&mut self, new: NewCartItem) {
        if let Some(item) = self.items.iter_mut().find(|item| item.id == new.id) {
            item.quantity = item.quantity.saturating_add(1);
            return;
        }

        self.items.push(CartItem {
            id: new.id,
            name: new.name,
            price: new.price,
            image: new.image,
            quantity: 1,
            user_id: new.user_id,
        });
    }

    /// Remove the item matching `id`. No-op if absent.
    pub fn remove_item(&mut self, id: &str) {
        self.items.retain(|item| item.id != id);
    }

    /// Set the quantity of the item matching `id`.
    ///
    /// A quantity of zero or below removes the item, the same as
    /// [`Cart::remove_item`]. No-op if `id` is absent.
    pub fn update_quantity(&mut self, id: &str, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(id);
            return;
        }

        if let Some(item) = self.items.iter_mut().find(|item| item.id == id) {
            item.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        }
    }

    /// Wholesale replace the cart contents.
    ///
    /// Used when hydrating from the session store or reconciling
    /// server-known state. The input is deduplicated by id: quantities of
    /// duplicate entries are summed and the first occurrence wins the
    /// denormalized fields. Entries with quantity 0 are dropped.
    pub fn replace(&mut self, items: Vec<CartItem>) {
        self.items.clear();
        for item in items {
            if item.quantity == 0 {
                continue;
            }
            if let Some(existing) = self.items.iter_mut().find(|i| i.id == item.id) {
                existing.quantity = existing.quantity.saturating_add(item.quantity);
            } else {
                self.items.push(item);
            }
        }
    }

    /// Empty the cart. Used after a completed checkout.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Grand total: sum of `price * quantity` over all items.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Total number of units across all items.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |acc, item| acc.saturating_add(item.quantity))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn new_item(id: &str, name: &str, price: &str) -> NewCartItem {
        NewCartItem {
            id: id.to_owned(),
            name: name.to_owned(),
            price: dec(price),
            image: format!("{id}.jpg"),
            user_id: GUEST_USER.to_owned(),
        }
    }

    #[test]
    fn repeated_adds_increment_quantity() {
        let mut cart = Cart::new();
        for _ in 0..5 {
            cart.add_item(new_item("p1", "Toy", "8.00"));
        }

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 5);
    }

    #[test]
    fn add_keeps_first_snapshot() {
        let mut cart = Cart::new();
        cart.add_item(new_item("a", "First", "10.00"));

        // Same id with a different price and name: quantity bumps, fields stay.
        let mut second = new_item("a", "Second", "99.99");
        second.image = "other.jpg".to_owned();
        cart.add_item(second);

        let item = &cart.items()[0];
        assert_eq!(item.name, "First");
        assert_eq!(item.price, dec("10.00"));
        assert_eq!(item.image, "a.jpg");
        assert_eq!(item.quantity, 2);
        assert_eq!(cart.subtotal(), dec("20.00"));
    }

    #[test]
    fn update_quantity_sets_positive_values() {
        let mut cart = Cart::new();
        cart.add_item(new_item("p1", "Toy", "8.00"));
        cart.update_quantity("p1", 7);
        assert_eq!(cart.items()[0].quantity, 7);
    }

    #[test]
    fn update_quantity_zero_or_negative_removes() {
        let mut cart = Cart::new();
        cart.add_item(new_item("p1", "Toy", "8.00"));
        cart.update_quantity("p1", 0);
        assert!(cart.is_empty());

        cart.add_item(new_item("p1", "Toy", "8.00"));
        cart.update_quantity("p1", -5);
        assert!(cart.is_empty());
    }

    #[test]
    fn update_quantity_absent_id_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(new_item("p1", "Toy", "8.00"));
        cart.update_quantity("missing", 3);
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 1);
    }

    #[test]
    fn remove_absent_id_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(new_item("p1", "Toy", "8.00"));
        let before = cart.clone();
        cart.remove_item("missing");
        assert_eq!(cart, before);
    }

    #[test]
    fn clear_always_yields_empty() {
        let mut cart = Cart::new();
        assert!(cart.is_empty());
        cart.clear();
        assert!(cart.is_empty());

        cart.add_item(new_item("p1", "Toy", "8.00"));
        cart.add_item(new_item("p2", "Food", "10.00"));
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal(), Decimal::ZERO);
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn replace_dedupes_by_id() {
        let mut cart = Cart::new();
        let item = CartItem {
            id: "x".to_owned(),
            name: "Leash".to_owned(),
            price: dec("5.00"),
            image: "x.jpg".to_owned(),
            quantity: 2,
            user_id: GUEST_USER.to_owned(),
        };
        let mut dup = item.clone();
        dup.name = "Other".to_owned();
        dup.quantity = 3;

        cart.replace(vec![item, dup]);

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 5);
        assert_eq!(cart.items()[0].name, "Leash");
    }

    #[test]
    fn replace_drops_zero_quantity_entries() {
        let mut cart = Cart::new();
        cart.replace(vec![CartItem {
            id: "x".to_owned(),
            name: "Leash".to_owned(),
            price: dec("5.00"),
            image: "x.jpg".to_owned(),
            quantity: 0,
            user_id: GUEST_USER.to_owned(),
        }]);
        assert!(cart.is_empty());
    }

    #[test]
    fn example_scenario() {
        let mut cart = Cart::new();
        cart.add_item(new_item("p1", "Toy", "8.00"));
        cart.add_item(new_item("p2", "Food", "10.00"));
        cart.update_quantity("p1", 3);

        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.items()[0].id, "p1");
        assert_eq!(cart.items()[0].quantity, 3);
        assert_eq!(cart.items()[0].line_total(), dec("24.00"));
        assert_eq!(cart.items()[1].id, "p2");
        assert_eq!(cart.items()[1].quantity, 1);
        assert_eq!(cart.items()[1].line_total(), dec("10.00"));
        assert_eq!(cart.subtotal(), dec("34.00"));
        assert_eq!(cart.item_count(), 4);
    }

    #[test]
    fn serde_roundtrip_preserves_state() {
        let mut cart = Cart::new();
        cart.add_item(new_item("p1", "Toy", "8.00"));
        cart.update_quantity("p1", 3);

        let json = serde_json::to_string(&cart).unwrap();
        let restored: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, cart);
    }
}
