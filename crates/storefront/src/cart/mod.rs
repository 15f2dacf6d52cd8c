//! Session-backed cart persistence.
//!
//! The cart itself is a pure value type ([`pet_haven_core::cart::Cart`]);
//! this module owns the I/O side: reading a previously saved cart out of the
//! visitor's session and writing it back after every mutation.
//!
//! Persistence is best-effort. A failed session write must never break a
//! cart operation, so store errors are logged and swallowed. The worst case
//! is a cart that resets on the next visit.

pub mod store;

pub use store::{CartStore, MemoryCartStore, SessionCartStore};

use pet_haven_core::cart::Cart;

/// Reconcile an in-memory cart with the stored one.
///
/// If the store holds a cart that differs from `cart` by value, the stored
/// contents win and replace the in-memory items (deduplicated via
/// [`Cart::replace`]). A missing or identical stored cart leaves `cart`
/// untouched.
pub async fn hydrate<S: CartStore>(store: &S, cart: &mut Cart) {
    let Some(stored) = store.read().await else {
        return;
    };

    if stored != *cart {
        cart.replace(stored.items().to_vec());
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pet_haven_core::cart::{GUEST_USER, NewCartItem};

    fn new_item(id: &str) -> NewCartItem {
        NewCartItem {
            id: id.to_owned(),
            name: format!("Product {id}"),
            price: "5.00".parse().unwrap(),
            image: format!("{id}.jpg"),
            user_id: GUEST_USER.to_owned(),
        }
    }

    #[tokio::test]
    async fn hydrate_with_empty_store_keeps_cart() {
        let store = MemoryCartStore::default();
        let mut cart = Cart::new();
        cart.add_item(new_item("p1"));
        let before = cart.clone();

        hydrate(&store, &mut cart).await;

        assert_eq!(cart, before);
    }

    #[tokio::test]
    async fn hydrate_replaces_with_stored_cart() {
        let store = MemoryCartStore::default();
        let mut stored = Cart::new();
        stored.add_item(new_item("p2"));
        stored.add_item(new_item("p3"));
        store.write(&stored).await;

        let mut cart = Cart::new();
        cart.add_item(new_item("p1"));

        hydrate(&store, &mut cart).await;

        assert_eq!(cart, stored);
    }

    #[tokio::test]
    async fn hydrate_identical_cart_is_noop() {
        let store = MemoryCartStore::default();
        let mut cart = Cart::new();
        cart.add_item(new_item("p1"));
        store.write(&cart).await;

        let before = cart.clone();
        hydrate(&store, &mut cart).await;

        assert_eq!(cart, before);
    }

    #[tokio::test]
    async fn hydrate_restores_replaced_cart_after_roundtrip() {
        let store = MemoryCartStore::default();

        let mut cart = Cart::new();
        cart.replace(vec![pet_haven_core::cart::CartItem {
            id: "x".to_owned(),
            name: "Leash".to_owned(),
            price: "5.00".parse().unwrap(),
            image: "x.jpg".to_owned(),
            quantity: 3,
            user_id: GUEST_USER.to_owned(),
        }]);
        store.write(&cart).await;

        // Fresh session: empty in-memory cart, hydrate from the store.
        let mut fresh = Cart::new();
        hydrate(&store, &mut fresh).await;

        assert_eq!(fresh.items().len(), 1);
        assert_eq!(fresh.items()[0].id, "x");
        assert_eq!(fresh.items()[0].quantity, 3);
    }

    #[tokio::test]
    async fn write_then_read_roundtrips() {
        let store = MemoryCartStore::default();
        let mut cart = Cart::new();
        cart.add_item(new_item("p1"));
        cart.update_quantity("p1", 4);

        store.write(&cart).await;
        let read = store.read().await.unwrap();

        assert_eq!(read, cart);
    }
}
