//! Cart storage backends.

use tower_sessions::Session;

use pet_haven_core::cart::Cart;

use crate::models::session::keys;

/// Where carts are persisted between requests.
///
/// Writes are best-effort: implementations log failures and return normally
/// so that a broken store never turns a cart mutation into a request error.
pub trait CartStore {
    /// Read the stored cart, if any.
    fn read(&self) -> impl Future<Output = Option<Cart>> + Send;

    /// Persist the cart.
    fn write(&self, cart: &Cart) -> impl Future<Output = ()> + Send;
}

/// Cart storage backed by the visitor's session.
pub struct SessionCartStore<'a> {
    session: &'a Session,
}

impl<'a> SessionCartStore<'a> {
    /// Wrap a session as a cart store.
    #[must_use]
    pub const fn new(session: &'a Session) -> Self {
        Self { session }
    }
}

impl CartStore for SessionCartStore<'_> {
    async fn read(&self) -> Option<Cart> {
        match self.session.get::<Cart>(keys::CART).await {
            Ok(cart) => cart,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read cart from session");
                None
            }
        }
    }

    async fn write(&self, cart: &Cart) {
        if let Err(e) = self.session.insert(keys::CART, cart).await {
            tracing::warn!(error = %e, "failed to persist cart to session");
        }
    }
}

/// In-memory cart store for tests.
#[derive(Debug, Default)]
pub struct MemoryCartStore {
    inner: std::sync::Mutex<Option<Cart>>,
}

impl CartStore for MemoryCartStore {
    async fn read(&self) -> Option<Cart> {
        self.inner.lock().map_or(None, |guard| guard.clone())
    }

    async fn write(&self, cart: &Cart) {
        if let Ok(mut guard) = self.inner.lock() {
            *guard = Some(cart.clone());
        }
    }
}
