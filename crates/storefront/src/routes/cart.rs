//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! The cart itself lives in the visitor's session: every handler loads it,
//! applies one mutation, and writes it back best-effort.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use pet_haven_core::ProductId;
use pet_haven_core::cart::{Cart, CartItem, GUEST_USER, NewCartItem};

use crate::cart::{CartStore, SessionCartStore, hydrate};
use crate::error::AppError;
use crate::filters;
use crate::models::{CurrentUser, session::keys};
use crate::state::AppState;

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub image: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u32,
}

impl CartView {
    /// Create an empty cart.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            subtotal: format_price(Decimal::ZERO),
            item_count: 0,
        }
    }
}

/// Format a decimal amount as a price string.
fn format_price(amount: Decimal) -> String {
    format!("${:.2}", amount.round_dp(2))
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.items().iter().map(CartItemView::from).collect(),
            subtotal: format_price(cart.subtotal()),
            item_count: cart.item_count(),
        }
    }
}

impl From<&CartItem> for CartItemView {
    fn from(item: &CartItem) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            image: item.image.clone(),
            quantity: item.quantity,
            price: format_price(item.price),
            line_price: format_price(item.line_total()),
        }
    }
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Load the cart from the session, reconciling with any stored copy.
pub async fn load_cart(session: &Session) -> Cart {
    let store = SessionCartStore::new(session);
    let mut cart = Cart::new();
    hydrate(&store, &mut cart).await;
    cart
}

/// Persist the cart back to the session. Best-effort.
pub async fn save_cart(session: &Session, cart: &Cart) {
    SessionCartStore::new(session).write(cart).await;
}

/// Identity tag for new cart lines: the logged-in user's id, or guest.
async fn cart_user_id(session: &Session) -> String {
    session
        .get::<CurrentUser>(keys::CURRENT_USER)
        .await
        .ok()
        .flatten()
        .map_or_else(|| GUEST_USER.to_owned(), |user| user.id.to_string())
}

// =============================================================================
// Form Types
// =============================================================================

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: i32,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: String,
    pub quantity: i64,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display cart page.
#[instrument(skip(session))]
pub async fn show(session: Session) -> impl IntoResponse {
    let cart = load_cart(&session).await;

    CartShowTemplate {
        cart: CartView::from(&cart),
    }
}

/// Add item to cart (HTMX).
///
/// Looks the product up in the catalog, snapshots its name, price and image
/// into the cart line, and returns an HTMX trigger to update the count badge.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<Response, AppError> {
    let product = state.catalog().get(ProductId::new(form.product_id)).await?;

    let mut cart = load_cart(&session).await;
    let user_id = cart_user_id(&session).await;

    cart.add_item(NewCartItem {
        id: product.cart_key(),
        name: product.name,
        price: product.price,
        image: product.image,
        user_id,
    });

    save_cart(&session, &cart).await;

    Ok((
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartCountTemplate {
            count: cart.item_count(),
        },
    )
        .into_response())
}

/// Update cart item quantity (HTMX).
///
/// A quantity of zero or below removes the line.
#[instrument(skip(session))]
pub async fn update(session: Session, Form(form): Form<UpdateCartForm>) -> Response {
    let mut cart = load_cart(&session).await;
    cart.update_quantity(&form.product_id, form.quantity);
    save_cart(&session, &cart).await;

    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate {
            cart: CartView::from(&cart),
        },
    )
        .into_response()
}

/// Remove item from cart (HTMX).
#[instrument(skip(session))]
pub async fn remove(session: Session, Form(form): Form<RemoveFromCartForm>) -> Response {
    let mut cart = load_cart(&session).await;
    cart.remove_item(&form.product_id);
    save_cart(&session, &cart).await;

    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate {
            cart: CartView::from(&cart),
        },
    )
        .into_response()
}

/// Empty the cart (HTMX).
#[instrument(skip(session))]
pub async fn clear(session: Session) -> Response {
    let mut cart = load_cart(&session).await;
    cart.clear();
    save_cart(&session, &cart).await;

    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate {
            cart: CartView::from(&cart),
        },
    )
        .into_response()
}

/// Cart count badge (HTMX fragment, polled after cart-updated events).
#[instrument(skip(session))]
pub async fn count(session: Session) -> impl IntoResponse {
    let cart = load_cart(&session).await;

    CartCountTemplate {
        count: cart.item_count(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn cart_view_formats_prices() {
        let mut cart = Cart::new();
        cart.add_item(NewCartItem {
            id: "1".to_owned(),
            name: "Chew Toy".to_owned(),
            price: "8.5".parse().unwrap(),
            image: "toy.jpg".to_owned(),
            user_id: GUEST_USER.to_owned(),
        });
        cart.update_quantity("1", 3);

        let view = CartView::from(&cart);
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.items[0].price, "$8.50");
        assert_eq!(view.items[0].line_price, "$25.50");
        assert_eq!(view.subtotal, "$25.50");
        assert_eq!(view.item_count, 3);
    }

    #[test]
    fn empty_cart_view_is_zeroed() {
        let view = CartView::empty();
        assert!(view.items.is_empty());
        assert_eq!(view.subtotal, "$0.00");
        assert_eq!(view.item_count, 0);
    }
}
