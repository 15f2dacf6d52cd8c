//! Checkout route handlers.
//!
//! Checkout hands the cart to the payment gateway's hosted page. The cart is
//! only cleared on the success landing page, so an abandoned payment leaves
//! it intact.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use pet_haven_core::cart::Cart;

use crate::error::AppError;
use crate::filters;
use crate::routes::cart::{load_cart, save_cart};
use crate::state::AppState;

/// Query parameters on the success landing page.
#[derive(Debug, Deserialize)]
pub struct SuccessQuery {
    /// Checkout session id echoed back by the gateway.
    pub session_id: Option<String>,
}

/// Checkout success page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/success.html")]
pub struct CheckoutSuccessTemplate {}

/// Start checkout: create a payment session and redirect to its hosted page.
#[instrument(skip(state, session))]
pub async fn start(State(state): State<AppState>, session: Session) -> Result<Response, AppError> {
    let cart = load_cart(&session).await;

    if cart.is_empty() {
        return Ok(Redirect::to("/cart").into_response());
    }

    let base_url = &state.config().base_url;
    let success_url = format!("{base_url}/checkout/success?session_id={{CHECKOUT_SESSION_ID}}");
    let cancel_url = format!("{base_url}/cart");

    let checkout = state
        .stripe()
        .create_checkout_session(&cart, &success_url, &cancel_url)
        .await?;

    tracing::info!(session_id = %checkout.id, "created checkout session");

    Ok(Redirect::to(&checkout.url).into_response())
}

/// Post-payment landing page. Clears the cart.
#[instrument(skip(session))]
pub async fn success(
    session: Session,
    Query(query): Query<SuccessQuery>,
) -> impl IntoResponse {
    if let Some(session_id) = query.session_id {
        tracing::info!(%session_id, "checkout completed");
    }

    save_cart(&session, &Cart::new()).await;

    CheckoutSuccessTemplate {}
}
