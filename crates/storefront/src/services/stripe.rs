//! Stripe API client for hosted checkout.
//!
//! Creates Checkout Sessions over the form-encoded REST API. The cart is
//! translated into `line_items` with inline `price_data` (the catalog is not
//! mirrored into Stripe products).

use reqwest::header::{HeaderMap, HeaderValue};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use secrecy::ExposeSecret;
use serde::Deserialize;
use thiserror::Error;

use pet_haven_core::cart::Cart;

use crate::config::StripeConfig;

/// Stripe API base URL.
const BASE_URL: &str = "https://api.stripe.com/v1";

/// Currency all prices are charged in.
const CURRENCY: &str = "usd";

/// Errors that can occur when interacting with the Stripe API.
#[derive(Debug, Error)]
pub enum StripeError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Checkout requested for an empty cart.
    #[error("cannot check out an empty cart")]
    EmptyCart,

    /// A line price does not convert to a positive whole number of cents.
    #[error("invalid amount for product {0}")]
    InvalidAmount(String),

    /// Failed to parse response.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// A created Checkout Session.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSession {
    /// Session id (`cs_...`), echoed on the success URL.
    pub id: String,
    /// Hosted payment page to redirect the customer to.
    pub url: String,
}

/// Stripe API client.
#[derive(Clone)]
pub struct StripeClient {
    client: reqwest::Client,
}

impl StripeClient {
    /// Create a new Stripe API client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &StripeConfig) -> Result<Self, StripeError> {
        let mut headers = HeaderMap::new();

        let auth_value = format!("Bearer {}", config.secret_key.expose_secret());
        let mut auth_header = HeaderValue::from_str(&auth_value)
            .map_err(|e| StripeError::Parse(format!("Invalid API key format: {e}")))?;
        auth_header.set_sensitive(true);
        headers.insert("Authorization", auth_header);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self { client })
    }

    /// Create a Checkout Session for the cart.
    ///
    /// `success_url` and `cancel_url` are absolute URLs the customer is sent
    /// back to after payment.
    ///
    /// # Errors
    ///
    /// Returns `StripeError::EmptyCart` if the cart has no items.
    /// Returns `StripeError::InvalidAmount` if a line does not convert to a
    /// positive whole number of cents.
    /// Returns `StripeError::Api` if Stripe rejects the request.
    pub async fn create_checkout_session(
        &self,
        cart: &Cart,
        success_url: &str,
        cancel_url: &str,
    ) -> Result<CheckoutSession, StripeError> {
        let form = build_session_form(cart, success_url, cancel_url)?;

        let url = format!("{BASE_URL}/checkout/sessions");
        let response = self.client.post(&url).form(&form).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StripeError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<CheckoutSession>()
            .await
            .map_err(|e| StripeError::Parse(e.to_string()))
    }
}

/// Build the form-encoded parameters for a Checkout Session.
///
/// Every cart line becomes a `line_items[i]` group with inline `price_data`.
fn build_session_form(
    cart: &Cart,
    success_url: &str,
    cancel_url: &str,
) -> Result<Vec<(String, String)>, StripeError> {
    if cart.is_empty() {
        return Err(StripeError::EmptyCart);
    }

    let mut form: Vec<(String, String)> = vec![
        ("mode".to_owned(), "payment".to_owned()),
        ("payment_method_types[0]".to_owned(), "card".to_owned()),
        ("success_url".to_owned(), success_url.to_owned()),
        ("cancel_url".to_owned(), cancel_url.to_owned()),
    ];

    for (i, item) in cart.items().iter().enumerate() {
        let unit_amount =
            to_cents(item.price).ok_or_else(|| StripeError::InvalidAmount(item.id.clone()))?;

        form.push((
            format!("line_items[{i}][price_data][currency]"),
            CURRENCY.to_owned(),
        ));
        form.push((
            format!("line_items[{i}][price_data][product_data][name]"),
            item.name.clone(),
        ));
        form.push((
            format!("line_items[{i}][price_data][unit_amount]"),
            unit_amount.to_string(),
        ));
        form.push((format!("line_items[{i}][quantity]"), item.quantity.to_string()));
    }

    Ok(form)
}

/// Convert a decimal price to a positive whole number of cents.
///
/// Stripe rejects free line items, so zero is invalid here too. Returns
/// `None` for non-positive prices and values that lose precision below one
/// cent.
fn to_cents(price: Decimal) -> Option<i64> {
    if price <= Decimal::ZERO {
        return None;
    }

    let cents = price.checked_mul(Decimal::from(100))?;
    if cents.fract() != Decimal::ZERO {
        return None;
    }

    cents.to_i64()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use pet_haven_core::cart::{GUEST_USER, NewCartItem};

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn cart_with(items: &[(&str, &str)]) -> Cart {
        let mut cart = Cart::new();
        for (id, price) in items {
            cart.add_item(NewCartItem {
                id: (*id).to_owned(),
                name: format!("Product {id}"),
                price: dec(price),
                image: format!("{id}.jpg"),
                user_id: GUEST_USER.to_owned(),
            });
        }
        cart
    }

    #[test]
    fn to_cents_whole_dollars() {
        assert_eq!(to_cents(dec("8.00")), Some(800));
        assert_eq!(to_cents(dec("10")), Some(1000));
    }

    #[test]
    fn to_cents_preserves_cent_precision() {
        assert_eq!(to_cents(dec("19.99")), Some(1999));
        assert_eq!(to_cents(dec("0.01")), Some(1));
    }

    #[test]
    fn to_cents_rejects_sub_cent_precision() {
        assert_eq!(to_cents(dec("1.999")), None);
    }

    #[test]
    fn to_cents_rejects_negative() {
        assert_eq!(to_cents(dec("-5.00")), None);
    }

    #[test]
    fn to_cents_rejects_zero() {
        assert_eq!(to_cents(dec("0.00")), None);
        assert_eq!(to_cents(Decimal::ZERO), None);
    }

    #[test]
    fn session_form_encodes_line_items() {
        let mut cart = cart_with(&[("p1", "8.99"), ("p2", "24.50")]);
        cart.update_quantity("p2", 3);

        let form = build_session_form(&cart, "https://shop.test/success", "https://shop.test/cart")
            .unwrap();

        let get = |key: &str| {
            form.iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
        };

        assert_eq!(get("mode"), Some("payment"));
        assert_eq!(get("payment_method_types[0]"), Some("card"));
        assert_eq!(get("success_url"), Some("https://shop.test/success"));
        assert_eq!(get("cancel_url"), Some("https://shop.test/cart"));

        assert_eq!(get("line_items[0][price_data][currency]"), Some("usd"));
        assert_eq!(
            get("line_items[0][price_data][product_data][name]"),
            Some("Product p1")
        );
        assert_eq!(get("line_items[0][price_data][unit_amount]"), Some("899"));
        assert_eq!(get("line_items[0][quantity]"), Some("1"));

        assert_eq!(get("line_items[1][price_data][unit_amount]"), Some("2450"));
        assert_eq!(get("line_items[1][quantity]"), Some("3"));
    }

    #[test]
    fn session_form_rejects_empty_cart() {
        let result = build_session_form(&Cart::new(), "https://s", "https://c");
        assert!(matches!(result, Err(StripeError::EmptyCart)));
    }

    #[test]
    fn session_form_rejects_free_line_item() {
        let cart = cart_with(&[("p1", "8.99"), ("freebie", "0.00")]);

        let result = build_session_form(&cart, "https://s", "https://c");
        assert!(matches!(result, Err(StripeError::InvalidAmount(id)) if id == "freebie"));
    }
}
