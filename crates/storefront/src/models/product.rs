//! Product catalog domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use pet_haven_core::ProductId;

/// A catalog product.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Long-form description.
    pub description: String,
    /// Image URL or path under `/static`.
    pub image: String,
    /// Animal the product is for (e.g., "dog", "cat").
    pub pet_type: String,
    /// Life stage the product targets (e.g., "puppy", "adult", "senior").
    pub pet_age: String,
    /// Unit price in the shop currency.
    pub price: Decimal,
    /// Merchandising category (e.g., "food", "toys", "grooming").
    pub category: String,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Stable string form of the id, used as the cart line key.
    #[must_use]
    pub fn cart_key(&self) -> String {
        self.id.to_string()
    }
}
