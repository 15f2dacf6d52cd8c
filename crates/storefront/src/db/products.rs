//! Product repository.

use sqlx::PgPool;

use pet_haven_core::ProductId;

use super::RepositoryError;
use crate::models::Product;

/// Catalog filter accepted by the product listing.
///
/// All fields are optional and combine with AND.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Restrict to one animal (e.g., "dog").
    pub pet_type: Option<String>,
    /// Restrict to one merchandising category (e.g., "food").
    pub category: Option<String>,
}

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List products, newest first, optionally filtered.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>, RepositoryError> {
        let products = sqlx::query_as::<_, Product>(
            r"
            SELECT id, name, description, image, pet_type, pet_age,
                   price, category, created_at, updated_at
            FROM products
            WHERE ($1::text IS NULL OR pet_type = $1)
              AND ($2::text IS NULL OR category = $2)
            ORDER BY created_at DESC, id DESC
            ",
        )
        .bind(filter.pet_type.as_deref())
        .bind(filter.category.as_deref())
        .fetch_all(self.pool)
        .await?;

        Ok(products)
    }

    /// Get a single product by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(
            r"
            SELECT id, name, description, image, pet_type, pet_age,
                   price, category, created_at, updated_at
            FROM products
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(product)
    }

    /// Distinct pet types present in the catalog, for the filter UI.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn pet_types(&self) -> Result<Vec<String>, RepositoryError> {
        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT DISTINCT pet_type FROM products ORDER BY pet_type")
                .fetch_all(self.pool)
                .await?;

        Ok(rows.into_iter().map(|(t,)| t).collect())
    }

    /// Distinct categories present in the catalog, for the filter UI.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn categories(&self) -> Result<Vec<String>, RepositoryError> {
        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT DISTINCT category FROM products ORDER BY category")
                .fetch_all(self.pool)
                .await?;

        Ok(rows.into_iter().map(|(c,)| c).collect())
    }
}
