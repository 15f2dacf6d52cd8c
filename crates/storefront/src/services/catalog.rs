//! Cached catalog reads.
//!
//! Wraps the product repository with a `moka` in-memory cache (5-minute TTL)
//! so the listing and detail pages don't hit `PostgreSQL` on every request.

use std::time::Duration;

use moka::future::Cache;
use sqlx::PgPool;
use tracing::debug;

use pet_haven_core::ProductId;

use crate::db::RepositoryError;
use crate::db::products::{ProductFilter, ProductRepository};
use crate::models::Product;

/// Cache TTL for catalog reads.
const CACHE_TTL: Duration = Duration::from_secs(300);

#[derive(Debug, Clone)]
enum CacheValue {
    Product(Box<Product>),
    Products(Vec<Product>),
    Facet(Vec<String>),
}

/// Catalog service with read-through caching.
#[derive(Clone)]
pub struct CatalogService {
    pool: PgPool,
    cache: Cache<String, CacheValue>,
}

impl CatalogService {
    /// Create a new catalog service.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(CACHE_TTL)
            .build();

        Self { pool, cache }
    }

    /// List products matching the filter, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>, RepositoryError> {
        let cache_key = format!(
            "products:{}:{}",
            filter.pet_type.as_deref().unwrap_or("*"),
            filter.category.as_deref().unwrap_or("*"),
        );

        if let Some(CacheValue::Products(products)) = self.cache.get(&cache_key).await {
            debug!("Cache hit for product list");
            return Ok(products);
        }

        let products = ProductRepository::new(&self.pool).list(filter).await?;

        self.cache
            .insert(cache_key, CacheValue::Products(products.clone()))
            .await;

        Ok(products)
    }

    /// Get a single product by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no such product exists.
    pub async fn get(&self, id: ProductId) -> Result<Product, RepositoryError> {
        let cache_key = format!("product:{id}");

        if let Some(CacheValue::Product(product)) = self.cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let product = ProductRepository::new(&self.pool)
            .get_by_id(id)
            .await?
            .ok_or(RepositoryError::NotFound)?;

        self.cache
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }

    /// Distinct pet types for the filter UI.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn pet_types(&self) -> Result<Vec<String>, RepositoryError> {
        self.facet("facet:pet_types", || async {
            ProductRepository::new(&self.pool).pet_types().await
        })
        .await
    }

    /// Distinct categories for the filter UI.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn categories(&self) -> Result<Vec<String>, RepositoryError> {
        self.facet("facet:categories", || async {
            ProductRepository::new(&self.pool).categories().await
        })
        .await
    }

    async fn facet<F, Fut>(&self, cache_key: &str, load: F) -> Result<Vec<String>, RepositoryError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<String>, RepositoryError>>,
    {
        if let Some(CacheValue::Facet(values)) = self.cache.get(cache_key).await {
            return Ok(values);
        }

        let values = load().await?;

        self.cache
            .insert(cache_key.to_owned(), CacheValue::Facet(values.clone()))
            .await;

        Ok(values)
    }
}
