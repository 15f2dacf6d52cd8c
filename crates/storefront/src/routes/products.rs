//! Product catalog route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use tracing::instrument;

use pet_haven_core::ProductId;

use crate::db::products::ProductFilter;
use crate::error::AppError;
use crate::filters;
use crate::models::Product;
use crate::state::AppState;

/// Catalog filter query parameters.
#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    pub pet_type: Option<String>,
    pub category: Option<String>,
}

impl CatalogQuery {
    /// Convert to a repository filter, treating empty strings as unset.
    fn into_filter(self) -> ProductFilter {
        ProductFilter {
            pet_type: self.pet_type.filter(|s| !s.is_empty()),
            category: self.category.filter(|s| !s.is_empty()),
        }
    }
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub products: Vec<Product>,
    pub pet_types: Vec<String>,
    pub categories: Vec<String>,
    pub selected_pet_type: Option<String>,
    pub selected_category: Option<String>,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub product: Product,
}

/// Display the product listing, optionally filtered.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> Result<ProductsIndexTemplate, AppError> {
    let filter = query.into_filter();

    let products = state.catalog().list(&filter).await?;
    let pet_types = state.catalog().pet_types().await?;
    let categories = state.catalog().categories().await?;

    Ok(ProductsIndexTemplate {
        products,
        pet_types,
        categories,
        selected_pet_type: filter.pet_type,
        selected_category: filter.category,
    })
}

/// Display a single product.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<ProductShowTemplate, AppError> {
    let product = state.catalog().get(ProductId::new(id)).await?;

    Ok(ProductShowTemplate { product })
}
