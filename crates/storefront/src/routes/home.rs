//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use crate::db::BlogRepository;
use crate::db::products::ProductFilter;
use crate::error::AppError;
use crate::filters;
use crate::models::{BlogPost, Product};
use crate::state::AppState;

/// How many products the home page features.
const FEATURED_COUNT: usize = 4;

/// How many recent articles the home page shows.
const RECENT_POST_COUNT: usize = 3;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub featured: Vec<Product>,
    pub posts: Vec<BlogPost>,
}

/// Display the home page: newest products plus recent articles.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> Result<HomeTemplate, AppError> {
    let mut featured = state.catalog().list(&ProductFilter::default()).await?;
    featured.truncate(FEATURED_COUNT);

    let mut posts = BlogRepository::new(state.pool()).list().await?;
    posts.truncate(RECENT_POST_COUNT);

    Ok(HomeTemplate { featured, posts })
}
