//! Blog route handlers.
//!
//! Article bodies are stored as markdown and rendered server-side with
//! comrak.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};
use tracing::instrument;

use pet_haven_core::BlogPostId;

use crate::db::BlogRepository;
use crate::error::AppError;
use crate::filters;
use crate::models::BlogPost;
use crate::state::AppState;

/// Excerpt length on the listing page.
const EXCERPT_CHARS: usize = 160;

/// A post with its listing excerpt, for the index template.
pub struct BlogPostPreview {
    pub post: BlogPost,
    pub excerpt: String,
}

/// Blog listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "blog/index.html")]
pub struct BlogIndexTemplate {
    pub previews: Vec<BlogPostPreview>,
}

/// Blog article page template.
#[derive(Template, WebTemplate)]
#[template(path = "blog/show.html")]
pub struct BlogShowTemplate {
    pub post: BlogPost,
    /// Markdown body rendered to sanitized HTML.
    pub content_html: String,
}

/// Display the article listing, newest first.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<BlogIndexTemplate, AppError> {
    let posts = BlogRepository::new(state.pool()).list().await?;

    let previews = posts
        .into_iter()
        .map(|post| BlogPostPreview {
            excerpt: post.excerpt(EXCERPT_CHARS),
            post,
        })
        .collect();

    Ok(BlogIndexTemplate { previews })
}

/// Display a single article with its markdown rendered.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<BlogShowTemplate, AppError> {
    let post = BlogRepository::new(state.pool())
        .get_by_id(BlogPostId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("blog post {id}")))?;

    let content_html = render_markdown(&post.content);

    Ok(BlogShowTemplate { post, content_html })
}

/// Render markdown to HTML with comrak's safe defaults.
///
/// Raw HTML in the source is escaped, not passed through.
fn render_markdown(markdown: &str) -> String {
    let options = comrak::Options::default();
    comrak::markdown_to_html(markdown, &options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_markdown_produces_headings() {
        let html = render_markdown("# Caring for senior dogs");
        assert!(html.contains("<h1>"));
        assert!(html.contains("Caring for senior dogs"));
    }

    #[test]
    fn render_markdown_escapes_raw_html() {
        let html = render_markdown("hello <script>alert(1)</script>");
        assert!(!html.contains("<script>"));
    }
}
