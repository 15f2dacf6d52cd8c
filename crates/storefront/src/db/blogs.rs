//! Blog post repository.

use sqlx::PgPool;

use pet_haven_core::BlogPostId;

use super::RepositoryError;
use crate::models::BlogPost;

/// Repository for blog post database operations.
pub struct BlogRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> BlogRepository<'a> {
    /// Create a new blog repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List posts, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<BlogPost>, RepositoryError> {
        let posts = sqlx::query_as::<_, BlogPost>(
            r"
            SELECT id, title, content, author, image, tags, created_at, updated_at
            FROM blog_posts
            ORDER BY created_at DESC, id DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(posts)
    }

    /// Get a single post by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: BlogPostId) -> Result<Option<BlogPost>, RepositoryError> {
        let post = sqlx::query_as::<_, BlogPost>(
            r"
            SELECT id, title, content, author, image, tags, created_at, updated_at
            FROM blog_posts
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(post)
    }
}
