//! Blog domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pet_haven_core::BlogPostId;

/// A pet care article.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct BlogPost {
    /// Unique post ID.
    pub id: BlogPostId,
    /// Article title.
    pub title: String,
    /// Markdown body.
    pub content: String,
    /// Author display name.
    pub author: String,
    /// Header image URL or path under `/static`.
    pub image: String,
    /// Topic tags.
    pub tags: Vec<String>,
    /// When the post was created.
    pub created_at: DateTime<Utc>,
    /// When the post was last updated.
    pub updated_at: DateTime<Utc>,
}

impl BlogPost {
    /// A short plain-text excerpt for listing pages.
    #[must_use]
    pub fn excerpt(&self, max_chars: usize) -> String {
        let plain: String = self
            .content
            .chars()
            .map(|c| if c == '\n' { ' ' } else { c })
            .filter(|c| *c != '#' && *c != '*' && *c != '`')
            .collect();
        let trimmed = plain.trim();
        if trimmed.chars().count() <= max_chars {
            return trimmed.to_owned();
        }
        let cut: String = trimmed.chars().take(max_chars).collect();
        format!("{}…", cut.trim_end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(content: &str) -> BlogPost {
        BlogPost {
            id: BlogPostId::new(1),
            title: "t".to_owned(),
            content: content.to_owned(),
            author: "a".to_owned(),
            image: "i.jpg".to_owned(),
            tags: vec![],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn excerpt_short_content_untruncated() {
        assert_eq!(post("hello world").excerpt(80), "hello world");
    }

    #[test]
    fn excerpt_strips_markdown_markers_and_truncates() {
        let p = post("# Heading\nsome *bold* text that keeps going and going");
        let e = p.excerpt(20);
        assert!(!e.contains('#'));
        assert!(!e.contains('*'));
        assert!(e.ends_with('…'));
    }
}
