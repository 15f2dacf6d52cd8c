//! Seed the catalog and blog from a YAML file.
//!
//! The file holds two top-level lists, `products` and `blog_posts`. See
//! `data/seed.yaml` for the expected shape.

use std::path::Path;

use rust_decimal::Decimal;
use secrecy::ExposeSecret;
use serde::Deserialize;
use sqlx::PgPool;
use tracing::info;

use super::migrate::database_url;

/// A product entry in the seed file.
#[derive(Debug, Deserialize)]
struct SeedProduct {
    name: String,
    description: String,
    image: String,
    pet_type: String,
    pet_age: String,
    price: Decimal,
    category: String,
}

/// A blog post entry in the seed file.
#[derive(Debug, Deserialize)]
struct SeedBlogPost {
    title: String,
    content: String,
    author: String,
    image: String,
    #[serde(default)]
    tags: Vec<String>,
}

/// Top-level seed file structure.
#[derive(Debug, Deserialize)]
struct SeedFile {
    #[serde(default)]
    products: Vec<SeedProduct>,
    #[serde(default)]
    blog_posts: Vec<SeedBlogPost>,
}

/// Load seed data into the database.
///
/// With `clear` set, existing products and blog posts are deleted first.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or a database
/// operation fails.
pub async fn run(file_path: &str, clear: bool) -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let database_url = database_url()?;

    let path = Path::new(file_path);
    if !path.exists() {
        return Err(format!("File not found: {file_path}").into());
    }

    info!(path = %file_path, "Loading seed data from file");

    // Read and validate YAML before connecting to the database
    let content = tokio::fs::read_to_string(path).await?;
    let seed: SeedFile = serde_yaml::from_str(&content)?;

    info!(
        products = seed.products.len(),
        blog_posts = seed.blog_posts.len(),
        "Parsed seed file"
    );

    let pool = PgPool::connect(database_url.expose_secret()).await?;
    info!("Connected to database");

    if clear {
        info!("Clearing existing products and blog posts");
        sqlx::query("DELETE FROM products").execute(&pool).await?;
        sqlx::query("DELETE FROM blog_posts").execute(&pool).await?;
    }

    insert_products(&pool, &seed.products).await?;
    insert_blog_posts(&pool, &seed.blog_posts).await?;

    info!("Seeding complete!");
    Ok(())
}

async fn insert_products(pool: &PgPool, products: &[SeedProduct]) -> Result<(), sqlx::Error> {
    for product in products {
        sqlx::query(
            r"
            INSERT INTO products (name, description, image, pet_type, pet_age, price, category)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(&product.image)
        .bind(&product.pet_type)
        .bind(&product.pet_age)
        .bind(product.price)
        .bind(&product.category)
        .execute(pool)
        .await?;
    }

    info!(count = products.len(), "Inserted products");
    Ok(())
}

async fn insert_blog_posts(pool: &PgPool, posts: &[SeedBlogPost]) -> Result<(), sqlx::Error> {
    for post in posts {
        sqlx::query(
            r"
            INSERT INTO blog_posts (title, content, author, image, tags)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(&post.title)
        .bind(&post.content)
        .bind(&post.author)
        .bind(&post.image)
        .bind(&post.tags)
        .execute(pool)
        .await?;
    }

    info!(count = posts.len(), "Inserted blog posts");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn seed_file_parses_products_and_posts() {
        let yaml = r##"
products:
  - name: Rope Chew Toy
    description: Durable cotton rope for heavy chewers.
    image: /static/images/rope-toy.jpg
    pet_type: dog
    pet_age: adult
    price: "8.99"
    category: toys
blog_posts:
  - title: Feeding senior cats
    content: "# Older cats need fewer calories"
    author: Dana
    image: /static/images/senior-cat.jpg
    tags: [cats, nutrition]
"##;

        let seed: SeedFile = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(seed.products.len(), 1);
        assert_eq!(seed.products[0].price, "8.99".parse().unwrap());
        assert_eq!(seed.blog_posts.len(), 1);
        assert_eq!(seed.blog_posts[0].tags, vec!["cats", "nutrition"]);
    }

    #[test]
    fn seed_file_sections_default_to_empty() {
        let seed: SeedFile = serde_yaml::from_str("products: []").unwrap();
        assert!(seed.products.is_empty());
        assert!(seed.blog_posts.is_empty());
    }
}
