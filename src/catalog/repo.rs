use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock_quantity: i32,
    pub category_id: Uuid,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProductImage {
    pub id: Uuid,
    pub product_id: Uuid,
    pub url: String,
}

impl Product {
    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, slug, name, description, price, stock_quantity, category_id, created_at
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(product)
    }
}

impl ProductImage {
    /// Images for a set of products, one query for the whole cart.
    pub async fn list_for_products(
        db: &PgPool,
        product_ids: &[Uuid],
    ) -> anyhow::Result<Vec<ProductImage>> {
        let images = sqlx::query_as::<_, ProductImage>(
            r#"
            SELECT id, product_id, url
            FROM product_images
            WHERE product_id = ANY($1)
            "#,
        )
        .bind(product_ids)
        .fetch_all(db)
        .await?;
        Ok(images)
    }
}

impl Category {
    /// Create-or-update keyed by slug.
    pub async fn upsert(db: &PgPool, slug: &str, name: &str) -> anyhow::Result<Category> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (slug, name)
            VALUES ($1, $2)
            ON CONFLICT (slug) DO UPDATE SET name = EXCLUDED.name
            RETURNING id, slug, name
            "#,
        )
        .bind(slug)
        .bind(name)
        .fetch_one(db)
        .await?;
        Ok(category)
    }
}
