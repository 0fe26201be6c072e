use anyhow::Context;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::catalog::data::SEED_PRODUCTS;
use crate::catalog::repo::Category;

/// Category slug: lowercased name with spaces replaced by hyphens.
pub(crate) fn slugify(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}

/// One-shot catalog seeder. Upserts are keyed by slug, so running it twice
/// leaves exactly one row per product.
pub async fn run(db: &PgPool) -> anyhow::Result<()> {
    for seed in SEED_PRODUCTS {
        let category = Category::upsert(db, &slugify(seed.category), seed.category).await?;

        let price: Decimal = seed
            .price
            .parse()
            .with_context(|| format!("invalid seed price for {}", seed.slug))?;

        let product_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO products (slug, name, description, price, stock_quantity, category_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (slug) DO UPDATE SET
                name = EXCLUDED.name,
                description = EXCLUDED.description,
                price = EXCLUDED.price,
                stock_quantity = EXCLUDED.stock_quantity,
                category_id = EXCLUDED.category_id
            RETURNING id
            "#,
        )
        .bind(seed.slug)
        .bind(seed.name)
        .bind(seed.description)
        .bind(price)
        .bind(seed.stock_quantity)
        .bind(category.id)
        .fetch_one(db)
        .await?;

        for url in seed.image_urls {
            sqlx::query(
                r#"
                INSERT INTO product_images (product_id, url)
                VALUES ($1, $2)
                ON CONFLICT (product_id, url) DO NOTHING
                "#,
            )
            .bind(product_id)
            .bind(url)
            .execute(db)
            .await?;
        }

        info!(product = seed.name, "seeded product");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_lowercases_and_hyphenates() {
        assert_eq!(slugify("Cold Drinks"), "cold-drinks");
        assert_eq!(slugify("Bread"), "bread");
        assert_eq!(slugify("Old World Rye Breads"), "old-world-rye-breads");
    }

    #[test]
    fn seed_prices_all_parse_as_decimals() {
        for seed in SEED_PRODUCTS {
            let price: Decimal = seed.price.parse().expect("seed price parses");
            assert!(price > Decimal::ZERO, "{} has non-positive price", seed.slug);
        }
    }

    #[test]
    fn seed_slugs_are_unique() {
        let mut slugs: Vec<_> = SEED_PRODUCTS.iter().map(|s| s.slug).collect();
        slugs.sort_unstable();
        slugs.dedup();
        assert_eq!(slugs.len(), SEED_PRODUCTS.len());
    }
}
