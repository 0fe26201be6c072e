use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// Cart with denormalized running totals. The totals must always equal the
/// sum over the cart's items; every mutation below adjusts them inside the
/// same transaction as the item write.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Cart {
    pub id: Uuid,
    pub user_id: Uuid,
    pub total_quantity: i32,
    pub total_price: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CartItem {
    pub id: Uuid,
    pub cart_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub total_price: Decimal,
}

/// Cart item joined with its product and category, for cart reads.
#[derive(Debug, Clone, FromRow)]
pub struct CartItemDetail {
    pub id: Uuid,
    pub cart_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub total_price: Decimal,
    pub product_slug: String,
    pub product_name: String,
    pub product_description: Option<String>,
    pub product_price: Decimal,
    pub product_stock_quantity: i32,
    pub category_id: Uuid,
    pub category_slug: String,
    pub category_name: String,
}

impl Cart {
    pub async fn find_by_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Option<Cart>> {
        let cart = sqlx::query_as::<_, Cart>(
            r#"
            SELECT id, user_id, total_quantity, total_price
            FROM carts
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(db)
        .await?;
        Ok(cart)
    }

    /// Lazily create the user's cart on first read.
    pub async fn find_or_create(db: &PgPool, user_id: Uuid) -> anyhow::Result<Cart> {
        if let Some(cart) = Self::find_by_user(db, user_id).await? {
            return Ok(cart);
        }
        let cart = sqlx::query_as::<_, Cart>(
            r#"
            INSERT INTO carts (user_id)
            VALUES ($1)
            ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id
            RETURNING id, user_id, total_quantity, total_price
            "#,
        )
        .bind(user_id)
        .fetch_one(db)
        .await?;
        Ok(cart)
    }

    pub async fn list_items(db: &PgPool, cart_id: Uuid) -> anyhow::Result<Vec<CartItemDetail>> {
        let items = sqlx::query_as::<_, CartItemDetail>(
            r#"
            SELECT ci.id, ci.cart_id, ci.product_id, ci.quantity, ci.total_price,
                   p.slug AS product_slug, p.name AS product_name,
                   p.description AS product_description, p.price AS product_price,
                   p.stock_quantity AS product_stock_quantity,
                   c.id AS category_id, c.slug AS category_slug, c.name AS category_name
            FROM cart_items ci
            JOIN products p ON p.id = ci.product_id
            JOIN categories c ON c.id = p.category_id
            WHERE ci.cart_id = $1
            ORDER BY ci.id
            "#,
        )
        .bind(cart_id)
        .fetch_all(db)
        .await?;
        Ok(items)
    }
}

impl CartItem {
    pub async fn find_by_product(
        db: &PgPool,
        cart_id: Uuid,
        product_id: Uuid,
    ) -> anyhow::Result<Option<CartItem>> {
        let item = sqlx::query_as::<_, CartItem>(
            r#"
            SELECT id, cart_id, product_id, quantity, total_price
            FROM cart_items
            WHERE cart_id = $1 AND product_id = $2
            "#,
        )
        .bind(cart_id)
        .bind(product_id)
        .fetch_optional(db)
        .await?;
        Ok(item)
    }

    /// Cart item scoped to one cart; ownership check for the `:id` routes.
    pub async fn find_in_cart(
        db: &PgPool,
        cart_id: Uuid,
        item_id: Uuid,
    ) -> anyhow::Result<Option<CartItem>> {
        let item = sqlx::query_as::<_, CartItem>(
            r#"
            SELECT id, cart_id, product_id, quantity, total_price
            FROM cart_items
            WHERE id = $1 AND cart_id = $2
            "#,
        )
        .bind(item_id)
        .bind(cart_id)
        .fetch_optional(db)
        .await?;
        Ok(item)
    }

    /// Insert a new item and add its quantity/price to the cart totals,
    /// as one transaction.
    pub async fn insert(
        db: &PgPool,
        cart_id: Uuid,
        product_id: Uuid,
        quantity: i32,
        subtotal: Decimal,
    ) -> anyhow::Result<CartItem> {
        let mut tx = db.begin().await?;

        let item = sqlx::query_as::<_, CartItem>(
            r#"
            INSERT INTO cart_items (cart_id, product_id, quantity, total_price)
            VALUES ($1, $2, $3, $4)
            RETURNING id, cart_id, product_id, quantity, total_price
            "#,
        )
        .bind(cart_id)
        .bind(product_id)
        .bind(quantity)
        .bind(subtotal)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE carts
            SET total_quantity = total_quantity + $2, total_price = total_price + $3
            WHERE id = $1
            "#,
        )
        .bind(cart_id)
        .bind(quantity)
        .bind(subtotal)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(item)
    }

    /// Set the merged quantity/subtotal on an existing item and move the cart
    /// totals by the requested delta, as one transaction.
    pub async fn merge(
        db: &PgPool,
        cart_id: Uuid,
        item_id: Uuid,
        new_quantity: i32,
        new_subtotal: Decimal,
        delta_quantity: i32,
        delta_price: Decimal,
    ) -> anyhow::Result<CartItem> {
        let mut tx = db.begin().await?;

        let item = sqlx::query_as::<_, CartItem>(
            r#"
            UPDATE cart_items
            SET quantity = $2, total_price = $3
            WHERE id = $1
            RETURNING id, cart_id, product_id, quantity, total_price
            "#,
        )
        .bind(item_id)
        .bind(new_quantity)
        .bind(new_subtotal)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE carts
            SET total_quantity = total_quantity + $2, total_price = total_price + $3
            WHERE id = $1
            "#,
        )
        .bind(cart_id)
        .bind(delta_quantity)
        .bind(delta_price)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(item)
    }

    /// Delete the item (scoped to the cart) and decrement the cart totals by
    /// exactly the deleted quantity/price. Returns None when the item does
    /// not exist or belongs to another cart.
    pub async fn delete(
        db: &PgPool,
        cart_id: Uuid,
        item_id: Uuid,
    ) -> anyhow::Result<Option<CartItem>> {
        let mut tx = db.begin().await?;

        let item = sqlx::query_as::<_, CartItem>(
            r#"
            DELETE FROM cart_items
            WHERE id = $1 AND cart_id = $2
            RETURNING id, cart_id, product_id, quantity, total_price
            "#,
        )
        .bind(item_id)
        .bind(cart_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(item) = item else {
            tx.rollback().await?;
            return Ok(None);
        };

        sqlx::query(
            r#"
            UPDATE carts
            SET total_quantity = total_quantity - $2, total_price = total_price - $3
            WHERE id = $1
            "#,
        )
        .bind(cart_id)
        .bind(item.quantity)
        .bind(item.total_price)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(item))
    }

    /// Absolute-set: replace the item's quantity/subtotal and adjust the cart
    /// totals by the old/new difference, as one transaction.
    pub async fn set_quantity(
        db: &PgPool,
        cart_id: Uuid,
        item_id: Uuid,
        new_quantity: i32,
        new_subtotal: Decimal,
        quantity_diff: i64,
        price_diff: Decimal,
    ) -> anyhow::Result<CartItem> {
        let mut tx = db.begin().await?;

        sqlx::query(
            r#"
            UPDATE carts
            SET total_quantity = total_quantity + $2, total_price = total_price + $3
            WHERE id = $1
            "#,
        )
        .bind(cart_id)
        .bind(quantity_diff)
        .bind(price_diff)
        .execute(&mut *tx)
        .await?;

        let item = sqlx::query_as::<_, CartItem>(
            r#"
            UPDATE cart_items
            SET quantity = $2, total_price = $3
            WHERE id = $1
            RETURNING id, cart_id, product_id, quantity, total_price
            "#,
        )
        .bind(item_id)
        .bind(new_quantity)
        .bind(new_subtotal)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(item)
    }
}
