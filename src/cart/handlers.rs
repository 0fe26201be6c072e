use axum::{
    extract::{Path, State},
    routing::{delete, get, put},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    cart::{
        dto::{CartItemResponse, CartResponse, PatchCartItemRequest, PutCartItemRequest},
        extractors::CurrentCart,
        repo::{Cart, CartItem},
        services::{plan_put, subtotal, PutPlan},
    },
    catalog::repo::{Product, ProductImage},
    error::ApiError,
    state::AppState,
};

pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/cart", get(get_cart))
        .route("/cart/items", put(put_item))
        .route(
            "/cart/items/:id",
            delete(delete_item).patch(patch_item_quantity),
        )
}

#[instrument(skip(state, ctx), fields(user_id = %ctx.user.id))]
pub async fn get_cart(
    State(state): State<AppState>,
    ctx: CurrentCart,
) -> Result<Json<CartResponse>, ApiError> {
    let items = Cart::list_items(&state.db, ctx.cart.id)
        .await
        .map_err(|e| ApiError::internal("Failed to get authenticated user's cart", e))?;

    let product_ids: Vec<Uuid> = items.iter().map(|i| i.product_id).collect();
    let images = ProductImage::list_for_products(&state.db, &product_ids)
        .await
        .map_err(|e| ApiError::internal("Failed to get authenticated user's cart", e))?;

    Ok(Json(CartResponse::assemble(ctx.cart, items, images)))
}

#[instrument(skip(state, ctx, payload), fields(user_id = %ctx.user.id, product_id = %payload.product_id))]
pub async fn put_item(
    State(state): State<AppState>,
    ctx: CurrentCart,
    Json(payload): Json<PutCartItemRequest>,
) -> Result<Json<CartItemResponse>, ApiError> {
    let product = Product::find_by_id(&state.db, payload.product_id)
        .await
        .map_err(|e| ApiError::internal("Failed to add product to cart", e))?
        .ok_or_else(|| ApiError::bad_request("Product not found"))?;

    let existing = CartItem::find_by_product(&state.db, ctx.cart.id, product.id)
        .await
        .map_err(|e| ApiError::internal("Failed to add product to cart", e))?;

    let plan = plan_put(
        existing.as_ref().map(|i| i.quantity),
        payload.quantity,
        product.stock_quantity,
        product.price,
    )?;

    let item = match plan {
        PutPlan::Insert { quantity, subtotal } => {
            CartItem::insert(&state.db, ctx.cart.id, product.id, quantity, subtotal)
                .await
                .map_err(|e| ApiError::internal("Failed to add product to cart", e))?
        }
        PutPlan::Merge {
            new_quantity,
            new_subtotal,
            delta_quantity,
            delta_price,
        } => {
            // plan_put yields Merge only when an existing item was found
            let existing = existing.ok_or_else(|| {
                ApiError::internal(
                    "Failed to add product to cart",
                    anyhow::anyhow!("cart item disappeared during merge"),
                )
            })?;
            CartItem::merge(
                &state.db,
                ctx.cart.id,
                existing.id,
                new_quantity,
                new_subtotal,
                delta_quantity,
                delta_price,
            )
            .await
            .map_err(|e| ApiError::internal("Failed to add product to cart", e))?
        }
    };

    let images = ProductImage::list_for_products(&state.db, &[product.id])
        .await
        .map_err(|e| ApiError::internal("Failed to add product to cart", e))?;

    info!(item_id = %item.id, quantity = item.quantity, "cart item upserted");
    Ok(Json(CartItemResponse::with_product(item, product, images)))
}

#[instrument(skip(state, ctx), fields(user_id = %ctx.user.id, item_id = %id))]
pub async fn delete_item(
    State(state): State<AppState>,
    ctx: CurrentCart,
    Path(id): Path<Uuid>,
) -> Result<Json<CartItemResponse>, ApiError> {
    let item = CartItem::delete(&state.db, ctx.cart.id, id)
        .await
        .map_err(|e| ApiError::internal("Failed to remove product from cart", e))?
        .ok_or_else(|| ApiError::not_found("Cart item not found"))?;

    info!(quantity = item.quantity, "cart item removed");
    Ok(Json(CartItemResponse::bare(item)))
}

#[instrument(skip(state, ctx, payload), fields(user_id = %ctx.user.id, item_id = %id))]
pub async fn patch_item_quantity(
    State(state): State<AppState>,
    ctx: CurrentCart,
    Path(id): Path<Uuid>,
    Json(payload): Json<PatchCartItemRequest>,
) -> Result<Json<CartItemResponse>, ApiError> {
    let item = CartItem::find_in_cart(&state.db, ctx.cart.id, id)
        .await
        .map_err(|e| ApiError::internal("Failed to update product quantity in cart", e))?
        .ok_or_else(|| ApiError::not_found("Cart item not found"))?;

    let product = Product::find_by_id(&state.db, item.product_id)
        .await
        .map_err(|e| ApiError::internal("Failed to update product quantity in cart", e))?
        .ok_or_else(|| ApiError::not_found("Product not found"))?;

    // Absolute-set semantics; deliberately no stock bound here. The diff is
    // widened to i64 so extreme quantities surface as a store error rather
    // than overflowing.
    let new_subtotal = subtotal(product.price, payload.quantity);
    let quantity_diff = i64::from(payload.quantity) - i64::from(item.quantity);
    let price_diff = new_subtotal - item.total_price;

    let updated = CartItem::set_quantity(
        &state.db,
        ctx.cart.id,
        item.id,
        payload.quantity,
        new_subtotal,
        quantity_diff,
        price_diff,
    )
    .await
    .map_err(|e| ApiError::internal("Failed to update product quantity in cart", e))?;

    info!(quantity = updated.quantity, "cart item quantity set");
    Ok(Json(CartItemResponse::with_product_only(updated, product)))
}
