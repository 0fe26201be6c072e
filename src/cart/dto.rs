use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cart::repo::{Cart, CartItem, CartItemDetail};
use crate::catalog::repo::{Product, ProductImage};

/// Body for PUT /cart/items. Quantity is a delta against any existing item
/// and may be negative.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PutCartItemRequest {
    pub product_id: Uuid,
    pub quantity: i32,
}

/// Body for PATCH /cart/items/:id. Quantity replaces the existing one.
#[derive(Debug, Deserialize)]
pub struct PatchCartItemRequest {
    pub quantity: i32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductImageResponse {
    pub id: Uuid,
    pub url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock_quantity: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryResponse>,
    /// Present (possibly empty) only on routes that embed images.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<ProductImageResponse>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemResponse {
    pub id: Uuid,
    pub cart_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub total_price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<ProductResponse>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub total_quantity: i32,
    pub total_price: Decimal,
    pub items: Vec<CartItemResponse>,
}

fn images_for(product_id: Uuid, images: &[ProductImage]) -> Vec<ProductImageResponse> {
    images
        .iter()
        .filter(|img| img.product_id == product_id)
        .map(|img| ProductImageResponse {
            id: img.id,
            url: img.url.clone(),
        })
        .collect()
}

impl CartResponse {
    pub fn assemble(cart: Cart, items: Vec<CartItemDetail>, images: Vec<ProductImage>) -> Self {
        let items = items
            .into_iter()
            .map(|detail| {
                let product_images = images_for(detail.product_id, &images);
                CartItemResponse {
                    id: detail.id,
                    cart_id: detail.cart_id,
                    product_id: detail.product_id,
                    quantity: detail.quantity,
                    total_price: detail.total_price,
                    product: Some(ProductResponse {
                        id: detail.product_id,
                        slug: detail.product_slug,
                        name: detail.product_name,
                        description: detail.product_description,
                        price: detail.product_price,
                        stock_quantity: detail.product_stock_quantity,
                        category: Some(CategoryResponse {
                            id: detail.category_id,
                            slug: detail.category_slug,
                            name: detail.category_name,
                        }),
                        images: Some(product_images),
                    }),
                }
            })
            .collect();
        Self {
            id: cart.id,
            user_id: cart.user_id,
            total_quantity: cart.total_quantity,
            total_price: cart.total_price,
            items,
        }
    }
}

impl CartItemResponse {
    /// Item with its product and images, as returned by the mutation routes.
    pub fn with_product(item: CartItem, product: Product, images: Vec<ProductImage>) -> Self {
        let product_images = images_for(product.id, &images);
        Self {
            id: item.id,
            cart_id: item.cart_id,
            product_id: item.product_id,
            quantity: item.quantity,
            total_price: item.total_price,
            product: Some(ProductResponse {
                id: product.id,
                slug: product.slug,
                name: product.name,
                description: product.description,
                price: product.price,
                stock_quantity: product.stock_quantity,
                category: None,
                images: Some(product_images),
            }),
        }
    }

    /// Item with a bare product embed (no images), as returned by the
    /// quantity-update route.
    pub fn with_product_only(item: CartItem, product: Product) -> Self {
        Self {
            id: item.id,
            cart_id: item.cart_id,
            product_id: item.product_id,
            quantity: item.quantity,
            total_price: item.total_price,
            product: Some(ProductResponse {
                id: product.id,
                slug: product.slug,
                name: product.name,
                description: product.description,
                price: product.price,
                stock_quantity: product.stock_quantity,
                category: None,
                images: None,
            }),
        }
    }

    /// Bare item, as returned after deletion.
    pub fn bare(item: CartItem) -> Self {
        Self {
            id: item.id,
            cart_id: item.cart_id,
            product_id: item.product_id,
            quantity: item.quantity,
            total_price: item.total_price,
            product: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;

    fn sample_cart(user_id: Uuid) -> Cart {
        Cart {
            id: Uuid::new_v4(),
            user_id,
            total_quantity: 0,
            total_price: Decimal::ZERO,
        }
    }

    #[test]
    fn fresh_cart_serializes_with_zero_totals_and_empty_items() {
        let cart = sample_cart(Uuid::new_v4());
        let response = CartResponse::assemble(cart, vec![], vec![]);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["totalQuantity"], 0);
        assert_eq!(json["totalPrice"], serde_json::json!("0"));
        assert!(json["items"].as_array().unwrap().is_empty());
    }

    #[test]
    fn item_response_embeds_product_and_images() {
        let product = Product {
            id: Uuid::new_v4(),
            slug: "butter-croissant".into(),
            name: "Butter Croissant".into(),
            description: None,
            price: "3.50".parse().unwrap(),
            stock_quantity: 40,
            category_id: Uuid::new_v4(),
            created_at: OffsetDateTime::now_utc(),
        };
        let item = CartItem {
            id: Uuid::new_v4(),
            cart_id: Uuid::new_v4(),
            product_id: product.id,
            quantity: 2,
            total_price: "7.00".parse().unwrap(),
        };
        let images = vec![ProductImage {
            id: Uuid::new_v4(),
            product_id: product.id,
            url: "https://images.bakeshop.dev/butter-croissant.jpg".into(),
        }];
        let json =
            serde_json::to_value(CartItemResponse::with_product(item, product, images)).unwrap();
        assert_eq!(json["quantity"], 2);
        assert_eq!(json["product"]["slug"], "butter-croissant");
        assert_eq!(json["product"]["images"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn product_only_projection_omits_images_key() {
        let product = Product {
            id: Uuid::new_v4(),
            slug: "baguette".into(),
            name: "Baguette".into(),
            description: None,
            price: "3.25".parse().unwrap(),
            stock_quantity: 50,
            category_id: Uuid::new_v4(),
            created_at: OffsetDateTime::now_utc(),
        };
        let item = CartItem {
            id: Uuid::new_v4(),
            cart_id: Uuid::new_v4(),
            product_id: product.id,
            quantity: 4,
            total_price: "13.00".parse().unwrap(),
        };
        let json = serde_json::to_value(CartItemResponse::with_product_only(item, product)).unwrap();
        assert_eq!(json["product"]["slug"], "baguette");
        assert!(json["product"].get("images").is_none());
        assert!(json["product"].get("category").is_none());
    }

    #[test]
    fn bare_item_omits_product() {
        let item = CartItem {
            id: Uuid::new_v4(),
            cart_id: Uuid::new_v4(),
            product_id: Uuid::new_v4(),
            quantity: 1,
            total_price: "3.50".parse().unwrap(),
        };
        let json = serde_json::to_value(CartItemResponse::bare(item)).unwrap();
        assert!(json.get("product").is_none());
        assert_eq!(json["totalPrice"], serde_json::json!("3.50"));
    }
}
