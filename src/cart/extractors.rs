use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::{
    auth::extractors::CurrentUser, auth::repo::User, cart::repo::Cart, error::ApiError,
    state::AppState,
};

/// Cart gateway: runs the auth gateway, then loads or lazily creates the
/// authenticated user's cart.
pub struct CurrentCart {
    pub user: User,
    pub cart: Cart,
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentCart {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;
        let cart = Cart::find_or_create(&state.db, user.id)
            .await
            .map_err(|e| ApiError::internal("Failed to get authenticated user's cart", e))?;
        Ok(CurrentCart { user, cart })
    }
}
