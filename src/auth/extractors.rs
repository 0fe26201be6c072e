use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};

use crate::{auth::jwt::JwtKeys, auth::repo::User, error::ApiError, state::AppState};

/// Bearer-token gateway: verifies the JWT and loads the corresponding user.
///
/// Authorization: Bearer <token>
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::unauthorized("Authorization header not found"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApiError::unauthorized("Token not found"))?;

        let keys = JwtKeys::from_ref(state);
        let claims = keys
            .verify(token)
            .map_err(|_| ApiError::unauthorized("Invalid token"))?;

        let user = User::find_by_id(&state.db, claims.sub)
            .await
            .map_err(|e| ApiError::internal("Failed to load user", e))?
            .ok_or_else(|| ApiError::unauthorized("User not found"))?;

        Ok(CurrentUser(user))
    }
}
