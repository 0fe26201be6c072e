use axum::{
    extract::{FromRef, State},
    http::{HeaderMap, HeaderName},
    routing::post,
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginRequest, LoginResponse, PublicUser, RegisterRequest},
        jwt::JwtKeys,
        password::{hash_password, verify_password},
        repo::{NewUser, User},
        services::{avatar_url_for, is_valid_email},
    },
    error::ApiError,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

#[instrument(skip(state, payload), fields(username = %payload.username))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<PublicUser>, ApiError> {
    if let Some(email) = payload.email.as_deref() {
        if !is_valid_email(email) {
            warn!("invalid email");
            return Err(ApiError::bad_request("Invalid email"));
        }
    }

    let hash = hash_password(&payload.password)
        .map_err(|e| ApiError::internal("Failed to register new user", e))?;

    let avatar_url = avatar_url_for(&payload.username);
    let user = User::create_with_password(
        &state.db,
        NewUser {
            username: &payload.username,
            email: payload.email.as_deref(),
            phone_number: payload.phone_number.as_deref(),
            full_name: payload.full_name.as_deref(),
            avatar_url: &avatar_url,
        },
        &hash,
    )
    .await
    .map_err(|e| ApiError::internal("Failed to register new user", e))?;

    info!(user_id = %user.id, "user registered");
    Ok(Json(PublicUser::from(user)))
}

#[instrument(skip(state, payload), fields(username = %payload.username))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<(HeaderMap, Json<LoginResponse>), ApiError> {
    let row = User::find_by_username_with_hash(&state.db, &payload.username)
        .await
        .map_err(|e| ApiError::internal("Failed to login user", e))?;

    let Some(row) = row else {
        warn!("login unknown username");
        return Err(ApiError::bad_request(format!(
            "Username \"{}\" is not found",
            payload.username
        )));
    };

    let Some(hash) = row.hash.as_deref() else {
        warn!(user_id = %row.user.id, "login user has no credential");
        return Err(ApiError::bad_request("User has no password"));
    };

    let ok = verify_password(&payload.password, hash)
        .map_err(|e| ApiError::internal("Failed to login user", e))?;
    if !ok {
        warn!(user_id = %row.user.id, "login invalid password");
        return Err(ApiError::bad_request("Sorry, password was incorrect."));
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys
        .sign(row.user.id)
        .map_err(|e| ApiError::internal("Failed to login user", e))?;

    let mut headers = HeaderMap::new();
    headers.insert(
        HeaderName::from_static("token"),
        token
            .parse()
            .map_err(|e| ApiError::internal("Failed to login user", anyhow::Error::new(e)))?,
    );

    info!(user_id = %row.user.id, "user logged in");
    Ok((
        headers,
        Json(LoginResponse {
            user: PublicUser::from(row.user),
            token,
        }),
    ))
}
