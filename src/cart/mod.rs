use crate::state::AppState;
use axum::Router;

mod dto;
pub mod extractors;
pub mod handlers;
pub mod repo;
mod services;

pub fn router() -> Router<AppState> {
    handlers::cart_routes()
}
