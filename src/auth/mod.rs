use crate::state::AppState;
use axum::Router;

pub mod dto;
pub mod extractors;
pub mod handlers;
pub mod password;
pub mod services;
pub mod session;
pub mod validation;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::session_routes())
        .merge(handlers::password_routes())
}
