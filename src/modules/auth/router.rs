use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{current_user, login, register};
use crate::state::AppState;

/// Ungated routes, mounted at the root.
pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/", get(current_user))
        .route("/auth", post(register))
        .route("/auth/", post(register))
        .route("/auth/token", post(login))
}
