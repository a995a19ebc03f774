//! Role gates for route groups.
//!
//! Each gate verifies the bearer token, checks the caller's role with
//! [`escola_auth::authorize`] and stores the [`Identity`] in the request
//! extensions for the handler's [`AuthUser`] extractor.
//!
//! ```rust,ignore
//! use axum::{Router, middleware};
//! use crate::middleware::role::require_admin;
//!
//! let admin_routes = Router::new()
//!     .route("/salas", get(list_classrooms))
//!     .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));
//! ```

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use escola_auth::{Identity, authorize};
use escola_core::AppError;
use escola_models::Role;

use crate::metrics::track_authorization_check;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Runs `next` only when the caller holds one of `allowed_roles`.
///
/// Missing or invalid token → 401; valid token with another role → 403.
pub async fn require_roles(
    State(state): State<AppState>,
    req: Request,
    next: Next,
    allowed_roles: &[Role],
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let AuthUser(identity) = AuthUser::from_request_parts(&mut parts, &state).await?;
    let role = identity.role;

    let identity = authorize(identity, allowed_roles).inspect_err(|_| {
        track_authorization_check(false, role);
    })?;
    track_authorization_check(true, role);

    parts.extensions.insert::<Identity>(identity);
    let req = Request::from_parts(parts, body);
    Ok(next.run(req).await)
}

pub async fn require_admin(State(state): State<AppState>, req: Request, next: Next) -> Response {
    require_roles(State(state), req, next, &[Role::Admin])
        .await
        .unwrap_or_else(IntoResponse::into_response)
}

pub async fn require_student(State(state): State<AppState>, req: Request, next: Next) -> Response {
    require_roles(State(state), req, next, &[Role::Student])
        .await
        .unwrap_or_else(IntoResponse::into_response)
}

pub async fn require_teacher(State(state): State<AppState>, req: Request, next: Next) -> Response {
    require_roles(State(state), req, next, &[Role::Teacher])
        .await
        .unwrap_or_else(IntoResponse::into_response)
}
