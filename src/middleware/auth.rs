use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use escola_auth::{Identity, verify_token};
use escola_core::AppError;

use crate::state::AppState;

/// Extractor that verifies the bearer token and yields the caller's identity.
///
/// Role gates store the identity they verified in the request extensions,
/// so handlers behind a gate reuse it instead of decoding the token again.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Identity);

impl AuthUser {
    pub fn account_id(&self) -> i64 {
        self.0.id
    }

    pub fn username(&self) -> &str {
        &self.0.username
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(identity) = parts.extensions.get::<Identity>() {
            return Ok(AuthUser(identity.clone()));
        }

        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| AppError::unauthorized("Not authenticated".to_string()))?;

        let identity = verify_token(bearer.token(), &state.jwt_config)?;

        Ok(AuthUser(identity))
    }
}
