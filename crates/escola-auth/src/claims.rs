//! Session token claims.

use escola_models::Role;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Claims embedded in an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Username
    pub sub: String,
    /// Account id
    pub id: i64,
    pub ocupacao: Role,
    /// Expiration (Unix timestamp)
    pub exp: usize,
    /// Issued at (Unix timestamp)
    pub iat: usize,
}

/// Decoding target for incoming tokens. Every claim is optional here so
/// that a signed token with missing fields is reported as unauthenticated
/// rather than as a decoding failure.
#[derive(Debug, Deserialize)]
pub(crate) struct RawClaims {
    pub sub: Option<String>,
    pub id: Option<i64>,
    pub ocupacao: Option<Role>,
}

/// Who the caller is, as proven by a verified token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Identity {
    pub username: String,
    pub id: i64,
    #[serde(rename = "ocupacao")]
    pub role: Role,
}

impl Identity {
    pub fn has_any_role(&self, permitted: &[Role]) -> bool {
        permitted.contains(&self.role)
    }
}

impl From<Claims> for Identity {
    fn from(claims: Claims) -> Self {
        Self {
            username: claims.sub,
            id: claims.id,
            role: claims.ocupacao,
        }
    }
}
