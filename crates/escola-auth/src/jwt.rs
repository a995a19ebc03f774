use chrono::{DateTime, Utc};
use escola_config::JwtConfig;
use escola_models::Role;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use crate::claims::{Claims, Identity, RawClaims};
use crate::error::AuthError;

/// Creates a signed access token valid for `jwt_config.access_token_expiry`
/// seconds from now.
///
/// # Example
///
/// ```ignore
/// let token = create_access_token(account.id, &account.username, account.role, &jwt_config)?;
/// ```
pub fn create_access_token(
    account_id: i64,
    username: &str,
    role: Role,
    jwt_config: &JwtConfig,
) -> Result<String, AuthError> {
    create_access_token_at(account_id, username, role, jwt_config, Utc::now())
}

/// Same as [`create_access_token`], issued at `issued_at` instead of now.
pub fn create_access_token_at(
    account_id: i64,
    username: &str,
    role: Role,
    jwt_config: &JwtConfig,
    issued_at: DateTime<Utc>,
) -> Result<String, AuthError> {
    let now = issued_at.timestamp();
    let exp = now + jwt_config.access_token_expiry;

    let claims = Claims {
        sub: username.to_string(),
        id: account_id,
        ocupacao: role,
        exp: exp.max(0) as usize,
        iat: now.max(0) as usize,
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )?;
    Ok(token)
}

/// Verifies signature and expiry (no leeway) and extracts the caller's identity.
///
/// # Errors
///
/// [`AuthError::Unauthenticated`] when the token is malformed, expired,
/// signed with another secret, or lacks `sub`, `id` or `ocupacao`.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Identity, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    let claims = decode::<RawClaims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| {
        tracing::debug!(error = %e, "Token rejected");
        AuthError::Unauthenticated
    })?;

    match (claims.sub, claims.id, claims.ocupacao) {
        (Some(username), Some(id), Some(role)) => Ok(Identity { username, id, role }),
        _ => Err(AuthError::Unauthenticated),
    }
}
