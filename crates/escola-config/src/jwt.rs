use std::env;

use crate::env_or;

/// Secret used when neither `SECRET_KEY` nor `JWT_SECRET` is set.
pub const DEVELOPMENT_SECRET: &str = "escola-development-secret-change-me";

/// Session tokens expire 20 minutes after issuance unless overridden.
pub const DEFAULT_ACCESS_TOKEN_EXPIRY: i64 = 20 * 60;

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    /// Lifetime of an access token, in seconds.
    pub access_token_expiry: i64,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            access_token_expiry: DEFAULT_ACCESS_TOKEN_EXPIRY,
        }
    }

    pub fn from_env() -> Self {
        Self {
            secret: env::var("SECRET_KEY")
                .or_else(|_| env::var("JWT_SECRET"))
                .unwrap_or_else(|_| DEVELOPMENT_SECRET.to_string()),
            access_token_expiry: env_or("JWT_ACCESS_EXPIRY", DEFAULT_ACCESS_TOKEN_EXPIRY),
        }
    }

    /// True when the server would sign tokens with the built-in development secret.
    pub fn uses_development_secret(&self) -> bool {
        self.secret == DEVELOPMENT_SECRET
    }
}
