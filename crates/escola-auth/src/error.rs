use anyhow::anyhow;
use escola_core::AppError;
use escola_db::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Account not found")]
    AccountNotFound,

    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Missing, malformed, expired or wrongly signed token.
    #[error("Invalid or expired token")]
    Unauthenticated,

    #[error("Insufficient permissions")]
    Forbidden,

    #[error("Failed to create token: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AccountNotFound => AppError::not_found(anyhow!(err.to_string())),
            AuthError::InvalidCredentials | AuthError::Unauthenticated => {
                AppError::unauthorized(err.to_string())
            }
            AuthError::Forbidden => AppError::forbidden(err.to_string()),
            AuthError::Store(store_err) => store_err.into(),
            AuthError::Token(_) | AuthError::Hash(_) => {
                tracing::error!(error = %err, "Credential service failure");
                AppError::internal_error("Internal server error".to_string())
            }
        }
    }
}
