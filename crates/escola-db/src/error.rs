use anyhow::anyhow;
use escola_core::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A uniqueness rule was violated (username, classroom name, profile).
    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    NotFound(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl StoreError {
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }
}

/// Maps a unique-constraint violation to [`StoreError::Conflict`].
pub(crate) fn unique_violation(err: sqlx::Error, message: &str) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.is_unique_violation()
    {
        return StoreError::conflict(message);
    }
    StoreError::Database(err)
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(message) => AppError::conflict(anyhow!(message)),
            StoreError::NotFound(message) => AppError::not_found(anyhow!(message)),
            other => {
                tracing::error!(error = %other, "Store operation failed");
                AppError::internal_error("Internal server error".to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let conflict: AppError = StoreError::conflict("Username already registered").into();
        assert_eq!(conflict.status.as_u16(), 409);
        assert_eq!(conflict.message(), "Username already registered");

        let missing: AppError = StoreError::not_found("Classroom not found").into();
        assert_eq!(missing.status.as_u16(), 404);

        let internal: AppError = StoreError::Database(sqlx::Error::PoolTimedOut).into();
        assert_eq!(internal.status.as_u16(), 500);
        assert_eq!(internal.message(), "Internal server error");
    }
}
