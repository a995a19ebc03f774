use escola_db::AccountRepository;
use escola_models::{Account, Role};
use tracing::instrument;

use crate::claims::Identity;
use crate::error::AuthError;
use crate::password::verify_password;

/// Checks a username/password pair against stored accounts.
///
/// # Errors
///
/// - [`AuthError::AccountNotFound`] when no account has this username
/// - [`AuthError::InvalidCredentials`] when the password does not match
/// - [`AuthError::Store`] when the lookup itself fails
#[instrument(skip(accounts, password))]
pub async fn authenticate<R>(
    accounts: &R,
    username: &str,
    password: &str,
) -> Result<Account, AuthError>
where
    R: AccountRepository + ?Sized,
{
    let account = accounts
        .find_account_by_username(username)
        .await?
        .ok_or(AuthError::AccountNotFound)?;

    if !verify_password(password, &account.password_hash)? {
        return Err(AuthError::InvalidCredentials);
    }

    Ok(account)
}

/// Passes `identity` through when its role is one of `permitted`.
pub fn authorize(identity: Identity, permitted: &[Role]) -> Result<Identity, AuthError> {
    if identity.has_any_role(permitted) {
        Ok(identity)
    } else {
        tracing::warn!(
            username = %identity.username,
            role = %identity.role,
            "Access denied: role not permitted"
        );
        Err(AuthError::Forbidden)
    }
}
