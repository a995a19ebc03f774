use escola_auth::{AuthError, authenticate, create_access_token, hash_password};
use escola_config::{JwtConfig, PasswordConfig};
use escola_core::AppError;
use escola_db::SchoolStore;
use escola_models::{LoginForm, NewAccount, RegisterAccountDto, RegisteredAccount, TokenResponse};
use tracing::instrument;

use crate::metrics::{
    track_account_registered, track_jwt_issued, track_login_failure, track_login_success,
};

pub struct AuthService;

impl AuthService {
    #[instrument(skip(store, password_config, dto), fields(username = %dto.username, role = %dto.role))]
    pub async fn register(
        store: &dyn SchoolStore,
        password_config: &PasswordConfig,
        dto: RegisterAccountDto,
    ) -> Result<RegisteredAccount, AppError> {
        let password_hash = hash_password(&dto.password, password_config.cost)?;

        let account = store
            .create_account(NewAccount {
                username: dto.username.trim().to_string(),
                role: dto.role,
                password_hash,
            })
            .await?;

        tracing::info!(account_id = account.id, "Account registered");
        track_account_registered(account.role);

        Ok(account)
    }

    /// Exchanges a username/password pair for a bearer token.
    ///
    /// Unknown usernames and wrong passwords produce the same 401.
    #[instrument(skip(store, jwt_config, form), fields(username = %form.username))]
    pub async fn login(
        store: &dyn SchoolStore,
        jwt_config: &JwtConfig,
        form: LoginForm,
    ) -> Result<TokenResponse, AppError> {
        let account = match authenticate(store, form.username.trim(), &form.password).await {
            Ok(account) => account,
            Err(AuthError::AccountNotFound) => return Err(login_failed("account_not_found")),
            Err(AuthError::InvalidCredentials) => return Err(login_failed("invalid_password")),
            Err(err) => return Err(err.into()),
        };

        let token = create_access_token(account.id, &account.username, account.role, jwt_config)?;

        track_login_success(account.role);
        track_jwt_issued();

        Ok(TokenResponse::bearer(token))
    }
}

fn login_failed(reason: &'static str) -> AppError {
    tracing::warn!(reason, "Login failed");
    track_login_failure(reason);
    AppError::unauthorized("Authentication failed".to_string())
}
