use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use escola_core::AppError;
use escola_models::{LoginForm, RegisterAccountDto, RegisteredAccount, TokenResponse};
use tracing::instrument;

use super::model::CurrentUserResponse;
use super::service::AuthService;
use crate::middleware::auth::AuthUser;
use crate::modules::shared::ErrorResponse;
use crate::state::AppState;
use crate::validator::{RequiredForm, ValidatedJson};

/// Register a new account
#[utoipa::path(
    post,
    path = "/auth",
    request_body = RegisterAccountDto,
    responses(
        (status = 201, description = "Account registered", body = RegisteredAccount),
        (status = 400, description = "Malformed body or missing field", body = ErrorResponse),
        (status = 409, description = "Username already registered", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterAccountDto>,
) -> Result<(StatusCode, Json<RegisteredAccount>), AppError> {
    let account = AuthService::register(state.store.as_ref(), &state.password_config, dto).await?;
    Ok((StatusCode::CREATED, Json(account)))
}

/// Log in with a username and password and receive a bearer token
#[utoipa::path(
    post,
    path = "/auth/token",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 400, description = "Malformed form", body = ErrorResponse),
        (status = 401, description = "Authentication failed", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, form))]
pub async fn login(
    State(state): State<AppState>,
    RequiredForm(form): RequiredForm<LoginForm>,
) -> Result<Json<TokenResponse>, AppError> {
    let token = AuthService::login(state.store.as_ref(), &state.jwt_config, form).await?;
    Ok(Json(token))
}

/// Identity carried by the caller's token
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Authenticated caller", body = CurrentUserResponse),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorResponse)
    ),
    tag = "Authentication",
    security(("bearer_auth" = []))
)]
#[instrument(skip(auth_user), fields(username = %auth_user.username()))]
pub async fn current_user(auth_user: AuthUser) -> Json<CurrentUserResponse> {
    Json(CurrentUserResponse { user: auth_user.0 })
}
