use axum::{Json, extract::State, http::StatusCode};
use escola_core::AppError;
use escola_models::{Grade, StudentProfileDto};
use tracing::instrument;

use super::service::StudentService;
use crate::middleware::auth::AuthUser;
use crate::modules::shared::{ErrorResponse, MessageResponse, SavedResponse};
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/aluno/alunos",
    responses(
        (status = 200, description = "Welcome message", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - students only", body = ErrorResponse)
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
pub async fn student_home(auth_user: AuthUser) -> Json<MessageResponse> {
    Json(MessageResponse::new(format!(
        "Bem-vindo, aluno {}",
        auth_user.username()
    )))
}

#[utoipa::path(
    post,
    path = "/aluno/infoalunos",
    request_body = StudentProfileDto,
    responses(
        (status = 201, description = "Profile saved", body = SavedResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - students only", body = ErrorResponse),
        (status = 404, description = "Student or classroom not found", body = ErrorResponse),
        (status = 409, description = "Profile already exists", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user, dto), fields(account_id = auth_user.account_id()))]
pub async fn save_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<StudentProfileDto>,
) -> Result<(StatusCode, Json<SavedResponse>), AppError> {
    let profile =
        StudentService::save_profile(state.store.as_ref(), auth_user.account_id(), dto).await?;

    Ok((
        StatusCode::CREATED,
        Json(SavedResponse::new("Informações salvas com sucesso", profile.id)),
    ))
}

#[utoipa::path(
    get,
    path = "/aluno/notas",
    responses(
        (status = 200, description = "The caller's grades", body = Vec<Grade>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - students only", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user), fields(account_id = auth_user.account_id()))]
pub async fn list_grades(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<Grade>>, AppError> {
    let grades = StudentService::list_grades(state.store.as_ref(), auth_user.account_id()).await?;
    Ok(Json(grades))
}
