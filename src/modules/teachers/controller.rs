use axum::{Json, extract::State, http::StatusCode};
use escola_core::AppError;
use escola_models::{RecordGradeDto, TeacherProfileDto};
use tracing::instrument;

use super::service::TeacherService;
use crate::middleware::auth::AuthUser;
use crate::modules::shared::{ErrorResponse, MessageResponse, SavedResponse};
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/professor/professor",
    responses(
        (status = 200, description = "Welcome message", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - teachers only", body = ErrorResponse)
    ),
    tag = "Teachers",
    security(("bearer_auth" = []))
)]
pub async fn teacher_home(auth_user: AuthUser) -> Json<MessageResponse> {
    Json(MessageResponse::new(format!(
        "Bem-vindo, professor {}",
        auth_user.username()
    )))
}

#[utoipa::path(
    post,
    path = "/professor/infoprofessor",
    request_body = TeacherProfileDto,
    responses(
        (status = 201, description = "Profile saved", body = SavedResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - teachers only", body = ErrorResponse),
        (status = 404, description = "Teacher, classrooms or subjects not found", body = ErrorResponse),
        (status = 409, description = "Profile already exists", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Teachers",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user, dto), fields(account_id = auth_user.account_id()))]
pub async fn save_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<TeacherProfileDto>,
) -> Result<(StatusCode, Json<SavedResponse>), AppError> {
    let saved =
        TeacherService::save_profile(state.store.as_ref(), auth_user.account_id(), dto).await?;

    Ok((
        StatusCode::CREATED,
        Json(SavedResponse::new(
            "Informações salvas com sucesso",
            saved.profile.id,
        )),
    ))
}

#[utoipa::path(
    post,
    path = "/professor/lancarnotas",
    request_body = RecordGradeDto,
    responses(
        (status = 201, description = "Grade recorded", body = SavedResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Not a teacher, or does not teach the subject", body = ErrorResponse),
        (status = 404, description = "Teacher, student or subject not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Teachers",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user), fields(account_id = auth_user.account_id()))]
pub async fn record_grade(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<RecordGradeDto>,
) -> Result<(StatusCode, Json<SavedResponse>), AppError> {
    let grade =
        TeacherService::record_grade(state.store.as_ref(), auth_user.account_id(), dto).await?;

    Ok((
        StatusCode::CREATED,
        Json(SavedResponse::new("Nota lançada com sucesso", grade.id)),
    ))
}
