use axum::{Json, extract::State, http::StatusCode};
use escola_core::AppError;
use escola_models::{Classroom, CreateClassroomDto, CreateSubjectDto, Subject};
use tracing::instrument;

use super::service::CatalogService;
use crate::middleware::auth::AuthUser;
use crate::modules::shared::{ErrorResponse, MessageResponse};
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/admin/admin",
    responses(
        (status = 200, description = "Welcome message", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse)
    ),
    tag = "Admin",
    security(("bearer_auth" = []))
)]
pub async fn admin_home(auth_user: AuthUser) -> Json<MessageResponse> {
    Json(MessageResponse::new(format!(
        "Bem-vindo, administrador {}",
        auth_user.username()
    )))
}

#[utoipa::path(
    post,
    path = "/admin/criarsalas",
    request_body = CreateClassroomDto,
    responses(
        (status = 201, description = "Classroom created", body = Classroom),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 409, description = "Classroom already exists", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Admin",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_classroom(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateClassroomDto>,
) -> Result<(StatusCode, Json<Classroom>), AppError> {
    let classroom = CatalogService::create_classroom(state.store.as_ref(), dto).await?;
    Ok((StatusCode::CREATED, Json(classroom)))
}

#[utoipa::path(
    post,
    path = "/admin/criarmaterias",
    request_body = CreateSubjectDto,
    responses(
        (status = 201, description = "Subject created", body = Subject),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 409, description = "Subject already exists", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Admin",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_subject(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateSubjectDto>,
) -> Result<(StatusCode, Json<Subject>), AppError> {
    let subject = CatalogService::create_subject(state.store.as_ref(), dto).await?;
    Ok((StatusCode::CREATED, Json(subject)))
}

#[utoipa::path(
    get,
    path = "/admin/salas",
    responses(
        (status = 200, description = "All classrooms", body = Vec<Classroom>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse)
    ),
    tag = "Admin",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn list_classrooms(
    State(state): State<AppState>,
) -> Result<Json<Vec<Classroom>>, AppError> {
    let classrooms = CatalogService::list_classrooms(state.store.as_ref()).await?;
    Ok(Json(classrooms))
}

#[utoipa::path(
    get,
    path = "/admin/materias",
    responses(
        (status = 200, description = "All subjects", body = Vec<Subject>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse)
    ),
    tag = "Admin",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn list_subjects(State(state): State<AppState>) -> Result<Json<Vec<Subject>>, AppError> {
    let subjects = CatalogService::list_subjects(state.store.as_ref()).await?;
    Ok(Json(subjects))
}
