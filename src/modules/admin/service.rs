use escola_core::AppError;
use escola_db::SchoolStore;
use escola_models::{Classroom, CreateClassroomDto, CreateSubjectDto, Subject};
use tracing::instrument;

/// Classroom and subject catalog, managed by administrators.
pub struct CatalogService;

impl CatalogService {
    #[instrument(skip(store))]
    pub async fn create_classroom(
        store: &dyn SchoolStore,
        dto: CreateClassroomDto,
    ) -> Result<Classroom, AppError> {
        let classroom = store.create_classroom(dto.name.trim()).await?;
        tracing::info!(classroom_id = classroom.id, "Classroom created");
        Ok(classroom)
    }

    #[instrument(skip(store))]
    pub async fn list_classrooms(store: &dyn SchoolStore) -> Result<Vec<Classroom>, AppError> {
        Ok(store.list_classrooms().await?)
    }

    #[instrument(skip(store))]
    pub async fn create_subject(
        store: &dyn SchoolStore,
        dto: CreateSubjectDto,
    ) -> Result<Subject, AppError> {
        let subject = store.create_subject(dto.name.trim()).await?;
        tracing::info!(subject_id = subject.id, "Subject created");
        Ok(subject)
    }

    #[instrument(skip(store))]
    pub async fn list_subjects(store: &dyn SchoolStore) -> Result<Vec<Subject>, AppError> {
        Ok(store.list_subjects().await?)
    }
}
