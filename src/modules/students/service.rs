use anyhow::anyhow;
use escola_core::AppError;
use escola_db::SchoolStore;
use escola_models::{Grade, Student, StudentProfile, StudentProfileDto};
use tracing::instrument;

pub struct StudentService;

impl StudentService {
    async fn student_for_account(
        store: &dyn SchoolStore,
        account_id: i64,
    ) -> Result<Student, AppError> {
        store
            .find_student_by_account(account_id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Student not found")))
    }

    /// Stores the caller's profile and places them in the classroom named by `sala`.
    #[instrument(skip(store, dto))]
    pub async fn save_profile(
        store: &dyn SchoolStore,
        account_id: i64,
        dto: StudentProfileDto,
    ) -> Result<StudentProfile, AppError> {
        let student = Self::student_for_account(store, account_id).await?;

        if store.find_student_profile(student.id).await?.is_some() {
            return Err(AppError::conflict(anyhow!("Student profile already exists")));
        }

        let classroom = store
            .find_classroom_by_name(dto.classroom.trim())
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Classroom not found")))?;

        let profile = dto.into_new_profile().map_err(AppError::unprocessable)?;
        let saved = store
            .create_student_profile(student.id, classroom.id, profile)
            .await?;

        tracing::info!(
            student_id = student.id,
            classroom_id = classroom.id,
            "Student profile saved"
        );
        Ok(saved)
    }

    #[instrument(skip(store))]
    pub async fn list_grades(
        store: &dyn SchoolStore,
        account_id: i64,
    ) -> Result<Vec<Grade>, AppError> {
        let student = Self::student_for_account(store, account_id).await?;
        Ok(store.list_grades(student.id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use escola_db::{AccountRepository, CatalogRepository, MemoryStore, StudentRepository};
    use escola_models::{NewAccount, Role};

    async fn student_account(store: &MemoryStore) -> i64 {
        store
            .create_account(NewAccount {
                username: "ana".to_string(),
                role: Role::Student,
                password_hash: "hash".to_string(),
            })
            .await
            .unwrap()
            .id
    }

    fn profile_dto(classroom: &str) -> StudentProfileDto {
        serde_json::from_value(serde_json::json!({
            "cpf": "529.982.247-25",
            "telefone": "(11) 98765-4321",
            "endereco": "rua das flores, 12",
            "data_nascimento": "2010-03-04",
            "email": "ana@escola.com",
            "serie": "primeiro ano",
            "sala": classroom,
            "nome_pai": "João",
            "nome_mae": "maria silva"
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_save_profile_places_student_in_classroom() {
        let store = MemoryStore::new();
        let account_id = student_account(&store).await;
        let classroom = store.create_classroom("1A").await.unwrap();

        let profile = StudentService::save_profile(&store, account_id, profile_dto("1a"))
            .await
            .unwrap();
        assert_eq!(profile.cpf, "52998224725");
        assert_eq!(profile.mother_name, "Maria Silva");

        let student = store.find_student_by_account(account_id).await.unwrap().unwrap();
        assert_eq!(student.classroom_id, Some(classroom.id));
    }

    #[tokio::test]
    async fn test_unknown_classroom_is_not_found() {
        let store = MemoryStore::new();
        let account_id = student_account(&store).await;

        let err = StudentService::save_profile(&store, account_id, profile_dto("9Z"))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_second_profile_is_conflict() {
        let store = MemoryStore::new();
        let account_id = student_account(&store).await;
        store.create_classroom("1A").await.unwrap();

        StudentService::save_profile(&store, account_id, profile_dto("1A"))
            .await
            .unwrap();
        let err = StudentService::save_profile(&store, account_id, profile_dto("1A"))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_account_without_student_record() {
        let store = MemoryStore::new();

        let err = StudentService::list_grades(&store, 42).await.unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }
}
