use anyhow::anyhow;
use chrono::Utc;
use escola_core::AppError;
use escola_db::SchoolStore;
use escola_models::{
    Grade, NewGrade, RecordGradeDto, Teacher, TeacherProfileDto, TeacherProfileWithAssignments,
};
use tracing::instrument;

use crate::metrics::track_grade_recorded;

pub struct TeacherService;

fn dedup(ids: &[i64]) -> Vec<i64> {
    let mut ids = ids.to_vec();
    ids.sort_unstable();
    ids.dedup();
    ids
}

impl TeacherService {
    async fn teacher_for_account(
        store: &dyn SchoolStore,
        account_id: i64,
    ) -> Result<Teacher, AppError> {
        store
            .find_teacher_by_account(account_id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Teacher not found")))
    }

    /// Stores the caller's profile and replaces their classroom and subject
    /// assignments.
    ///
    /// Unknown ids are skipped, but at least one classroom and one subject
    /// must exist.
    #[instrument(skip(store, dto))]
    pub async fn save_profile(
        store: &dyn SchoolStore,
        account_id: i64,
        dto: TeacherProfileDto,
    ) -> Result<TeacherProfileWithAssignments, AppError> {
        let teacher = Self::teacher_for_account(store, account_id).await?;

        if store.find_teacher_profile(teacher.id).await?.is_some() {
            return Err(AppError::conflict(anyhow!("Teacher profile already exists")));
        }

        let classroom_ids = dedup(&dto.classroom_ids);
        if store.find_classrooms_by_ids(&classroom_ids).await?.is_empty() {
            return Err(AppError::not_found(anyhow!("Classrooms not found")));
        }
        let subject_ids = dedup(&dto.subject_ids);
        if store.find_subjects_by_ids(&subject_ids).await?.is_empty() {
            return Err(AppError::not_found(anyhow!("Subjects not found")));
        }

        let profile = dto.into_new_profile().map_err(AppError::unprocessable)?;
        let saved = store
            .create_teacher_profile(teacher.id, profile, &classroom_ids, &subject_ids)
            .await?;

        tracing::info!(
            teacher_id = teacher.id,
            classrooms = saved.classrooms.len(),
            subjects = saved.subjects.len(),
            "Teacher profile saved"
        );
        Ok(saved)
    }

    /// Records a grade dated today. The caller must teach the subject.
    #[instrument(skip(store))]
    pub async fn record_grade(
        store: &dyn SchoolStore,
        account_id: i64,
        dto: RecordGradeDto,
    ) -> Result<Grade, AppError> {
        let teacher = Self::teacher_for_account(store, account_id).await?;

        if store.find_student(dto.student_id).await?.is_none() {
            return Err(AppError::not_found(anyhow!("Student not found")));
        }
        if store.find_subject(dto.subject_id).await?.is_none() {
            return Err(AppError::not_found(anyhow!("Subject not found")));
        }
        if !store.teaches_subject(teacher.id, dto.subject_id).await? {
            tracing::warn!(
                teacher_id = teacher.id,
                subject_id = dto.subject_id,
                "Grade rejected: teacher does not teach subject"
            );
            return Err(AppError::forbidden(
                "You do not teach this subject".to_string(),
            ));
        }

        let grade = store
            .record_grade(NewGrade {
                student_id: dto.student_id,
                teacher_id: teacher.id,
                subject_id: dto.subject_id,
                value: dto.value,
                recorded_on: Utc::now().date_naive(),
            })
            .await?;

        track_grade_recorded();
        Ok(grade)
    }
}
