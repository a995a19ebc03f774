//! Repository ports. Each trait covers one area of the schema; [`SchoolStore`]
//! bundles them so application state can hold a single `Arc<dyn SchoolStore>`.

use async_trait::async_trait;
use escola_models::{
    Account, Classroom, Grade, NewAccount, NewGrade, NewStudentProfile, NewTeacherProfile,
    RegisteredAccount, Student, StudentProfile, Subject, Teacher, TeacherProfile,
    TeacherProfileWithAssignments,
};

use crate::error::StoreError;

pub type Result<T> = std::result::Result<T, StoreError>;

// Accounts and their role records
#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn find_account_by_username(&self, username: &str) -> Result<Option<Account>>;

    /// Creates the account and its role record in one unit. Students also
    /// get an enrollment number, returned in the result.
    ///
    /// Fails with [`StoreError::Conflict`] when the username is taken.
    async fn create_account(&self, account: NewAccount) -> Result<RegisteredAccount>;
}

#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn create_classroom(&self, name: &str) -> Result<Classroom>;
    async fn list_classrooms(&self) -> Result<Vec<Classroom>>;
    /// Case-insensitive match.
    async fn find_classroom_by_name(&self, name: &str) -> Result<Option<Classroom>>;
    async fn find_classrooms_by_ids(&self, ids: &[i64]) -> Result<Vec<Classroom>>;

    async fn create_subject(&self, name: &str) -> Result<Subject>;
    async fn list_subjects(&self) -> Result<Vec<Subject>>;
    async fn find_subject(&self, id: i64) -> Result<Option<Subject>>;
    async fn find_subjects_by_ids(&self, ids: &[i64]) -> Result<Vec<Subject>>;
}

#[async_trait]
pub trait StudentRepository: Send + Sync {
    async fn find_student_by_account(&self, account_id: i64) -> Result<Option<Student>>;
    async fn find_student(&self, id: i64) -> Result<Option<Student>>;
    async fn find_student_profile(&self, student_id: i64) -> Result<Option<StudentProfile>>;

    /// Stores the profile and places the student in `classroom_id`.
    async fn create_student_profile(
        &self,
        student_id: i64,
        classroom_id: i64,
        profile: NewStudentProfile,
    ) -> Result<StudentProfile>;

    async fn list_grades(&self, student_id: i64) -> Result<Vec<Grade>>;
}

#[async_trait]
pub trait TeacherRepository: Send + Sync {
    async fn find_teacher_by_account(&self, account_id: i64) -> Result<Option<Teacher>>;
    async fn find_teacher_profile(&self, teacher_id: i64) -> Result<Option<TeacherProfile>>;

    /// Stores the profile and replaces the teacher's classroom and subject
    /// assignments. Ids with no matching row are skipped.
    async fn create_teacher_profile(
        &self,
        teacher_id: i64,
        profile: NewTeacherProfile,
        classroom_ids: &[i64],
        subject_ids: &[i64],
    ) -> Result<TeacherProfileWithAssignments>;

    async fn teaches_subject(&self, teacher_id: i64, subject_id: i64) -> Result<bool>;
    async fn record_grade(&self, grade: NewGrade) -> Result<Grade>;
}

/// Everything the HTTP layer needs from storage.
pub trait SchoolStore:
    AccountRepository + CatalogRepository + StudentRepository + TeacherRepository
{
}

impl<T> SchoolStore for T where
    T: AccountRepository + CatalogRepository + StudentRepository + TeacherRepository
{
}
