//! PostgreSQL-backed store.

use async_trait::async_trait;
use escola_models::{
    Account, Classroom, Grade, NewAccount, NewGrade, NewStudentProfile, NewTeacherProfile,
    RegisteredAccount, Role, Student, StudentProfile, Subject, Teacher, TeacherProfile,
    TeacherProfileWithAssignments, generate_enrollment_number,
};
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::instrument;

use crate::MAX_ENROLLMENT_ATTEMPTS;
use crate::error::{StoreError, unique_violation};
use crate::repositories::{
    AccountRepository, CatalogRepository, Result, StudentRepository, TeacherRepository,
};

pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

const ENROLLMENT_NUMBER_CONSTRAINT: &str = "enrollments_number_key";

const ACCOUNT_COLUMNS: &str = "id, username, role, password_hash";
const STUDENT_PROFILE_COLUMNS: &str = "id, student_id, cpf, phone, address, birth_date, email, \
     school_year, father_name, mother_name";
const TEACHER_PROFILE_COLUMNS: &str =
    "id, teacher_id, cpf, phone, email, degree, specialization, birth_date, address";
const GRADE_COLUMNS: &str = "id, student_id, teacher_id, subject_id, value, recorded_on";

/// Initializes a PostgreSQL connection pool.
///
/// The returned pool is cheaply cloneable and shared across request handlers.
pub async fn init_db_pool(database_url: &str, max_connections: u32) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;
    Ok(pool)
}

#[derive(Clone, Debug)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        Ok(Self::new(init_db_pool(database_url, max_connections).await?))
    }

    /// Applies pending migrations from `migrations/`.
    pub async fn migrate(&self) -> Result<()> {
        MIGRATOR.run(&self.pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// One registration attempt. `Ok(None)` means the drawn enrollment
    /// number was already taken and the transaction was rolled back.
    async fn try_create_account(&self, account: &NewAccount) -> Result<Option<RegisteredAccount>> {
        let mut tx = self.pool.begin().await?;

        let created = sqlx::query_as::<_, Account>(&format!(
            "INSERT INTO accounts (username, role, password_hash) VALUES ($1, $2, $3) \
             RETURNING {ACCOUNT_COLUMNS}"
        ))
        .bind(&account.username)
        .bind(account.role)
        .bind(&account.password_hash)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| unique_violation(e, "Username already registered"))?;

        let enrollment_number = match created.role {
            Role::Admin => {
                sqlx::query("INSERT INTO admins (account_id) VALUES ($1)")
                    .bind(created.id)
                    .execute(&mut *tx)
                    .await?;
                None
            }
            Role::Teacher => {
                sqlx::query("INSERT INTO teachers (account_id) VALUES ($1)")
                    .bind(created.id)
                    .execute(&mut *tx)
                    .await?;
                None
            }
            Role::Student => {
                let student_id: i64 = sqlx::query_scalar(
                    "INSERT INTO students (account_id) VALUES ($1) RETURNING id",
                )
                .bind(created.id)
                .fetch_one(&mut *tx)
                .await?;

                let number = generate_enrollment_number(&mut rand::thread_rng());
                let inserted = sqlx::query("INSERT INTO enrollments (student_id, number) VALUES ($1, $2)")
                    .bind(student_id)
                    .bind(&number)
                    .execute(&mut *tx)
                    .await;

                match inserted {
                    Ok(_) => Some(number),
                    Err(sqlx::Error::Database(db_err))
                        if db_err.constraint() == Some(ENROLLMENT_NUMBER_CONSTRAINT) =>
                    {
                        return Ok(None);
                    }
                    Err(e) => return Err(e.into()),
                }
            }
        };

        tx.commit().await?;

        Ok(Some(RegisteredAccount {
            id: created.id,
            username: created.username,
            role: created.role,
            enrollment_number,
        }))
    }

    async fn assigned_classrooms(
        tx: &mut Transaction<'_, Postgres>,
        teacher_id: i64,
    ) -> Result<Vec<Classroom>> {
        let classrooms = sqlx::query_as::<_, Classroom>(
            r#"SELECT c.id, c.name FROM classrooms c
               JOIN teacher_classrooms tc ON tc.classroom_id = c.id
               WHERE tc.teacher_id = $1
               ORDER BY c.id"#,
        )
        .bind(teacher_id)
        .fetch_all(&mut **tx)
        .await?;
        Ok(classrooms)
    }

    async fn assigned_subjects(
        tx: &mut Transaction<'_, Postgres>,
        teacher_id: i64,
    ) -> Result<Vec<Subject>> {
        let subjects = sqlx::query_as::<_, Subject>(
            r#"SELECT s.id, s.name FROM subjects s
               JOIN teacher_subjects ts ON ts.subject_id = s.id
               WHERE ts.teacher_id = $1
               ORDER BY s.id"#,
        )
        .bind(teacher_id)
        .fetch_all(&mut **tx)
        .await?;
        Ok(subjects)
    }
}

#[async_trait]
impl AccountRepository for PgStore {
    #[instrument(skip(self))]
    async fn find_account_by_username(&self, username: &str) -> Result<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(account)
    }

    #[instrument(skip(self, account), fields(username = %account.username, role = %account.role))]
    async fn create_account(&self, account: NewAccount) -> Result<RegisteredAccount> {
        for attempt in 1..=MAX_ENROLLMENT_ATTEMPTS {
            if let Some(created) = self.try_create_account(&account).await? {
                return Ok(created);
            }
            tracing::debug!(attempt, "Enrollment number collision, retrying");
        }
        Err(StoreError::conflict("Could not allocate an enrollment number"))
    }
}

#[async_trait]
impl CatalogRepository for PgStore {
    #[instrument(skip(self))]
    async fn create_classroom(&self, name: &str) -> Result<Classroom> {
        sqlx::query_as::<_, Classroom>("INSERT INTO classrooms (name) VALUES ($1) RETURNING id, name")
            .bind(name)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| unique_violation(e, "Classroom already exists"))
    }

    async fn list_classrooms(&self) -> Result<Vec<Classroom>> {
        let classrooms =
            sqlx::query_as::<_, Classroom>("SELECT id, name FROM classrooms ORDER BY id")
                .fetch_all(&self.pool)
                .await?;
        Ok(classrooms)
    }

    async fn find_classroom_by_name(&self, name: &str) -> Result<Option<Classroom>> {
        let classroom = sqlx::query_as::<_, Classroom>(
            "SELECT id, name FROM classrooms WHERE LOWER(name) = LOWER($1)",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(classroom)
    }

    async fn find_classrooms_by_ids(&self, ids: &[i64]) -> Result<Vec<Classroom>> {
        let classrooms = sqlx::query_as::<_, Classroom>(
            "SELECT id, name FROM classrooms WHERE id = ANY($1) ORDER BY id",
        )
        .bind(ids.to_vec())
        .fetch_all(&self.pool)
        .await?;
        Ok(classrooms)
    }

    #[instrument(skip(self))]
    async fn create_subject(&self, name: &str) -> Result<Subject> {
        sqlx::query_as::<_, Subject>("INSERT INTO subjects (name) VALUES ($1) RETURNING id, name")
            .bind(name)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| unique_violation(e, "Subject already exists"))
    }

    async fn list_subjects(&self) -> Result<Vec<Subject>> {
        let subjects = sqlx::query_as::<_, Subject>("SELECT id, name FROM subjects ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(subjects)
    }

    async fn find_subject(&self, id: i64) -> Result<Option<Subject>> {
        let subject = sqlx::query_as::<_, Subject>("SELECT id, name FROM subjects WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(subject)
    }

    async fn find_subjects_by_ids(&self, ids: &[i64]) -> Result<Vec<Subject>> {
        let subjects = sqlx::query_as::<_, Subject>(
            "SELECT id, name FROM subjects WHERE id = ANY($1) ORDER BY id",
        )
        .bind(ids.to_vec())
        .fetch_all(&self.pool)
        .await?;
        Ok(subjects)
    }
}

#[async_trait]
impl StudentRepository for PgStore {
    async fn find_student_by_account(&self, account_id: i64) -> Result<Option<Student>> {
        let student = sqlx::query_as::<_, Student>(
            "SELECT id, account_id, classroom_id FROM students WHERE account_id = $1",
        )
        .bind(account_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(student)
    }

    async fn find_student(&self, id: i64) -> Result<Option<Student>> {
        let student = sqlx::query_as::<_, Student>(
            "SELECT id, account_id, classroom_id FROM students WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(student)
    }

    async fn find_student_profile(&self, student_id: i64) -> Result<Option<StudentProfile>> {
        let profile = sqlx::query_as::<_, StudentProfile>(&format!(
            "SELECT {STUDENT_PROFILE_COLUMNS} FROM student_profiles WHERE student_id = $1"
        ))
        .bind(student_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(profile)
    }

    #[instrument(skip(self, profile))]
    async fn create_student_profile(
        &self,
        student_id: i64,
        classroom_id: i64,
        profile: NewStudentProfile,
    ) -> Result<StudentProfile> {
        let mut tx = self.pool.begin().await?;

        let created = sqlx::query_as::<_, StudentProfile>(&format!(
            r#"INSERT INTO student_profiles
                (student_id, cpf, phone, address, birth_date, email, school_year, father_name, mother_name)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
               RETURNING {STUDENT_PROFILE_COLUMNS}"#
        ))
        .bind(student_id)
        .bind(&profile.cpf)
        .bind(&profile.phone)
        .bind(&profile.address)
        .bind(profile.birth_date)
        .bind(&profile.email)
        .bind(&profile.school_year)
        .bind(&profile.father_name)
        .bind(&profile.mother_name)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| unique_violation(e, "Student profile already exists"))?;

        sqlx::query("UPDATE students SET classroom_id = $1 WHERE id = $2")
            .bind(classroom_id)
            .bind(student_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(created)
    }

    async fn list_grades(&self, student_id: i64) -> Result<Vec<Grade>> {
        let grades = sqlx::query_as::<_, Grade>(&format!(
            "SELECT {GRADE_COLUMNS} FROM grades WHERE student_id = $1 ORDER BY recorded_on, id"
        ))
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(grades)
    }
}

#[async_trait]
impl TeacherRepository for PgStore {
    async fn find_teacher_by_account(&self, account_id: i64) -> Result<Option<Teacher>> {
        let teacher =
            sqlx::query_as::<_, Teacher>("SELECT id, account_id FROM teachers WHERE account_id = $1")
                .bind(account_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(teacher)
    }

    async fn find_teacher_profile(&self, teacher_id: i64) -> Result<Option<TeacherProfile>> {
        let profile = sqlx::query_as::<_, TeacherProfile>(&format!(
            "SELECT {TEACHER_PROFILE_COLUMNS} FROM teacher_profiles WHERE teacher_id = $1"
        ))
        .bind(teacher_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(profile)
    }

    #[instrument(skip(self, profile))]
    async fn create_teacher_profile(
        &self,
        teacher_id: i64,
        profile: NewTeacherProfile,
        classroom_ids: &[i64],
        subject_ids: &[i64],
    ) -> Result<TeacherProfileWithAssignments> {
        let mut tx = self.pool.begin().await?;

        let created = sqlx::query_as::<_, TeacherProfile>(&format!(
            r#"INSERT INTO teacher_profiles
                (teacher_id, cpf, phone, email, degree, specialization, birth_date, address)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
               RETURNING {TEACHER_PROFILE_COLUMNS}"#
        ))
        .bind(teacher_id)
        .bind(&profile.cpf)
        .bind(&profile.phone)
        .bind(&profile.email)
        .bind(&profile.degree)
        .bind(&profile.specialization)
        .bind(profile.birth_date)
        .bind(&profile.address)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| unique_violation(e, "Teacher profile already exists"))?;

        sqlx::query("DELETE FROM teacher_classrooms WHERE teacher_id = $1")
            .bind(teacher_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query(
            r#"INSERT INTO teacher_classrooms (teacher_id, classroom_id)
               SELECT $1, id FROM classrooms WHERE id = ANY($2)"#,
        )
        .bind(teacher_id)
        .bind(classroom_ids.to_vec())
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM teacher_subjects WHERE teacher_id = $1")
            .bind(teacher_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query(
            r#"INSERT INTO teacher_subjects (teacher_id, subject_id)
               SELECT $1, id FROM subjects WHERE id = ANY($2)"#,
        )
        .bind(teacher_id)
        .bind(subject_ids.to_vec())
        .execute(&mut *tx)
        .await?;

        let classrooms = Self::assigned_classrooms(&mut tx, teacher_id).await?;
        let subjects = Self::assigned_subjects(&mut tx, teacher_id).await?;

        tx.commit().await?;

        Ok(TeacherProfileWithAssignments {
            profile: created,
            classrooms,
            subjects,
        })
    }

    async fn teaches_subject(&self, teacher_id: i64, subject_id: i64) -> Result<bool> {
        let teaches: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM teacher_subjects WHERE teacher_id = $1 AND subject_id = $2)",
        )
        .bind(teacher_id)
        .bind(subject_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(teaches)
    }

    #[instrument(skip(self))]
    async fn record_grade(&self, grade: NewGrade) -> Result<Grade> {
        let recorded = sqlx::query_as::<_, Grade>(&format!(
            r#"INSERT INTO grades (student_id, teacher_id, subject_id, value, recorded_on)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING {GRADE_COLUMNS}"#
        ))
        .bind(grade.student_id)
        .bind(grade.teacher_id)
        .bind(grade.subject_id)
        .bind(grade.value)
        .bind(grade.recorded_on)
        .fetch_one(&self.pool)
        .await?;
        Ok(recorded)
    }
}
