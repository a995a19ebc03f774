//! In-memory implementation of the repository traits.
//!
//! All tables live behind a single `RwLock`, so every write is atomic the
//! way a PostgreSQL transaction would be. Uniqueness rules match the
//! database schema.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use escola_models::{
    Account, Classroom, Grade, NewAccount, NewGrade, NewStudentProfile, NewTeacherProfile,
    RegisteredAccount, Role, Student, StudentProfile, Subject, Teacher, TeacherProfile,
    TeacherProfileWithAssignments, generate_enrollment_number,
};
use tokio::sync::RwLock;

use crate::MAX_ENROLLMENT_ATTEMPTS;
use crate::error::StoreError;
use crate::repositories::{
    AccountRepository, CatalogRepository, Result, StudentRepository, TeacherRepository,
};

#[derive(Default)]
struct Tables {
    sequences: HashMap<&'static str, i64>,
    accounts: Vec<Account>,
    admins: Vec<(i64, i64)>,
    students: Vec<Student>,
    enrollments: HashMap<i64, String>,
    student_profiles: Vec<StudentProfile>,
    teachers: Vec<Teacher>,
    teacher_profiles: Vec<TeacherProfile>,
    teacher_classrooms: BTreeSet<(i64, i64)>,
    teacher_subjects: BTreeSet<(i64, i64)>,
    classrooms: Vec<Classroom>,
    subjects: Vec<Subject>,
    grades: Vec<Grade>,
}

impl Tables {
    fn next_id(&mut self, table: &'static str) -> i64 {
        let id = self.sequences.entry(table).or_insert(0);
        *id += 1;
        *id
    }

    fn enrollment_taken(&self, number: &str) -> bool {
        self.enrollments.values().any(|n| n == number)
    }
}

fn same_name(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Store used by tests and by the server when no database is configured.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered accounts.
    pub async fn account_count(&self) -> usize {
        self.tables.read().await.accounts.len()
    }

    /// Enrollment number of a student, if any.
    pub async fn enrollment_number(&self, student_id: i64) -> Option<String> {
        self.tables.read().await.enrollments.get(&student_id).cloned()
    }
}

#[async_trait]
impl AccountRepository for MemoryStore {
    async fn find_account_by_username(&self, username: &str) -> Result<Option<Account>> {
        let tables = self.tables.read().await;
        Ok(tables
            .accounts
            .iter()
            .find(|a| a.username == username)
            .cloned())
    }

    async fn create_account(&self, account: NewAccount) -> Result<RegisteredAccount> {
        let mut tables = self.tables.write().await;

        if tables.accounts.iter().any(|a| a.username == account.username) {
            return Err(StoreError::conflict("Username already registered"));
        }

        // Allocated before any row is written.
        let enrollment_number = match account.role {
            Role::Student => {
                let mut rng = rand::thread_rng();
                let number = (0..MAX_ENROLLMENT_ATTEMPTS)
                    .map(|_| generate_enrollment_number(&mut rng))
                    .find(|number| !tables.enrollment_taken(number))
                    .ok_or_else(|| {
                        StoreError::conflict("Could not allocate an enrollment number")
                    })?;
                Some(number)
            }
            _ => None,
        };

        let id = tables.next_id("accounts");
        tables.accounts.push(Account {
            id,
            username: account.username.clone(),
            role: account.role,
            password_hash: account.password_hash,
        });

        match account.role {
            Role::Admin => {
                let admin_id = tables.next_id("admins");
                tables.admins.push((admin_id, id));
            }
            Role::Teacher => {
                let teacher_id = tables.next_id("teachers");
                tables.teachers.push(Teacher {
                    id: teacher_id,
                    account_id: id,
                });
            }
            Role::Student => {
                let student_id = tables.next_id("students");
                tables.students.push(Student {
                    id: student_id,
                    account_id: id,
                    classroom_id: None,
                });
                if let Some(number) = &enrollment_number {
                    tables.enrollments.insert(student_id, number.clone());
                }
            }
        }

        Ok(RegisteredAccount {
            id,
            username: account.username,
            role: account.role,
            enrollment_number,
        })
    }
}

#[async_trait]
impl CatalogRepository for MemoryStore {
    async fn create_classroom(&self, name: &str) -> Result<Classroom> {
        let mut tables = self.tables.write().await;
        if tables.classrooms.iter().any(|c| same_name(&c.name, name)) {
            return Err(StoreError::conflict("Classroom already exists"));
        }
        let classroom = Classroom {
            id: tables.next_id("classrooms"),
            name: name.to_string(),
        };
        tables.classrooms.push(classroom.clone());
        Ok(classroom)
    }

    async fn list_classrooms(&self) -> Result<Vec<Classroom>> {
        Ok(self.tables.read().await.classrooms.clone())
    }

    async fn find_classroom_by_name(&self, name: &str) -> Result<Option<Classroom>> {
        let tables = self.tables.read().await;
        Ok(tables
            .classrooms
            .iter()
            .find(|c| same_name(&c.name, name))
            .cloned())
    }

    async fn find_classrooms_by_ids(&self, ids: &[i64]) -> Result<Vec<Classroom>> {
        let tables = self.tables.read().await;
        Ok(tables
            .classrooms
            .iter()
            .filter(|c| ids.contains(&c.id))
            .cloned()
            .collect())
    }

    async fn create_subject(&self, name: &str) -> Result<Subject> {
        let mut tables = self.tables.write().await;
        if tables.subjects.iter().any(|s| same_name(&s.name, name)) {
            return Err(StoreError::conflict("Subject already exists"));
        }
        let subject = Subject {
            id: tables.next_id("subjects"),
            name: name.to_string(),
        };
        tables.subjects.push(subject.clone());
        Ok(subject)
    }

    async fn list_subjects(&self) -> Result<Vec<Subject>> {
        Ok(self.tables.read().await.subjects.clone())
    }

    async fn find_subject(&self, id: i64) -> Result<Option<Subject>> {
        let tables = self.tables.read().await;
        Ok(tables.subjects.iter().find(|s| s.id == id).cloned())
    }

    async fn find_subjects_by_ids(&self, ids: &[i64]) -> Result<Vec<Subject>> {
        let tables = self.tables.read().await;
        Ok(tables
            .subjects
            .iter()
            .filter(|s| ids.contains(&s.id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl StudentRepository for MemoryStore {
    async fn find_student_by_account(&self, account_id: i64) -> Result<Option<Student>> {
        let tables = self.tables.read().await;
        Ok(tables
            .students
            .iter()
            .find(|s| s.account_id == account_id)
            .cloned())
    }

    async fn find_student(&self, id: i64) -> Result<Option<Student>> {
        let tables = self.tables.read().await;
        Ok(tables.students.iter().find(|s| s.id == id).cloned())
    }

    async fn find_student_profile(&self, student_id: i64) -> Result<Option<StudentProfile>> {
        let tables = self.tables.read().await;
        Ok(tables
            .student_profiles
            .iter()
            .find(|p| p.student_id == student_id)
            .cloned())
    }

    async fn create_student_profile(
        &self,
        student_id: i64,
        classroom_id: i64,
        profile: NewStudentProfile,
    ) -> Result<StudentProfile> {
        let mut tables = self.tables.write().await;

        if tables
            .student_profiles
            .iter()
            .any(|p| p.student_id == student_id)
        {
            return Err(StoreError::conflict("Student profile already exists"));
        }
        if !tables.classrooms.iter().any(|c| c.id == classroom_id) {
            return Err(StoreError::not_found("Classroom not found"));
        }
        let Some(position) = tables.students.iter().position(|s| s.id == student_id) else {
            return Err(StoreError::not_found("Student not found"));
        };

        tables.students[position].classroom_id = Some(classroom_id);

        let created = StudentProfile {
            id: tables.next_id("student_profiles"),
            student_id,
            cpf: profile.cpf,
            phone: profile.phone,
            address: profile.address,
            birth_date: profile.birth_date,
            email: profile.email,
            school_year: profile.school_year,
            father_name: profile.father_name,
            mother_name: profile.mother_name,
        };
        tables.student_profiles.push(created.clone());
        Ok(created)
    }

    async fn list_grades(&self, student_id: i64) -> Result<Vec<Grade>> {
        let tables = self.tables.read().await;
        let mut grades: Vec<Grade> = tables
            .grades
            .iter()
            .filter(|g| g.student_id == student_id)
            .cloned()
            .collect();
        grades.sort_by_key(|g| (g.recorded_on, g.id));
        Ok(grades)
    }
}

#[async_trait]
impl TeacherRepository for MemoryStore {
    async fn find_teacher_by_account(&self, account_id: i64) -> Result<Option<Teacher>> {
        let tables = self.tables.read().await;
        Ok(tables
            .teachers
            .iter()
            .find(|t| t.account_id == account_id)
            .cloned())
    }

    async fn find_teacher_profile(&self, teacher_id: i64) -> Result<Option<TeacherProfile>> {
        let tables = self.tables.read().await;
        Ok(tables
            .teacher_profiles
            .iter()
            .find(|p| p.teacher_id == teacher_id)
            .cloned())
    }

    async fn create_teacher_profile(
        &self,
        teacher_id: i64,
        profile: NewTeacherProfile,
        classroom_ids: &[i64],
        subject_ids: &[i64],
    ) -> Result<TeacherProfileWithAssignments> {
        let mut tables = self.tables.write().await;

        if tables
            .teacher_profiles
            .iter()
            .any(|p| p.teacher_id == teacher_id)
        {
            return Err(StoreError::conflict("Teacher profile already exists"));
        }
        if !tables.teachers.iter().any(|t| t.id == teacher_id) {
            return Err(StoreError::not_found("Teacher not found"));
        }

        let classrooms: Vec<Classroom> = tables
            .classrooms
            .iter()
            .filter(|c| classroom_ids.contains(&c.id))
            .cloned()
            .collect();
        let subjects: Vec<Subject> = tables
            .subjects
            .iter()
            .filter(|s| subject_ids.contains(&s.id))
            .cloned()
            .collect();

        tables.teacher_classrooms.retain(|(t, _)| *t != teacher_id);
        tables
            .teacher_classrooms
            .extend(classrooms.iter().map(|c| (teacher_id, c.id)));
        tables.teacher_subjects.retain(|(t, _)| *t != teacher_id);
        tables
            .teacher_subjects
            .extend(subjects.iter().map(|s| (teacher_id, s.id)));

        let created = TeacherProfile {
            id: tables.next_id("teacher_profiles"),
            teacher_id,
            cpf: profile.cpf,
            phone: profile.phone,
            email: profile.email,
            degree: profile.degree,
            specialization: profile.specialization,
            birth_date: profile.birth_date,
            address: profile.address,
        };
        tables.teacher_profiles.push(created.clone());

        Ok(TeacherProfileWithAssignments {
            profile: created,
            classrooms,
            subjects,
        })
    }

    async fn teaches_subject(&self, teacher_id: i64, subject_id: i64) -> Result<bool> {
        let tables = self.tables.read().await;
        Ok(tables.teacher_subjects.contains(&(teacher_id, subject_id)))
    }

    async fn record_grade(&self, grade: NewGrade) -> Result<Grade> {
        let mut tables = self.tables.write().await;

        if !tables.students.iter().any(|s| s.id == grade.student_id) {
            return Err(StoreError::not_found("Student not found"));
        }
        if !tables.subjects.iter().any(|s| s.id == grade.subject_id) {
            return Err(StoreError::not_found("Subject not found"));
        }

        let recorded = Grade {
            id: tables.next_id("grades"),
            student_id: grade.student_id,
            teacher_id: grade.teacher_id,
            subject_id: grade.subject_id,
            value: grade.value,
            recorded_on: grade.recorded_on,
        };
        tables.grades.push(recorded.clone());
        Ok(recorded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn new_account(username: &str, role: Role) -> NewAccount {
        NewAccount {
            username: username.to_string(),
            role,
            password_hash: "$2b$04$hash".to_string(),
        }
    }

    fn teacher_profile() -> NewTeacherProfile {
        NewTeacherProfile {
            cpf: "52998224725".to_string(),
            phone: "1133334444".to_string(),
            email: "prof@escola.com".to_string(),
            degree: Some("Licenciatura".to_string()),
            specialization: None,
            birth_date: NaiveDate::from_ymd_opt(1980, 1, 1).unwrap(),
            address: "Rua A, 1".to_string(),
        }
    }

    #[tokio::test]
    async fn test_student_registration_creates_enrollment() {
        let store = MemoryStore::new();
        let created = store
            .create_account(new_account("ana", Role::Student))
            .await
            .unwrap();

        let number = created.enrollment_number.clone().unwrap();
        assert!(number.starts_with("M-"));
        assert_eq!(number.len(), 8);

        let student = store
            .find_student_by_account(created.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(store.enrollment_number(student.id).await, Some(number));
        assert_eq!(student.classroom_id, None);
    }

    #[tokio::test]
    async fn test_non_students_have_no_enrollment() {
        let store = MemoryStore::new();
        let admin = store
            .create_account(new_account("bia", Role::Admin))
            .await
            .unwrap();
        let teacher = store
            .create_account(new_account("carlos", Role::Teacher))
            .await
            .unwrap();

        assert!(admin.enrollment_number.is_none());
        assert!(teacher.enrollment_number.is_none());
        assert!(
            store
                .find_teacher_by_account(teacher.id)
                .await
                .unwrap()
                .is_some()
        );
    }

    #[tokio::test]
    async fn test_duplicate_username_leaves_no_rows() {
        let store = MemoryStore::new();
        store
            .create_account(new_account("ana", Role::Student))
            .await
            .unwrap();

        let err = store
            .create_account(new_account("ana", Role::Teacher))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
        assert_eq!(store.account_count().await, 1);
    }

    #[tokio::test]
    async fn test_catalog_names_unique_ignoring_case() {
        let store = MemoryStore::new();
        store.create_classroom("1A").await.unwrap();
        store.create_subject("Matemática").await.unwrap();

        assert!(matches!(
            store.create_classroom("1a").await,
            Err(StoreError::Conflict(_))
        ));
        assert!(matches!(
            store.create_subject("MATEMÁTICA").await,
            Err(StoreError::Conflict(_))
        ));
        assert_eq!(
            store.find_classroom_by_name("1a").await.unwrap().unwrap().name,
            "1A"
        );
    }

    #[tokio::test]
    async fn test_student_profile_places_student() {
        let store = MemoryStore::new();
        let account = store
            .create_account(new_account("ana", Role::Student))
            .await
            .unwrap();
        let student = store
            .find_student_by_account(account.id)
            .await
            .unwrap()
            .unwrap();
        let classroom = store.create_classroom("1A").await.unwrap();

        let profile = NewStudentProfile {
            cpf: "52998224725".to_string(),
            phone: "11987654321".to_string(),
            address: "Rua A, 1".to_string(),
            birth_date: NaiveDate::from_ymd_opt(2010, 3, 4).unwrap(),
            email: "ana@escola.com".to_string(),
            school_year: "Primeiro Ano".to_string(),
            father_name: "João".to_string(),
            mother_name: "Maria".to_string(),
        };
        store
            .create_student_profile(student.id, classroom.id, profile.clone())
            .await
            .unwrap();

        let placed = store.find_student(student.id).await.unwrap().unwrap();
        assert_eq!(placed.classroom_id, Some(classroom.id));

        let err = store
            .create_student_profile(student.id, classroom.id, profile)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_teacher_profile_replaces_assignments() {
        let store = MemoryStore::new();
        let account = store
            .create_account(new_account("carlos", Role::Teacher))
            .await
            .unwrap();
        let teacher = store
            .find_teacher_by_account(account.id)
            .await
            .unwrap()
            .unwrap();
        let classroom = store.create_classroom("2B").await.unwrap();
        let math = store.create_subject("Matemática").await.unwrap();
        let physics = store.create_subject("Física").await.unwrap();

        let created = store
            .create_teacher_profile(teacher.id, teacher_profile(), &[classroom.id, 42], &[math.id])
            .await
            .unwrap();

        assert_eq!(created.classrooms, vec![classroom]);
        assert_eq!(created.subjects, vec![math.clone()]);
        assert!(store.teaches_subject(teacher.id, math.id).await.unwrap());
        assert!(!store.teaches_subject(teacher.id, physics.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_grades_listed_per_student() {
        let store = MemoryStore::new();
        let teacher_account = store
            .create_account(new_account("carlos", Role::Teacher))
            .await
            .unwrap();
        let ana = store
            .create_account(new_account("ana", Role::Student))
            .await
            .unwrap();
        let davi = store
            .create_account(new_account("davi", Role::Student))
            .await
            .unwrap();
        let teacher = store
            .find_teacher_by_account(teacher_account.id)
            .await
            .unwrap()
            .unwrap();
        let ana = store.find_student_by_account(ana.id).await.unwrap().unwrap();
        let davi = store.find_student_by_account(davi.id).await.unwrap().unwrap();
        let subject = store.create_subject("Física").await.unwrap();

        let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        for (student_id, value) in [(ana.id, 7.0), (davi.id, 9.0), (ana.id, 8.5)] {
            store
                .record_grade(NewGrade {
                    student_id,
                    teacher_id: teacher.id,
                    subject_id: subject.id,
                    value,
                    recorded_on: day,
                })
                .await
                .unwrap();
        }

        let values: Vec<f64> = store
            .list_grades(ana.id)
            .await
            .unwrap()
            .iter()
            .map(|g| g.value)
            .collect();
        assert_eq!(values, vec![7.0, 8.5]);

        let missing = store
            .record_grade(NewGrade {
                student_id: 999,
                teacher_id: teacher.id,
                subject_id: subject.id,
                value: 5.0,
                recorded_on: day,
            })
            .await;
        assert!(matches!(missing, Err(StoreError::NotFound(_))));
    }
}
