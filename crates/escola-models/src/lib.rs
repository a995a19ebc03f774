//! # Escola Models
//!
//! Domain records and request/response DTOs for the Escola API.
//!
//! # Modules
//!
//! - [`roles`]: the closed [`Role`] enum
//! - [`accounts`]: accounts, registration and login payloads
//! - [`catalog`]: classrooms and subjects
//! - [`students`]: students, enrollment numbers and student profiles
//! - [`teachers`]: teachers and teacher profiles
//! - [`grades`]: grade records
//! - [`value_types`]: CPF and phone number newtypes, title-casing, age arithmetic
//! - [`validation`]: custom `validator` functions used by the DTOs
//!
//! Request DTOs keep the Portuguese field names of the public API
//! (`sala`, `nome`, `aluno_id`, `nota`, ...); Rust-side names are English.

pub mod accounts;
pub mod catalog;
pub mod grades;
pub mod roles;
pub mod students;
pub mod teachers;
pub mod validation;
pub mod value_types;

pub use accounts::{
    Account, LoginForm, NewAccount, RegisterAccountDto, RegisteredAccount, TokenResponse,
};
pub use catalog::{Classroom, CreateClassroomDto, CreateSubjectDto, Subject};
pub use grades::{Grade, NewGrade, RecordGradeDto};
pub use roles::{Role, UnknownRole};
pub use students::{
    NewStudentProfile, Student, StudentProfile, StudentProfileDto, generate_enrollment_number,
};
pub use teachers::{
    NewTeacherProfile, Teacher, TeacherProfile, TeacherProfileDto, TeacherProfileWithAssignments,
};
pub use value_types::{Cpf, PhoneNumber, ValueTypeError};
