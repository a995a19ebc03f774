//! Students, enrollment numbers and student profiles.

use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::value_types::{Cpf, PhoneNumber, ValueTypeError, title_case};

/// Enrollment numbers are `M-` followed by six digits.
pub const ENROLLMENT_PREFIX: &str = "M-";

/// Draws a fresh enrollment number. Uniqueness is enforced by the store.
pub fn generate_enrollment_number<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("{}{}", ENROLLMENT_PREFIX, rng.gen_range(100_000..=999_999))
}

/// The student record attached to an account with the `aluno` role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Student {
    pub id: i64,
    pub account_id: i64,
    pub classroom_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct StudentProfileDto {
    #[validate(custom(function = "crate::validation::validate_cpf"))]
    #[schema(example = "529.982.247-25")]
    pub cpf: String,
    #[serde(rename = "telefone")]
    #[validate(custom(function = "crate::validation::validate_phone"))]
    #[schema(example = "(11) 98765-4321")]
    pub phone: String,
    #[serde(rename = "endereco")]
    #[validate(custom(function = "crate::validation::validate_address"))]
    pub address: String,
    #[serde(rename = "data_nascimento")]
    #[validate(custom(function = "crate::validation::validate_birth_date"))]
    pub birth_date: NaiveDate,
    #[validate(email(message = "Email is invalid"))]
    pub email: String,
    #[serde(rename = "serie")]
    #[validate(custom(function = "crate::validation::validate_required"))]
    pub school_year: String,
    /// Name of the classroom the student joins.
    #[serde(rename = "sala")]
    #[validate(custom(function = "crate::validation::validate_required"))]
    pub classroom: String,
    #[serde(rename = "nome_pai")]
    #[validate(custom(function = "crate::validation::validate_required"))]
    pub father_name: String,
    #[serde(rename = "nome_mae")]
    #[validate(custom(function = "crate::validation::validate_required"))]
    pub mother_name: String,
}

impl StudentProfileDto {
    /// Normalizes a validated payload into the record the store persists.
    ///
    /// The classroom is resolved separately, by name.
    pub fn into_new_profile(self) -> Result<NewStudentProfile, ValueTypeError> {
        Ok(NewStudentProfile {
            cpf: Cpf::new(&self.cpf)?.into_inner(),
            phone: PhoneNumber::new(&self.phone)?.into_inner(),
            address: title_case(self.address.trim()),
            birth_date: self.birth_date,
            email: self.email.trim().to_string(),
            school_year: title_case(self.school_year.trim()),
            father_name: self.father_name.trim().to_string(),
            mother_name: title_case(self.mother_name.trim()),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewStudentProfile {
    pub cpf: String,
    pub phone: String,
    pub address: String,
    pub birth_date: NaiveDate,
    pub email: String,
    pub school_year: String,
    pub father_name: String,
    pub mother_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct StudentProfile {
    pub id: i64,
    pub student_id: i64,
    pub cpf: String,
    pub phone: String,
    pub address: String,
    pub birth_date: NaiveDate,
    pub email: String,
    pub school_year: String,
    pub father_name: String,
    pub mother_name: String,
}
