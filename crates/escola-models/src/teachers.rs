use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::catalog::{Classroom, Subject};
use crate::value_types::{Cpf, PhoneNumber, ValueTypeError, title_case};

/// The teacher record attached to an account with the `professor` role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Teacher {
    pub id: i64,
    pub account_id: i64,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct TeacherProfileDto {
    #[validate(custom(function = "crate::validation::validate_cpf"))]
    #[schema(example = "529.982.247-25")]
    pub cpf: String,
    #[serde(rename = "telefone")]
    #[validate(custom(function = "crate::validation::validate_phone"))]
    pub phone: String,
    #[validate(email(message = "Email is invalid"))]
    pub email: String,
    #[serde(rename = "formacao", default)]
    pub degree: Option<String>,
    #[serde(rename = "especializacao", default)]
    pub specialization: Option<String>,
    #[serde(rename = "data_nascimento")]
    #[validate(custom(function = "crate::validation::validate_birth_date"))]
    pub birth_date: NaiveDate,
    #[serde(rename = "endereco")]
    #[validate(custom(function = "crate::validation::validate_address"))]
    pub address: String,
    #[serde(rename = "salas_ids")]
    #[validate(length(min = 1, message = "At least one classroom is required"))]
    pub classroom_ids: Vec<i64>,
    #[serde(rename = "materias_ids")]
    #[validate(length(min = 1, message = "At least one subject is required"))]
    pub subject_ids: Vec<i64>,
}

impl TeacherProfileDto {
    pub fn into_new_profile(self) -> Result<NewTeacherProfile, ValueTypeError> {
        let non_blank = |value: Option<String>| {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Ok(NewTeacherProfile {
            cpf: Cpf::new(&self.cpf)?.into_inner(),
            phone: PhoneNumber::new(&self.phone)?.into_inner(),
            email: self.email.trim().to_string(),
            degree: non_blank(self.degree),
            specialization: non_blank(self.specialization),
            birth_date: self.birth_date,
            address: title_case(self.address.trim()),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewTeacherProfile {
    pub cpf: String,
    pub phone: String,
    pub email: String,
    pub degree: Option<String>,
    pub specialization: Option<String>,
    pub birth_date: NaiveDate,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct TeacherProfile {
    pub id: i64,
    pub teacher_id: i64,
    pub cpf: String,
    pub phone: String,
    pub email: String,
    pub degree: Option<String>,
    pub specialization: Option<String>,
    pub birth_date: NaiveDate,
    pub address: String,
}

/// A created profile together with the classrooms and subjects it was
/// assigned. Ids that did not match an existing row are left out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TeacherProfileWithAssignments {
    #[serde(flatten)]
    pub profile: TeacherProfile,
    pub classrooms: Vec<Classroom>,
    pub subjects: Vec<Subject>,
}
