//! Classrooms and subjects, both managed by administrators.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Classroom {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateClassroomDto {
    #[serde(rename = "sala")]
    #[validate(custom(function = "crate::validation::validate_entity_name"))]
    #[schema(example = "1A")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Subject {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateSubjectDto {
    #[serde(rename = "nome")]
    #[validate(custom(function = "crate::validation::validate_entity_name"))]
    #[schema(example = "Matemática")]
    pub name: String,
}
