use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

pub const MIN_GRADE: f64 = 0.0;
pub const MAX_GRADE: f64 = 10.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Grade {
    pub id: i64,
    pub student_id: i64,
    pub teacher_id: i64,
    pub subject_id: i64,
    pub value: f64,
    pub recorded_on: NaiveDate,
}

/// Grade submitted by a teacher.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RecordGradeDto {
    #[serde(rename = "aluno_id")]
    pub student_id: i64,
    #[serde(rename = "materia_id")]
    pub subject_id: i64,
    #[serde(rename = "nota")]
    #[validate(range(min = 0.0, max = 10.0, message = "Grade must be between 0 and 10"))]
    #[schema(example = 8.5)]
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewGrade {
    pub student_id: i64,
    pub teacher_id: i64,
    pub subject_id: i64,
    pub value: f64,
    pub recorded_on: NaiveDate,
}
