use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{record_grade, save_profile, teacher_home};
use crate::state::AppState;

pub fn init_teachers_router() -> Router<AppState> {
    Router::new()
        .route("/professor", get(teacher_home))
        .route("/infoprofessor", post(save_profile))
        .route("/infoprofessor/", post(save_profile))
        .route("/lancarnotas", post(record_grade))
        .route("/lancarnotas/", post(record_grade))
}
