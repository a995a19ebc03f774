use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{list_grades, save_profile, student_home};
use crate::state::AppState;

pub fn init_students_router() -> Router<AppState> {
    Router::new()
        .route("/alunos", get(student_home))
        .route("/infoalunos", post(save_profile))
        .route("/infoalunos/", post(save_profile))
        .route("/notas", get(list_grades))
}
