use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{
    admin_home, create_classroom, create_subject, list_classrooms, list_subjects,
};
use crate::state::AppState;

pub fn init_admin_router() -> Router<AppState> {
    Router::new()
        .route("/admin", get(admin_home))
        .route("/criarsalas", post(create_classroom))
        .route("/criarmaterias", post(create_subject))
        .route("/salas", get(list_classrooms))
        .route("/materias", get(list_subjects))
}
