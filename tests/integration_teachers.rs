mod common;

use axum::http::StatusCode;
use common::{TestApp, setup_test_app, teacher_profile};
use escola_db::StudentRepository;
use serde_json::json;

async fn student_id(app: &TestApp, username: &str) -> i64 {
    let token = app.token_for(username, "aluno").await;
    let account_id = app.get("/", Some(&token)).await.1["user"]["id"]
        .as_i64()
        .unwrap();
    app.store
        .find_student_by_account(account_id)
        .await
        .unwrap()
        .unwrap()
        .id
}

#[tokio::test]
async fn test_teacher_welcome() {
    let app = setup_test_app();
    let token = app.token_for("carlos", "professor").await;

    let (status, body) = app.get("/professor/professor", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["msg"], "Bem-vindo, professor carlos");
}

#[tokio::test]
async fn test_teacher_routes_reject_students() {
    let app = setup_test_app();
    let student = app.token_for("ana", "aluno").await;

    let (status, _) = app.get("/professor/professor", Some(&student)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .post_json(
            "/professor/lancarnotas",
            Some(&student),
            json!({"aluno_id": 1, "materia_id": 1, "nota": 10.0}),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_save_profile() {
    let app = setup_test_app();
    let admin = app.token_for("diretora", "admin").await;
    let classroom_id = app.create_classroom(&admin, "1A").await;
    let subject_id = app.create_subject(&admin, "Matemática").await;
    let teacher = app.token_for("carlos", "professor").await;

    let (status, body) = app
        .post_json(
            "/professor/infoprofessor",
            Some(&teacher),
            teacher_profile(&[classroom_id, 999], &[subject_id]),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert_eq!(body["msg"], "Informações salvas com sucesso");

    let (status, _) = app
        .post_json(
            "/professor/infoprofessor",
            Some(&teacher),
            teacher_profile(&[classroom_id], &[subject_id]),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_trailing_slash_routes() {
    let app = setup_test_app();
    let admin = app.token_for("diretora", "admin").await;
    let classroom_id = app.create_classroom(&admin, "1A").await;
    let subject_id = app.create_subject(&admin, "Matemática").await;
    let teacher = app.token_for("carlos", "professor").await;

    let (status, body) = app
        .post_json(
            "/professor/infoprofessor/",
            Some(&teacher),
            teacher_profile(&[classroom_id], &[subject_id]),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);

    let student = student_id(&app, "ana").await;
    let (status, body) = app
        .post_json(
            "/professor/lancarnotas/",
            Some(&teacher),
            json!({"aluno_id": student, "materia_id": subject_id, "nota": 7.5}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
}

#[tokio::test]
async fn test_save_profile_with_unknown_ids() {
    let app = setup_test_app();
    let admin = app.token_for("diretora", "admin").await;
    let classroom_id = app.create_classroom(&admin, "1A").await;
    let teacher = app.token_for("carlos", "professor").await;

    let (status, _) = app
        .post_json(
            "/professor/infoprofessor",
            Some(&teacher),
            teacher_profile(&[classroom_id], &[999]),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .post_json(
            "/professor/infoprofessor",
            Some(&teacher),
            teacher_profile(&[], &[1]),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_grade_for_subject_not_taught_is_forbidden() {
    let app = setup_test_app();
    let admin = app.token_for("diretora", "admin").await;
    let classroom_id = app.create_classroom(&admin, "1A").await;
    let taught = app.create_subject(&admin, "Matemática").await;
    let other = app.create_subject(&admin, "História").await;

    let teacher = app.token_for("carlos", "professor").await;
    let (status, _) = app
        .post_json(
            "/professor/infoprofessor",
            Some(&teacher),
            teacher_profile(&[classroom_id], &[taught]),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let student = student_id(&app, "ana").await;

    let (status, body) = app
        .post_json(
            "/professor/lancarnotas",
            Some(&teacher),
            json!({"aluno_id": student, "materia_id": taught, "nota": 8.0}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert_eq!(body["msg"], "Nota lançada com sucesso");

    let (status, _) = app
        .post_json(
            "/professor/lancarnotas",
            Some(&teacher),
            json!({"aluno_id": student, "materia_id": other, "nota": 8.0}),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_grade_validation_and_lookups() {
    let app = setup_test_app();
    let admin = app.token_for("diretora", "admin").await;
    let subject_id = app.create_subject(&admin, "Matemática").await;
    let teacher = app.token_for("carlos", "professor").await;
    let student = student_id(&app, "ana").await;

    let (status, _) = app
        .post_json(
            "/professor/lancarnotas",
            Some(&teacher),
            json!({"aluno_id": student, "materia_id": subject_id, "nota": 11.0}),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = app
        .post_json(
            "/professor/lancarnotas",
            Some(&teacher),
            json!({"aluno_id": 999, "materia_id": subject_id, "nota": 5.0}),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .post_json(
            "/professor/lancarnotas",
            Some(&teacher),
            json!({"aluno_id": student, "materia_id": 999, "nota": 5.0}),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
