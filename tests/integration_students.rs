mod common;

use axum::http::StatusCode;
use common::{setup_test_app, student_profile, teacher_profile};
use escola_db::StudentRepository;
use serde_json::json;

#[tokio::test]
async fn test_student_welcome() {
    let app = setup_test_app();
    let token = app.token_for("ana", "aluno").await;

    let (status, body) = app.get("/aluno/alunos", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["msg"], "Bem-vindo, aluno ana");
}

#[tokio::test]
async fn test_student_routes_reject_other_roles() {
    let app = setup_test_app();
    let admin = app.token_for("diretora", "admin").await;

    let (status, _) = app.get("/aluno/alunos", Some(&admin)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.get("/aluno/notas", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_save_profile() {
    let app = setup_test_app();
    let admin = app.token_for("diretora", "admin").await;
    let classroom_id = app.create_classroom(&admin, "1A").await;
    let student = app.token_for("ana", "aluno").await;

    let (status, body) = app
        .post_json("/aluno/infoalunos", Some(&student), student_profile("1A"))
        .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert_eq!(body["msg"], "Informações salvas com sucesso");
    assert!(body["id_info"].is_i64());

    let account_id = app.get("/", Some(&student)).await.1["user"]["id"]
        .as_i64()
        .unwrap();
    let record = app
        .store
        .find_student_by_account(account_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.classroom_id, Some(classroom_id));

    let profile = app.store.find_student_profile(record.id).await.unwrap().unwrap();
    assert_eq!(profile.cpf, "52998224725");
    assert_eq!(profile.phone, "11987654321");
    assert_eq!(profile.mother_name, "Maria Souza");
}

#[tokio::test]
async fn test_save_profile_with_trailing_slash() {
    let app = setup_test_app();
    let admin = app.token_for("diretora", "admin").await;
    app.create_classroom(&admin, "1A").await;
    let student = app.token_for("ana", "aluno").await;

    let (status, body) = app
        .post_json("/aluno/infoalunos/", Some(&student), student_profile("1A"))
        .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
}

#[tokio::test]
async fn test_save_profile_twice_conflicts() {
    let app = setup_test_app();
    let admin = app.token_for("diretora", "admin").await;
    app.create_classroom(&admin, "1A").await;
    let student = app.token_for("ana", "aluno").await;

    let (status, _) = app
        .post_json("/aluno/infoalunos", Some(&student), student_profile("1A"))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = app
        .post_json("/aluno/infoalunos", Some(&student), student_profile("1A"))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_save_profile_unknown_classroom() {
    let app = setup_test_app();
    let student = app.token_for("ana", "aluno").await;

    let (status, _) = app
        .post_json("/aluno/infoalunos", Some(&student), student_profile("9Z"))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_save_profile_validation() {
    let app = setup_test_app();
    let student = app.token_for("ana", "aluno").await;

    let mut profile = student_profile("1A");
    profile["cpf"] = json!("111.111.111-11");
    let (status, body) = app
        .post_json("/aluno/infoalunos", Some(&student), profile)
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].is_string());

    let mut profile = student_profile("1A");
    profile["telefone"] = json!("123");
    profile["email"] = json!("not-an-email");
    let (status, _) = app
        .post_json("/aluno/infoalunos", Some(&student), profile)
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_list_grades() {
    let app = setup_test_app();
    let admin = app.token_for("diretora", "admin").await;
    let classroom_id = app.create_classroom(&admin, "1A").await;
    let subject_id = app.create_subject(&admin, "Matemática").await;

    let student = app.token_for("ana", "aluno").await;
    let (status, body) = app.get("/aluno/notas", Some(&student)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let teacher = app.token_for("carlos", "professor").await;
    let (status, _) = app
        .post_json(
            "/professor/infoprofessor",
            Some(&teacher),
            teacher_profile(&[classroom_id], &[subject_id]),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let account_id = app.get("/", Some(&student)).await.1["user"]["id"]
        .as_i64()
        .unwrap();
    let student_id = app
        .store
        .find_student_by_account(account_id)
        .await
        .unwrap()
        .unwrap()
        .id;
    let (status, _) = app
        .post_json(
            "/professor/lancarnotas",
            Some(&teacher),
            json!({"aluno_id": student_id, "materia_id": subject_id, "nota": 9.5}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app.get("/aluno/notas", Some(&student)).await;
    assert_eq!(status, StatusCode::OK);
    let grades = body.as_array().unwrap();
    assert_eq!(grades.len(), 1);
    assert_eq!(grades[0]["value"], 9.5);
    assert_eq!(grades[0]["subject_id"], subject_id);
}
