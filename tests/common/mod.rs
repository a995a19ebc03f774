#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use escola::router::init_router;
use escola::state::AppState;
use escola_config::{CorsConfig, JwtConfig, PasswordConfig};
use escola_db::MemoryStore;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

pub const TEST_SECRET: &str = "test-secret-key-at-least-32-characters-long";
pub const TEST_PASSWORD: &str = "secret12";

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig::new(TEST_SECRET)
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
}

pub fn setup_test_app() -> TestApp {
    setup_test_app_with_cors(CorsConfig::default())
}

pub fn setup_test_app_with_cors(cors_config: CorsConfig) -> TestApp {
    let store = Arc::new(MemoryStore::new());
    let state = AppState {
        store: store.clone(),
        jwt_config: test_jwt_config(),
        password_config: PasswordConfig { cost: 4 },
        cors_config,
    };

    TestApp {
        router: init_router(state),
        store,
    }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }

    pub async fn post_json(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn login(&self, username: &str, password: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/auth/token")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(format!(
                "username={}&password={}",
                username, password
            )))
            .unwrap();
        self.send(request).await
    }

    pub async fn register(&self, username: &str, role: &str) -> Value {
        let (status, body) = self
            .post_json(
                "/auth",
                None,
                json!({
                    "username": username,
                    "password": TEST_PASSWORD,
                    "ocupacao": role
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);
        body
    }

    /// Registers `username` with `role` and returns a fresh access token.
    pub async fn token_for(&self, username: &str, role: &str) -> String {
        self.register(username, role).await;
        let (status, body) = self.login(username, TEST_PASSWORD).await;
        assert_eq!(status, StatusCode::OK, "login failed: {}", body);
        body["access_token"].as_str().unwrap().to_string()
    }

    pub async fn create_classroom(&self, admin_token: &str, name: &str) -> i64 {
        let (status, body) = self
            .post_json("/admin/criarsalas", Some(admin_token), json!({ "sala": name }))
            .await;
        assert_eq!(status, StatusCode::CREATED, "classroom failed: {}", body);
        body["id"].as_i64().unwrap()
    }

    pub async fn create_subject(&self, admin_token: &str, name: &str) -> i64 {
        let (status, body) = self
            .post_json("/admin/criarmaterias", Some(admin_token), json!({ "nome": name }))
            .await;
        assert_eq!(status, StatusCode::CREATED, "subject failed: {}", body);
        body["id"].as_i64().unwrap()
    }
}

pub fn student_profile(classroom: &str) -> Value {
    json!({
        "cpf": "529.982.247-25",
        "telefone": "(11) 98765-4321",
        "endereco": "rua das flores, 12",
        "data_nascimento": "2010-03-04",
        "email": "ana@escola.com",
        "serie": "primeiro ano",
        "sala": classroom,
        "nome_pai": "João Souza",
        "nome_mae": "maria souza"
    })
}

pub fn teacher_profile(classroom_ids: &[i64], subject_ids: &[i64]) -> Value {
    json!({
        "cpf": "529.982.247-25",
        "telefone": "(11) 3333-4444",
        "email": "prof@escola.com",
        "formacao": "Licenciatura em Matemática",
        "data_nascimento": "1980-01-01",
        "endereco": "avenida central, 100",
        "salas_ids": classroom_ids,
        "materias_ids": subject_ids
    })
}
