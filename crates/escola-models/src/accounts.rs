//! Account models and authentication payloads.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::roles::Role;

/// A registered account, as stored.
///
/// The password hash never leaves the server: this type is not `Serialize`.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Account {
    pub id: i64,
    pub username: String,
    pub role: Role,
    pub password_hash: String,
}

/// Input to the persistence layer when creating an account.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub role: Role,
    pub password_hash: String,
}

/// Registration request body.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterAccountDto {
    #[validate(custom(function = "crate::validation::validate_username"))]
    #[schema(example = "ana")]
    pub username: String,
    #[validate(custom(function = "crate::validation::validate_password"))]
    #[schema(example = "secret12")]
    pub password: String,
    #[serde(rename = "ocupacao", alias = "role")]
    pub role: Role,
}

/// Registration response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegisteredAccount {
    pub id: i64,
    pub username: String,
    #[serde(rename = "ocupacao")]
    pub role: Role,
    /// Enrollment number, present for students only.
    #[serde(rename = "matricula", skip_serializing_if = "Option::is_none", default)]
    pub enrollment_number: Option<String>,
}

/// OAuth2 password-flow login form (`application/x-www-form-urlencoded`).
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Bearer token issued on successful login.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_dto_accepts_role_alias() {
        let dto: RegisterAccountDto = serde_json::from_str(
            r#"{"username":"ana","password":"secret12","role":"aluno"}"#,
        )
        .unwrap();
        assert_eq!(dto.role, Role::Student);
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_register_dto_short_password() {
        let dto: RegisterAccountDto = serde_json::from_str(
            r#"{"username":"ana","password":"short","ocupacao":"professor"}"#,
        )
        .unwrap();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_registered_account_omits_missing_enrollment() {
        let account = RegisteredAccount {
            id: 1,
            username: "bia".to_string(),
            role: Role::Admin,
            enrollment_number: None,
        };
        let json = serde_json::to_string(&account).unwrap();
        assert_eq!(json, r#"{"id":1,"username":"bia","ocupacao":"admin"}"#);
    }
}
