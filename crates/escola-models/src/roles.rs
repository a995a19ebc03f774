//! Account roles.
//!
//! A role is fixed at registration. On the wire (JSON bodies, token claims,
//! the `accounts.role` column) roles use the Portuguese names `aluno`,
//! `professor` and `admin`; English names are accepted as aliases on input.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[sqlx(type_name = "account_role")]
pub enum Role {
    #[serde(rename = "aluno", alias = "student")]
    #[sqlx(rename = "aluno")]
    Student,
    #[serde(rename = "professor", alias = "teacher")]
    #[sqlx(rename = "professor")]
    Teacher,
    #[serde(rename = "admin", alias = "administrador")]
    #[sqlx(rename = "admin")]
    Admin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Student, Role::Teacher, Role::Admin];

    /// Wire name, as stored in the database and in token claims.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "aluno",
            Role::Teacher => "professor",
            Role::Admin => "admin",
        }
    }

    /// Human-readable English label.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Teacher => "teacher",
            Role::Admin => "administrator",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "aluno" | "student" => Ok(Role::Student),
            "professor" | "teacher" => Ok(Role::Teacher),
            "admin" | "administrador" => Ok(Role::Admin),
            _ => Err(UnknownRole(s.to_string())),
        }
    }
}
