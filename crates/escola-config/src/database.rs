//! Database connection settings.
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`: PostgreSQL connection string. When unset the server
//!   falls back to the in-memory store.
//! - `DATABASE_MAX_CONNECTIONS`: pool size (default 5)

use std::env;

use crate::env_or;

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn from_env() -> Self {
        Self {
            url: env::var("DATABASE_URL").ok().filter(|url| !url.is_empty()),
            max_connections: env_or("DATABASE_MAX_CONNECTIONS", 5),
        }
    }
}
