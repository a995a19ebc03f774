//! Startup configuration for the server binary.
//!
//! The individual config types live in `escola-config`; this bundles them
//! so `main` loads the environment exactly once.
//!
//! # Environment Variables
//!
//! See `escola-config` for each variable and its default. `.env` is read
//! by `dotenvy` before [`AppConfig::from_env`] runs.

use escola_config::{
    CorsConfig, DatabaseConfig, JwtConfig, LoggingConfig, PasswordConfig, ServerConfig,
};

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub jwt: JwtConfig,
    pub password: PasswordConfig,
    pub cors: CorsConfig,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            jwt: JwtConfig::from_env(),
            password: PasswordConfig::from_env(),
            cors: CorsConfig::from_env(),
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            logging: LoggingConfig::from_env(),
        }
    }
}
