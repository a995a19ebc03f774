//! # Escola Config
//!
//! Configuration values for the Escola API, loaded once from environment
//! variables at startup and passed explicitly to whoever needs them.
//!
//! - [`jwt`]: session token signing secret and lifetime
//! - [`password`]: bcrypt cost
//! - [`cors`]: allowed origins
//! - [`server`]: bind address
//! - [`database`]: PostgreSQL connection settings
//! - [`logging`]: log level and log file directory
//!
//! # Example
//!
//! ```ignore
//! use escola_config::{JwtConfig, PasswordConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let password_config = PasswordConfig::from_env();
//! ```

pub mod cors;
pub mod database;
pub mod jwt;
pub mod logging;
pub mod password;
pub mod server;

pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use jwt::JwtConfig;
pub use logging::LoggingConfig;
pub use password::PasswordConfig;
pub use server::ServerConfig;

/// Reads `name` and parses it, falling back to `default` when unset or invalid.
pub(crate) fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}
