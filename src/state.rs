use std::sync::Arc;

use escola_config::{CorsConfig, JwtConfig, PasswordConfig};
use escola_db::{MemoryStore, PgStore, SchoolStore, StoreError};

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn SchoolStore>,
    pub jwt_config: JwtConfig,
    pub password_config: PasswordConfig,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(store: Arc<dyn SchoolStore>, config: &AppConfig) -> Self {
        Self {
            store,
            jwt_config: config.jwt.clone(),
            password_config: config.password.clone(),
            cors_config: config.cors.clone(),
        }
    }
}

/// Connects to PostgreSQL and applies migrations when `DATABASE_URL` is set;
/// otherwise falls back to the in-memory store.
pub async fn init_app_state(config: &AppConfig) -> Result<AppState, StoreError> {
    let store: Arc<dyn SchoolStore> = match config.database.url.as_deref() {
        Some(url) => {
            let store = PgStore::connect(url, config.database.max_connections).await?;
            store.migrate().await?;
            tracing::info!("Connected to PostgreSQL");
            Arc::new(store)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory store; data is lost on restart");
            Arc::new(MemoryStore::new())
        }
    };

    Ok(AppState::new(store, config))
}
