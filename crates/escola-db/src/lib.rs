//! # Escola DB
//!
//! Persistence for the Escola API.
//!
//! Services talk to storage through the repository traits in
//! [`repositories`]. Two implementations exist:
//!
//! - [`PgStore`]: PostgreSQL via SQLx, schema applied from `migrations/`
//! - [`MemoryStore`]: in-process tables with the same semantics, used by
//!   tests and when no `DATABASE_URL` is configured
//!
//! # Example
//!
//! ```ignore
//! use escola_db::{PgStore, SchoolStore};
//! use std::sync::Arc;
//!
//! let store = PgStore::connect(&database_url, 5).await?;
//! store.migrate().await?;
//! let store: Arc<dyn SchoolStore> = Arc::new(store);
//! ```

pub mod error;
pub mod memory;
pub mod postgres;
pub mod repositories;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use postgres::{MIGRATOR, PgStore, init_db_pool};
pub use repositories::{
    AccountRepository, CatalogRepository, SchoolStore, StudentRepository, TeacherRepository,
};

// Re-export PgPool for convenience
pub use sqlx::PgPool;

/// Attempts at drawing an unused enrollment number before giving up.
pub(crate) const MAX_ENROLLMENT_ATTEMPTS: usize = 10;
