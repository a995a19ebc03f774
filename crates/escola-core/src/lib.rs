//! # Escola Core
//!
//! Foundational types shared by every Escola crate.
//!
//! - [`errors`]: the application error type and its HTTP response mapping
//!
//! # Example
//!
//! ```ignore
//! use escola_core::AppError;
//!
//! let error = AppError::not_found(anyhow::anyhow!("Student not found"));
//! assert_eq!(error.status, axum::http::StatusCode::NOT_FOUND);
//! ```

pub mod errors;

pub use errors::AppError;
