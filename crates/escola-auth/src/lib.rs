//! # Escola Auth
//!
//! The credential service of the Escola API.
//!
//! - [`jwt`]: issue and verify signed session tokens
//! - [`password`]: bcrypt hashing
//! - [`credentials`]: check a username/password pair and gate by role
//! - [`claims`]: token claims and the verified [`Identity`]
//! - [`error`]: [`AuthError`] and its HTTP mapping
//!
//! Tokens are HS256 JWTs carrying `sub` (username), `id` (account id),
//! `ocupacao` (role), `iat` and `exp`. They are never persisted and cannot be
//! revoked; expiry is checked with zero leeway.
//!
//! # Example
//!
//! ```ignore
//! use escola_auth::{authenticate, authorize, create_access_token, verify_token};
//! use escola_models::Role;
//!
//! let account = authenticate(store.as_ref(), "ana", "secret12").await?;
//! let token = create_access_token(account.id, &account.username, account.role, &jwt_config)?;
//!
//! let identity = verify_token(&token, &jwt_config)?;
//! let student = authorize(identity, &[Role::Student])?;
//! ```

pub mod claims;
pub mod credentials;
pub mod error;
pub mod jwt;
pub mod password;

pub use claims::{Claims, Identity};
pub use credentials::{authenticate, authorize};
pub use error::AuthError;
pub use jwt::{create_access_token, create_access_token_at, verify_token};
pub use password::{hash_password, verify_password};
