//! Request extractors and middleware.
//!
//! - [`auth`]: the [`auth::AuthUser`] extractor (bearer token → identity)
//! - [`role`]: per-route-group role gates
//!
//! # Authentication Flow
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. A role gate (or the `AuthUser` extractor on ungated routes) verifies
//!    the token signature and expiry
//! 3. The gate rejects callers whose role is not permitted
//! 4. The handler reads the identity through `AuthUser`

pub mod auth;
pub mod role;
