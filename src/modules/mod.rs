//! Feature modules. Each has a `controller` (HTTP handlers), a `service`
//! (logic over the store) and a `router`.

pub mod admin;
pub mod auth;
pub mod shared;
pub mod students;
pub mod teachers;
