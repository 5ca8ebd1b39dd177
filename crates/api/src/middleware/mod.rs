//! Request extractors that guard handlers.

pub mod auth;
pub mod rbac;
