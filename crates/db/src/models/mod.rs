//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A create DTO for inserts
//! - Serializable response shapes where the row must not be exposed as-is

pub mod contact_message;
pub mod project;
pub mod session;
pub mod user;
