//! Domain building blocks shared by the database and API crates.
//!
//! - [`roles`] -- account roles and the access-flag derivation.
//! - [`validation`] -- input normalization and validators.

pub mod error;
pub mod roles;
pub mod types;
pub mod validation;
