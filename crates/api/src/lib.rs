//! Folio API server library.
//!
//! Exposes the building blocks (config, state, error handling, routes,
//! account services) so integration tests, the server binary and the
//! `create-superuser` binary can all use them.

pub mod accounts;
pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod state;
