//! Small response bodies shared by handlers.

use serde::Serialize;

/// `{ "message": ... }` body for endpoints that only acknowledge an action.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
