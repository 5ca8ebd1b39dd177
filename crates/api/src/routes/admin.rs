//! Route definitions for the `/admin` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET  /users             -> list_users (staff)
/// GET  /contact-messages  -> list_contact_messages (staff)
/// POST /superusers        -> create_superuser (superuser)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(admin::list_users))
        .route("/contact-messages", get(admin::list_contact_messages))
        .route("/superusers", post(admin::create_superuser))
}
