pub mod accounts;
pub mod admin;
pub mod contact;
pub mod health;
pub mod project;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /accounts/register             register (public)
/// /accounts/login                login (public)
/// /accounts/refresh              refresh (public)
/// /accounts/logout               logout (requires auth)
/// /accounts/profile              get, update (requires auth)
///
/// /contact                       submit (public)
///
/// /projects                      list (public), create (staff)
/// /projects/{id}                 get (public)
///
/// /admin/users                   list (staff)
/// /admin/contact-messages        list (staff)
/// /admin/superusers              create (superuser)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/accounts", accounts::router())
        .nest("/contact", contact::router())
        .nest("/projects", project::router())
        .nest("/admin", admin::router())
}
