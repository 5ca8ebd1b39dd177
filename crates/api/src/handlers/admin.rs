//! Handlers for the `/admin` resource.
//!
//! Listings require the staff flag via [`RequireStaff`]; creating superusers
//! requires [`RequireSuperuser`].

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use folio_db::models::contact_message::ContactMessage;
use folio_db::models::user::UserResponse;
use folio_db::repositories::{ContactMessageRepo, UserRepo};
use serde::Deserialize;
use validator::Validate;

use crate::accounts::{self, NewAccount};
use crate::error::AppResult;
use crate::middleware::rbac::{RequireStaff, RequireSuperuser};
use crate::state::AppState;

/// Request body for `POST /admin/superusers`.
///
/// `is_staff` and `is_superuser` may be omitted; sending `false` for either
/// is rejected.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateSuperuserRequest {
    #[validate(email(message = "Enter a valid email address."))]
    pub email: String,
    #[validate(length(max = 150))]
    pub username: Option<String>,
    #[validate(length(max = 255))]
    pub full_name: Option<String>,
    #[validate(length(max = 15))]
    pub phone_number: Option<String>,
    pub password: String,
    pub is_staff: Option<bool>,
    pub is_superuser: Option<bool>,
}

/// GET /api/v1/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(users.iter().map(UserResponse::from).collect()))
}

/// GET /api/v1/admin/contact-messages
pub async fn list_contact_messages(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
) -> AppResult<Json<Vec<ContactMessage>>> {
    let messages = ContactMessageRepo::list(&state.pool).await?;
    Ok(Json(messages))
}

/// POST /api/v1/admin/superusers
pub async fn create_superuser(
    State(state): State<AppState>,
    RequireSuperuser(admin): RequireSuperuser,
    Json(input): Json<CreateSuperuserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    input.validate()?;

    let account = NewAccount {
        email: input.email,
        username: input.username,
        full_name: input.full_name,
        phone_number: input.phone_number,
        password: input.password,
    };
    let user =
        accounts::create_superuser(&state.pool, account, input.is_staff, input.is_superuser)
            .await?;
    tracing::info!(user_id = user.id, created_by = admin.user_id, "Superuser created via API");

    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}
