//! Handler for the public contact form.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use folio_core::validation::{blank_to_none, normalize_email, required_text};
use folio_db::models::contact_message::{ContactMessage, CreateContactMessage};
use folio_db::repositories::ContactMessageRepo;
use serde::Deserialize;
use validator::Validate;

use crate::error::AppResult;
use crate::state::AppState;

/// Request body for `POST /contact`.
#[derive(Debug, Deserialize, Validate)]
pub struct ContactRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(email(message = "Enter a valid email address."))]
    pub email: String,
    #[validate(length(max = 255))]
    pub subject: Option<String>,
    pub message: String,
}

/// POST /api/v1/contact
///
/// Store a contact message. 201 with the saved message, 400 on invalid input.
/// `name` and `message` are trimmed and must not be blank.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<ContactRequest>,
) -> AppResult<(StatusCode, Json<ContactMessage>)> {
    input.validate()?;

    let create_dto = CreateContactMessage {
        name: required_text("name", &input.name)?,
        email: normalize_email(&input.email)?,
        subject: blank_to_none(input.subject),
        message: required_text("message", &input.message)?,
    };
    let saved = ContactMessageRepo::create(&state.pool, &create_dto).await?;
    tracing::info!(contact_message_id = saved.id, "Contact message received");

    Ok((StatusCode::CREATED, Json(saved)))
}
