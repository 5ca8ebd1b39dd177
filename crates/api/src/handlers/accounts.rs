//! Handlers for the `/accounts` resource (register, login, refresh, logout,
//! profile).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use folio_core::error::CoreError;
use folio_core::roles::Role;
use folio_core::validation::normalize_email;
use folio_db::models::session::CreateSession;
use folio_db::models::user::{ProfileResponse, UpdateProfile, User};
use folio_db::repositories::{SessionRepo, UserRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::accounts::{self, NewAccount};
use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::MessageResponse;
use crate::state::AppState;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /accounts/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Enter a valid email address."))]
    pub email: String,
    #[validate(length(max = 150))]
    pub username: Option<String>,
    #[validate(length(max = 255))]
    pub full_name: Option<String>,
    #[validate(length(max = 15))]
    pub phone_number: Option<String>,
    #[validate(length(min = 6, message = "Ensure this field has at least 6 characters."))]
    pub password: String,
}

/// Request body for `POST /accounts/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Enter a valid email address."))]
    pub email: String,
    pub password: String,
}

/// Request body for `POST /accounts/refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh: String,
}

/// Token pair returned by login and refresh.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub refresh: String,
    pub access: String,
    pub role: Role,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
}

/// Request body for `PUT /accounts/profile`. Every field is optional.
///
/// Staff and superuser flags are not accepted here; unknown fields are
/// ignored by deserialization.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(email(message = "Enter a valid email address."))]
    pub email: Option<String>,
    #[validate(length(max = 150))]
    pub username: Option<String>,
    #[validate(length(max = 255))]
    pub full_name: Option<String>,
    #[validate(length(max = 15))]
    pub phone_number: Option<String>,
    #[validate(length(max = 500))]
    pub profile_image: Option<String>,
    pub role: Option<Role>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/accounts/register
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    input.validate()?;

    let account = NewAccount {
        email: input.email,
        username: input.username,
        full_name: input.full_name,
        phone_number: input.phone_number,
        password: input.password,
    };
    accounts::register_customer(&state.pool, account).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Registration successful",
        }),
    ))
}

/// POST /api/v1/accounts/login
///
/// Authenticate with email + password. Returns access and refresh tokens.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    input.validate()?;
    let email = normalize_email(&input.email)?;

    let user = UserRepo::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized(INVALID_CREDENTIALS.into())))?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::debug!(user_id = user.id, "Login rejected: wrong password");
        return Err(AppError::Core(CoreError::Unauthorized(
            INVALID_CREDENTIALS.into(),
        )));
    }

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "User account is disabled".into(),
        )));
    }

    UserRepo::record_successful_login(&state.pool, user.id).await?;
    tracing::info!(user_id = user.id, role = %user.role, "User logged in");

    Ok(Json(issue_tokens(&state, &user).await?))
}

/// POST /api/v1/accounts/refresh
///
/// Exchange a valid refresh token for a new token pair. The old session is
/// revoked (rotation).
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<TokenResponse>> {
    let invalid = || {
        AppError::Core(CoreError::Unauthorized(
            "Invalid or expired refresh token".into(),
        ))
    };

    let token_hash = hash_refresh_token(&input.refresh);
    let session = SessionRepo::find_by_refresh_token_hash(&state.pool, &token_hash)
        .await?
        .ok_or_else(invalid)?;

    // A concurrent refresh with the same token loses here.
    if !SessionRepo::revoke(&state.pool, session.id).await? {
        return Err(invalid());
    }

    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "User account is disabled".into(),
        )));
    }

    Ok(Json(issue_tokens(&state, &user).await?))
}

/// POST /api/v1/accounts/logout
///
/// Revoke all sessions for the authenticated user. Returns 204 No Content.
pub async fn logout(State(state): State<AppState>, auth_user: AuthUser) -> AppResult<StatusCode> {
    let revoked = SessionRepo::revoke_all_for_user(&state.pool, auth_user.user_id).await?;
    tracing::info!(user_id = auth_user.user_id, revoked, "User logged out");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/accounts/profile
pub async fn get_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<ProfileResponse>> {
    let user = UserRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth_user.user_id,
        }))?;
    Ok(Json(ProfileResponse::from(&user)))
}

/// PUT /api/v1/accounts/profile
///
/// Partial update. A submitted `role` is accepted and the staff/superuser
/// flags are re-derived from it on save.
pub async fn update_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<UpdateProfileRequest>,
) -> AppResult<Json<ProfileResponse>> {
    input.validate()?;

    let email = input.email.as_deref().map(normalize_email).transpose()?;
    let update = UpdateProfile {
        email,
        username: input.username,
        full_name: input.full_name,
        phone_number: input.phone_number,
        profile_image: input.profile_image,
        role: input.role,
    };

    let user = UserRepo::update_profile(&state.pool, auth_user.user_id, &update)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth_user.user_id,
        }))?;
    Ok(Json(ProfileResponse::from(&user)))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Generate access + refresh tokens, persist a session row, and build the response.
async fn issue_tokens(state: &AppState, user: &User) -> AppResult<TokenResponse> {
    let jwt = &state.config.jwt;
    let access = generate_access_token(user.id, user.access_flags(), jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let lifetime = chrono::Duration::try_days(jwt.refresh_token_expiry_days).ok_or_else(|| {
        AppError::InternalError(format!(
            "Refresh token lifetime out of range: {} days",
            jwt.refresh_token_expiry_days
        ))
    })?;

    let (refresh_plaintext, refresh_hash) = generate_refresh_token();
    let session = CreateSession {
        user_id: user.id,
        refresh_token_hash: refresh_hash,
        expires_at: Utc::now() + lifetime,
    };
    SessionRepo::create(&state.pool, &session).await?;

    Ok(TokenResponse {
        refresh: refresh_plaintext,
        access,
        role: user.role,
        expires_in: jwt.access_token_expiry_secs(),
    })
}
