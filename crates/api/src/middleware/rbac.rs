//! Role-based guards layered on top of [`AuthUser`].
//!
//! A guard rejects with 401 when the token is missing or invalid and with
//! 403 when the token is valid but lacks the required flag.
//!
//! Token claims go stale when a role changes through the profile endpoint or
//! an account is deactivated, so once the claims pass, the guard re-reads the
//! user row and checks the stored flags and `is_active` as well.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use folio_core::error::CoreError;
use folio_core::types::DbId;
use folio_db::repositories::UserRepo;

use crate::error::AppError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Requires the staff flag (every `ADMIN` account has it).
#[derive(Debug, Clone)]
pub struct RequireStaff(pub AuthUser);

/// Requires the superuser flag.
#[derive(Debug, Clone)]
pub struct RequireSuperuser(pub AuthUser);

impl FromRequestParts<AppState> for RequireStaff {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claimed = AuthUser::from_request_parts(parts, state).await?;
        if !claimed.is_staff {
            return Err(staff_required());
        }

        let user = reload(state, claimed.user_id).await?;
        if !user.is_staff {
            tracing::debug!(user_id = user.user_id, "Stale staff claim rejected");
            return Err(staff_required());
        }
        Ok(RequireStaff(user))
    }
}

impl FromRequestParts<AppState> for RequireSuperuser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claimed = AuthUser::from_request_parts(parts, state).await?;
        if !claimed.is_superuser {
            return Err(superuser_required());
        }

        let user = reload(state, claimed.user_id).await?;
        if !user.is_superuser {
            tracing::debug!(user_id = user.user_id, "Stale superuser claim rejected");
            return Err(superuser_required());
        }
        Ok(RequireSuperuser(user))
    }
}

/// Load the current access flags for `user_id` from the database.
async fn reload(state: &AppState, user_id: DbId) -> Result<AuthUser, AppError> {
    let user = UserRepo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "User account is disabled".into(),
        )));
    }

    let access = user.access_flags();
    Ok(AuthUser {
        user_id: user.id,
        role: access.role,
        is_staff: access.is_staff,
        is_superuser: access.is_superuser,
    })
}

fn staff_required() -> AppError {
    AppError::Core(CoreError::Forbidden("Staff access required".into()))
}

fn superuser_required() -> AppError {
    AppError::Core(CoreError::Forbidden("Superuser access required".into()))
}
