//! Account creation paths shared by the HTTP handlers and the
//! `create-superuser` binary.
//!
//! Both paths end in [`UserRepo::create`], which normalizes the access flags
//! before the insert.

use folio_core::error::CoreError;
use folio_core::roles::{superuser_flags, AccessFlags};
use folio_core::validation::{blank_to_none, normalize_email, MIN_PASSWORD_LENGTH};
use folio_db::models::user::{CreateUser, User};
use folio_db::repositories::UserRepo;
use folio_db::DbPool;

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};

/// Caller-supplied fields common to both creation paths.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
    pub password: String,
}

/// Create a self-registered account. Role is always `CUSTOMER`.
pub async fn register_customer(pool: &DbPool, account: NewAccount) -> AppResult<User> {
    let user = create_account(pool, account, AccessFlags::customer()).await?;
    tracing::info!(user_id = user.id, "Customer registered");
    Ok(user)
}

/// Create a superuser account.
///
/// `is_staff` / `is_superuser` are what the caller explicitly asked for; an
/// explicit `false` is rejected before anything is hashed or written.
pub async fn create_superuser(
    pool: &DbPool,
    account: NewAccount,
    is_staff: Option<bool>,
    is_superuser: Option<bool>,
) -> AppResult<User> {
    let access = superuser_flags(is_staff, is_superuser)?;
    let user = create_account(pool, account, access).await?;
    tracing::info!(user_id = user.id, "Superuser created");
    Ok(user)
}

async fn create_account(pool: &DbPool, account: NewAccount, access: AccessFlags) -> AppResult<User> {
    let email = normalize_email(&account.email)?;

    validate_password_strength(&account.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let password_hash = hash_password(&account.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let input = CreateUser {
        email,
        username: blank_to_none(account.username),
        full_name: blank_to_none(account.full_name),
        phone_number: blank_to_none(account.phone_number),
        password_hash,
        access,
    };

    Ok(UserRepo::create(pool, &input).await?)
}
