//! User entity model and DTOs.

use folio_core::roles::{AccessFlags, Role};
use folio_core::types::{DbId, Timestamp};
use folio_core::validation::blank_to_none;
use serde::Serialize;
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`ProfileResponse`] or [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
    pub profile_image: Option<String>,
    #[sqlx(try_from = "String")]
    pub role: Role,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub is_active: bool,
    pub password_hash: String,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    pub fn access_flags(&self) -> AccessFlags {
        AccessFlags {
            role: self.role,
            is_staff: self.is_staff,
            is_superuser: self.is_superuser,
        }
    }
}

/// The account's own view of itself (`GET /accounts/profile`).
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub id: DbId,
    pub email: String,
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
    pub profile_image: Option<String>,
    pub role: Role,
}

impl From<&User> for ProfileResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            username: user.username.clone(),
            full_name: user.full_name.clone(),
            phone_number: user.phone_number.clone(),
            profile_image: user.profile_image.clone(),
            role: user.role,
        }
    }
}

/// Staff-facing user representation (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub email: String,
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub role: Role,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub is_active: bool,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            username: user.username.clone(),
            full_name: user.full_name.clone(),
            role: user.role,
            is_staff: user.is_staff,
            is_superuser: user.is_superuser,
            is_active: user.is_active,
            last_login_at: user.last_login_at,
            created_at: user.created_at,
        }
    }
}

/// DTO for creating a new user.
///
/// `access` is normalized by the repository before insert, whatever the
/// caller put in it.
#[derive(Debug)]
pub struct CreateUser {
    pub email: String,
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
    pub password_hash: String,
    pub access: AccessFlags,
}

/// DTO for a partial profile update. `None` leaves a field unchanged; a
/// blank string clears an optional text field.
///
/// There is no staff or superuser field: those are derived from `role` and
/// the stored superuser flag.
#[derive(Debug, Default)]
pub struct UpdateProfile {
    pub email: Option<String>,
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
    pub profile_image: Option<String>,
    pub role: Option<Role>,
}

impl UpdateProfile {
    /// Apply this update on top of `current`, returning the row values to
    /// write. The access flags are normalized.
    pub fn merge_into(&self, current: &User) -> MergedProfile {
        let access = AccessFlags {
            role: self.role.unwrap_or(current.role),
            is_staff: current.is_staff,
            is_superuser: current.is_superuser,
        }
        .normalized();

        MergedProfile {
            email: self.email.clone().unwrap_or_else(|| current.email.clone()),
            username: merge_optional(&self.username, &current.username),
            full_name: merge_optional(&self.full_name, &current.full_name),
            phone_number: merge_optional(&self.phone_number, &current.phone_number),
            profile_image: merge_optional(&self.profile_image, &current.profile_image),
            access,
        }
    }
}

/// Fully-resolved profile columns produced by [`UpdateProfile::merge_into`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedProfile {
    pub email: String,
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
    pub profile_image: Option<String>,
    pub access: AccessFlags,
}

/// Submitted text is trimmed and a blank value clears the column, matching
/// what registration stores.
fn merge_optional(update: &Option<String>, current: &Option<String>) -> Option<String> {
    match update {
        Some(_) => blank_to_none(update.clone()),
        None => current.clone(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn customer() -> User {
        User {
            id: 7,
            email: "ada@example.com".into(),
            username: Some("ada".into()),
            full_name: Some("Ada Lovelace".into()),
            phone_number: None,
            profile_image: None,
            role: Role::Customer,
            is_staff: false,
            is_superuser: false,
            is_active: true,
            password_hash: "$argon2id$placeholder".into(),
            last_login_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn empty_update_keeps_everything() {
        let user = customer();
        let merged = UpdateProfile::default().merge_into(&user);
        assert_eq!(merged.email, user.email);
        assert_eq!(merged.username, user.username);
        assert_eq!(merged.full_name, user.full_name);
        assert_eq!(merged.access, AccessFlags::customer());
    }

    #[test]
    fn blank_string_clears_optional_field() {
        let update = UpdateProfile {
            username: Some(String::new()),
            phone_number: Some("+15550100".into()),
            ..Default::default()
        };
        let merged = update.merge_into(&customer());
        assert_eq!(merged.username, None);
        assert_eq!(merged.phone_number.as_deref(), Some("+15550100"));
    }

    #[test]
    fn submitted_text_is_trimmed_like_registration() {
        let update = UpdateProfile {
            username: Some("  ada  ".into()),
            full_name: Some("\tAda King ".into()),
            profile_image: Some("   ".into()),
            ..Default::default()
        };
        let merged = update.merge_into(&customer());
        assert_eq!(merged.username.as_deref(), Some("ada"));
        assert_eq!(merged.full_name.as_deref(), Some("Ada King"));
        assert_eq!(merged.profile_image, None);
    }

    #[test]
    fn role_change_is_normalized() {
        let update = UpdateProfile {
            role: Some(Role::Admin),
            ..Default::default()
        };
        let merged = update.merge_into(&customer());
        assert_eq!(merged.access.role, Role::Admin);
        assert!(merged.access.is_staff);
        assert!(!merged.access.is_superuser);
    }

    #[test]
    fn superuser_stays_admin_when_demotion_is_requested() {
        let mut user = customer();
        user.role = Role::Admin;
        user.is_staff = true;
        user.is_superuser = true;

        let update = UpdateProfile {
            role: Some(Role::Customer),
            ..Default::default()
        };
        let merged = update.merge_into(&user);
        assert_eq!(merged.access, AccessFlags::superuser());
    }
}
