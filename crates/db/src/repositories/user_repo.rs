//! Repository for the `users` table.
//!
//! Every statement that writes `role`, `is_staff` or `is_superuser` binds
//! normalized [`AccessFlags`](folio_core::roles::AccessFlags).

use folio_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, UpdateProfile, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, username, full_name, phone_number, profile_image, \
                        role, is_staff, is_superuser, is_active, password_hash, \
                        last_login_at, created_at, updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let access = input.access.normalized();
        let query = format!(
            "INSERT INTO users
                (email, username, full_name, phone_number, password_hash,
                 role, is_staff, is_superuser)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.email)
            .bind(&input.username)
            .bind(&input.full_name)
            .bind(&input.phone_number)
            .bind(&input.password_hash)
            .bind(access.role.as_str())
            .bind(access.is_staff)
            .bind(access.is_superuser)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by (already normalized) email.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List all users ordered by most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, User>(&query).fetch_all(pool).await
    }

    /// Apply a partial profile update.
    ///
    /// The row is locked, merged with `input`, re-normalized and written back
    /// in one transaction. Returns `None` if no row with the given `id` exists.
    pub async fn update_profile(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProfile,
    ) -> Result<Option<User>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let select = format!("SELECT {COLUMNS} FROM users WHERE id = $1 FOR UPDATE");
        let Some(current) = sqlx::query_as::<_, User>(&select)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let merged = input.merge_into(&current);
        let update = format!(
            "UPDATE users SET
                email = $2,
                username = $3,
                full_name = $4,
                phone_number = $5,
                profile_image = $6,
                role = $7,
                is_staff = $8,
                is_superuser = $9,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&update)
            .bind(id)
            .bind(&merged.email)
            .bind(&merged.username)
            .bind(&merged.full_name)
            .bind(&merged.phone_number)
            .bind(&merged.profile_image)
            .bind(merged.access.role.as_str())
            .bind(merged.access.is_staff)
            .bind(merged.access.is_superuser)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        if user.role != current.role {
            tracing::info!(
                user_id = id,
                from = %current.role,
                to = %user.role,
                is_staff = user.is_staff,
                "User role changed through profile update"
            );
        }
        Ok(Some(user))
    }

    /// Set `last_login_at` to now.
    pub async fn record_successful_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET last_login_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
