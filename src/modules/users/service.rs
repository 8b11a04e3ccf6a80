use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;

use crate::modules::users::model::{ChangePasswordDto, UpdateUserDto, User, UserRole};
use crate::utils::errors::AppError;
use crate::utils::password::{hash_password, verify_password};
use crate::utils::storage::PhotoStorage;

const USER_COLUMNS: &str =
    "id, username, email, first_name, last_name, role, photo_url, created_at, updated_at";

pub struct UserService;

impl UserService {
    #[instrument(skip(db))]
    pub async fn get_users(db: &PgPool) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY last_name, first_name"
        ))
        .fetch_all(db)
        .await
        .context("Failed to fetch users")
        .map_err(AppError::database)?;

        Ok(users)
    }

    #[instrument(skip(db))]
    pub async fn get_user_by_id(db: &PgPool, id: i32) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch user by ID")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))?;

        Ok(user)
    }

    /// Partial update with keep-old-if-omitted semantics, merged
    /// field-by-field against the stored row.
    #[instrument(skip(db, dto))]
    pub async fn update_user(db: &PgPool, id: i32, dto: UpdateUserDto) -> Result<User, AppError> {
        let existing = Self::get_user_by_id(db, id).await?;

        if let Some(username) = &dto.username {
            if username != &existing.username {
                let taken = sqlx::query_scalar::<_, i32>(
                    "SELECT 1 FROM users WHERE username = $1",
                )
                .bind(username)
                .fetch_optional(db)
                .await
                .map_err(AppError::database)?;
                if taken.is_some() {
                    return Err(AppError::conflict(anyhow::anyhow!(
                        "Username already exists"
                    )));
                }
            }
        }

        if let Some(email) = &dto.email {
            if email != &existing.email {
                let taken = sqlx::query_scalar::<_, i32>("SELECT 1 FROM users WHERE email = $1")
                    .bind(email)
                    .fetch_optional(db)
                    .await
                    .map_err(AppError::database)?;
                if taken.is_some() {
                    return Err(AppError::conflict(anyhow::anyhow!("Email already exists")));
                }
            }
        }

        let username = dto.username.unwrap_or(existing.username);
        let email = dto.email.unwrap_or(existing.email);
        let first_name = dto.first_name.unwrap_or(existing.first_name);
        let last_name = dto.last_name.unwrap_or(existing.last_name);

        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users
             SET username = $1, email = $2, first_name = $3, last_name = $4, updated_at = NOW()
             WHERE id = $5
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&username)
        .bind(&email)
        .bind(&first_name)
        .bind(&last_name)
        .bind(id)
        .fetch_one(db)
        .await
        .context("Failed to update user")
        .map_err(AppError::database)?;

        Ok(user)
    }

    /// Change a user's password. `verify_current` is set when the caller is
    /// the target user themselves; admins acting on another account skip
    /// the current-password check.
    ///
    /// The verify-then-overwrite pair is not transactional; concurrent
    /// changes to the same row are last-writer-wins.
    #[instrument(skip(db, dto))]
    pub async fn change_password(
        db: &PgPool,
        id: i32,
        dto: ChangePasswordDto,
        verify_current: bool,
    ) -> Result<(), AppError> {
        let stored_hash = sqlx::query_scalar::<_, String>(
            "SELECT password FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch user by ID")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))?;

        if verify_current {
            let current = dto.current_password.as_deref().ok_or_else(|| {
                AppError::unauthorized(anyhow::anyhow!("Current password is required"))
            })?;

            let is_match = verify_password(current, &stored_hash)?;
            if !is_match {
                return Err(AppError::unauthorized(anyhow::anyhow!(
                    "Current password is incorrect"
                )));
            }
        }

        let new_hash = hash_password(&dto.new_password)?;

        sqlx::query("UPDATE users SET password = $1, updated_at = NOW() WHERE id = $2")
            .bind(&new_hash)
            .bind(id)
            .execute(db)
            .await
            .context("Failed to update password")
            .map_err(AppError::database)?;

        Ok(())
    }

    /// Store a new profile photo and swap the user's reference to it.
    /// The previous locally stored photo is removed best-effort.
    #[instrument(skip(db, storage, content))]
    pub async fn update_photo(
        db: &PgPool,
        storage: &PhotoStorage,
        id: i32,
        original_filename: &str,
        content: &[u8],
    ) -> Result<String, AppError> {
        let user = Self::get_user_by_id(db, id).await?;

        let key = PhotoStorage::generate_key(original_filename);
        let photo_url = storage.save(&key, content).await?;

        if let Some(old) = &user.photo_url {
            storage.delete_reference(old).await;
        }

        sqlx::query("UPDATE users SET photo_url = $1, updated_at = NOW() WHERE id = $2")
            .bind(&photo_url)
            .bind(id)
            .execute(db)
            .await
            .context("Failed to update photo reference")
            .map_err(AppError::database)?;

        Ok(photo_url)
    }

    /// Hard delete. Blocked when it would remove the last admin; teacher
    /// and parent rows owned by the user go with it via FK cascade.
    #[instrument(skip(db, storage))]
    pub async fn delete_user(
        db: &PgPool,
        storage: &PhotoStorage,
        id: i32,
    ) -> Result<(), AppError> {
        let user = Self::get_user_by_id(db, id).await?;

        if user.role == UserRole::Admin {
            let admin_count = sqlx::query_scalar::<_, i64>(
                "SELECT COUNT(*) FROM users WHERE role = 'admin'",
            )
            .fetch_one(db)
            .await
            .context("Failed to count admins")
            .map_err(AppError::database)?;

            if admin_count <= 1 {
                return Err(AppError::bad_request(anyhow::anyhow!(
                    "Cannot delete the last admin user"
                )));
            }
        }

        if let Some(photo_url) = &user.photo_url {
            storage.delete_reference(photo_url).await;
        }

        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .context("Failed to delete user")
            .map_err(AppError::database)?;

        Ok(())
    }
}
