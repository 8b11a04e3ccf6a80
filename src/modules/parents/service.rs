use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;

use crate::modules::parents::model::{CreateParentDto, Parent, UpdateParentDto};
use crate::utils::errors::AppError;

const PARENT_COLUMNS: &str = "id, user_id, phone_number, address, created_at, updated_at";

pub struct ParentService;

impl ParentService {
    #[instrument(skip(db))]
    pub async fn get_parents(db: &PgPool) -> Result<Vec<Parent>, AppError> {
        let parents = sqlx::query_as::<_, Parent>(&format!(
            "SELECT {PARENT_COLUMNS} FROM parents ORDER BY id"
        ))
        .fetch_all(db)
        .await
        .context("Failed to fetch parents")
        .map_err(AppError::database)?;

        Ok(parents)
    }

    #[instrument(skip(db))]
    pub async fn get_parent_by_id(db: &PgPool, id: i32) -> Result<Parent, AppError> {
        let parent = sqlx::query_as::<_, Parent>(&format!(
            "SELECT {PARENT_COLUMNS} FROM parents WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch parent by ID")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Parent not found")))?;

        Ok(parent)
    }

    #[instrument(skip(db, dto))]
    pub async fn create_parent(db: &PgPool, dto: CreateParentDto) -> Result<Parent, AppError> {
        let parent = sqlx::query_as::<_, Parent>(&format!(
            "INSERT INTO parents (user_id, phone_number, address)
             VALUES ($1, $2, $3)
             RETURNING {PARENT_COLUMNS}"
        ))
        .bind(dto.user_id)
        .bind(&dto.phone_number)
        .bind(&dto.address)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::conflict(anyhow::anyhow!(
                        "User {} already has a parent profile",
                        dto.user_id
                    ));
                }
                if db_err.is_foreign_key_violation() {
                    return AppError::bad_request(anyhow::anyhow!(
                        "User {} does not exist",
                        dto.user_id
                    ));
                }
            }
            AppError::database(anyhow::Error::from(e))
        })?;

        Ok(parent)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_parent(
        db: &PgPool,
        id: i32,
        dto: UpdateParentDto,
    ) -> Result<Parent, AppError> {
        let existing = Self::get_parent_by_id(db, id).await?;

        let phone_number = dto.phone_number.unwrap_or(existing.phone_number);
        let address = dto.address.unwrap_or(existing.address);

        let parent = sqlx::query_as::<_, Parent>(&format!(
            "UPDATE parents
             SET phone_number = $1, address = $2, updated_at = NOW()
             WHERE id = $3
             RETURNING {PARENT_COLUMNS}"
        ))
        .bind(&phone_number)
        .bind(&address)
        .bind(id)
        .fetch_one(db)
        .await
        .context("Failed to update parent")
        .map_err(AppError::database)?;

        Ok(parent)
    }

    #[instrument(skip(db))]
    pub async fn delete_parent(db: &PgPool, id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM parents WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_foreign_key_violation() {
                        return AppError::bad_request(anyhow::anyhow!(
                            "Parent still has authorization requests on file"
                        ));
                    }
                }
                AppError::database(anyhow::Error::from(e))
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Parent not found")));
        }

        Ok(())
    }
}
