use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;

use crate::modules::authorizations::model::{
    Authorization, CreateAuthorizationDto, UpdateAuthorizationDto,
};
use crate::utils::errors::AppError;

const AUTHORIZATION_COLUMNS: &str = "id, title, description, status, response_date, \
                                     response_notes, expiry_date, student_id, parent_id, \
                                     requested_by_id, responded_by_id, created_at, updated_at";

pub struct AuthorizationService;

impl AuthorizationService {
    #[instrument(skip(db))]
    pub async fn get_authorizations(db: &PgPool) -> Result<Vec<Authorization>, AppError> {
        let authorizations = sqlx::query_as::<_, Authorization>(&format!(
            "SELECT {AUTHORIZATION_COLUMNS} FROM authorizations ORDER BY created_at DESC"
        ))
        .fetch_all(db)
        .await
        .context("Failed to fetch authorizations")
        .map_err(AppError::database)?;

        Ok(authorizations)
    }

    #[instrument(skip(db))]
    pub async fn get_authorization_by_id(db: &PgPool, id: i32) -> Result<Authorization, AppError> {
        let authorization = sqlx::query_as::<_, Authorization>(&format!(
            "SELECT {AUTHORIZATION_COLUMNS} FROM authorizations WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch authorization by ID")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Authorization not found")))?;

        Ok(authorization)
    }

    #[instrument(skip(db, dto))]
    pub async fn create_authorization(
        db: &PgPool,
        requested_by_id: i32,
        dto: CreateAuthorizationDto,
    ) -> Result<Authorization, AppError> {
        let authorization = sqlx::query_as::<_, Authorization>(&format!(
            "INSERT INTO authorizations (title, description, expiry_date, student_id,
                                         parent_id, requested_by_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {AUTHORIZATION_COLUMNS}"
        ))
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(dto.expiry_date)
        .bind(dto.student_id)
        .bind(dto.parent_id)
        .bind(requested_by_id)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_foreign_key_violation() {
                    return AppError::bad_request(anyhow::anyhow!(
                        "Referenced student or parent does not exist"
                    ));
                }
            }
            AppError::database(anyhow::Error::from(e))
        })?;

        Ok(authorization)
    }

    /// A status change records the caller as the responder and stamps
    /// the response date.
    #[instrument(skip(db, dto))]
    pub async fn update_authorization(
        db: &PgPool,
        id: i32,
        responder_id: i32,
        dto: UpdateAuthorizationDto,
    ) -> Result<Authorization, AppError> {
        let existing = Self::get_authorization_by_id(db, id).await?;

        let title = dto.title.unwrap_or(existing.title);
        let description = dto.description.unwrap_or(existing.description);
        let responding = dto.status.is_some();
        let status = dto.status.unwrap_or(existing.status);
        let response_notes = dto.response_notes.or(existing.response_notes);
        let expiry_date = dto.expiry_date.or(existing.expiry_date);
        let responded_by_id = if responding {
            Some(responder_id)
        } else {
            existing.responded_by_id
        };

        let authorization = sqlx::query_as::<_, Authorization>(&format!(
            "UPDATE authorizations
             SET title = $1, description = $2, status = $3, response_notes = $4,
                 expiry_date = $5, responded_by_id = $6,
                 response_date = CASE WHEN $7 THEN NOW() ELSE response_date END,
                 updated_at = NOW()
             WHERE id = $8
             RETURNING {AUTHORIZATION_COLUMNS}"
        ))
        .bind(&title)
        .bind(&description)
        .bind(status)
        .bind(&response_notes)
        .bind(expiry_date)
        .bind(responded_by_id)
        .bind(responding)
        .bind(id)
        .fetch_one(db)
        .await
        .context("Failed to update authorization")
        .map_err(AppError::database)?;

        Ok(authorization)
    }

    #[instrument(skip(db))]
    pub async fn delete_authorization(db: &PgPool, id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM authorizations WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .context("Failed to delete authorization")
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!(
                "Authorization not found"
            )));
        }

        Ok(())
    }
}
