use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;

use crate::modules::newsletters::model::{
    CreateNewsletterDto, Newsletter, NewsletterRow, UpdateNewsletterDto,
};
use crate::utils::errors::AppError;

const NEWSLETTER_COLUMNS: &str = "id, title, content, attachments, published_at, status, \
                                  author_id, created_at, updated_at";

fn encode_attachments(attachments: &[String]) -> Result<String, AppError> {
    serde_json::to_string(attachments)
        .context("Failed to encode attachments")
        .map_err(AppError::internal)
}

pub struct NewsletterService;

impl NewsletterService {
    #[instrument(skip(db))]
    pub async fn get_newsletters(db: &PgPool) -> Result<Vec<Newsletter>, AppError> {
        let rows = sqlx::query_as::<_, NewsletterRow>(&format!(
            "SELECT {NEWSLETTER_COLUMNS} FROM newsletters ORDER BY created_at DESC"
        ))
        .fetch_all(db)
        .await
        .context("Failed to fetch newsletters")
        .map_err(AppError::database)?;

        Ok(rows.into_iter().map(Newsletter::from).collect())
    }

    #[instrument(skip(db))]
    pub async fn get_newsletter_by_id(db: &PgPool, id: i32) -> Result<Newsletter, AppError> {
        let row = sqlx::query_as::<_, NewsletterRow>(&format!(
            "SELECT {NEWSLETTER_COLUMNS} FROM newsletters WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch newsletter by ID")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Newsletter not found")))?;

        Ok(Newsletter::from(row))
    }

    #[instrument(skip(db, dto))]
    pub async fn create_newsletter(
        db: &PgPool,
        author_id: i32,
        dto: CreateNewsletterDto,
    ) -> Result<Newsletter, AppError> {
        let attachments = match &dto.attachments {
            Some(list) => Some(encode_attachments(list)?),
            None => None,
        };

        let row = sqlx::query_as::<_, NewsletterRow>(&format!(
            "INSERT INTO newsletters (title, content, attachments, published_at, status, author_id)
             VALUES ($1, $2, $3, $4, COALESCE($5, 'draft'), $6)
             RETURNING {NEWSLETTER_COLUMNS}"
        ))
        .bind(&dto.title)
        .bind(&dto.content)
        .bind(&attachments)
        .bind(dto.published_at)
        .bind(dto.status)
        .bind(author_id)
        .fetch_one(db)
        .await
        .context("Failed to create newsletter")
        .map_err(AppError::database)?;

        Ok(Newsletter::from(row))
    }

    /// Scoped to the author: a non-author caller sees 404, the row's
    /// existence is not revealed.
    #[instrument(skip(db, dto))]
    pub async fn update_newsletter(
        db: &PgPool,
        id: i32,
        author_id: i32,
        dto: UpdateNewsletterDto,
    ) -> Result<Newsletter, AppError> {
        let existing = sqlx::query_as::<_, NewsletterRow>(&format!(
            "SELECT {NEWSLETTER_COLUMNS} FROM newsletters WHERE id = $1 AND author_id = $2"
        ))
        .bind(id)
        .bind(author_id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch newsletter for update")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Newsletter not found")))?;

        let existing = Newsletter::from(existing);

        let title = dto.title.unwrap_or(existing.title);
        let content = dto.content.unwrap_or(existing.content);
        let attachments = encode_attachments(&dto.attachments.unwrap_or(existing.attachments))?;
        let published_at = dto.published_at.or(existing.published_at);
        let status = dto.status.unwrap_or(existing.status);

        let row = sqlx::query_as::<_, NewsletterRow>(&format!(
            "UPDATE newsletters
             SET title = $1, content = $2, attachments = $3, published_at = $4,
                 status = $5, updated_at = NOW()
             WHERE id = $6 AND author_id = $7
             RETURNING {NEWSLETTER_COLUMNS}"
        ))
        .bind(&title)
        .bind(&content)
        .bind(&attachments)
        .bind(published_at)
        .bind(status)
        .bind(id)
        .bind(author_id)
        .fetch_one(db)
        .await
        .context("Failed to update newsletter")
        .map_err(AppError::database)?;

        Ok(Newsletter::from(row))
    }

    #[instrument(skip(db))]
    pub async fn delete_newsletter(db: &PgPool, id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM newsletters WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .context("Failed to delete newsletter")
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Newsletter not found")));
        }

        Ok(())
    }
}
