use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;

use crate::modules::notifications::model::{
    CreateNotificationDto, Notification, UpdateNotificationDto,
};
use crate::utils::errors::AppError;

const NOTIFICATION_COLUMNS: &str = "id, title, message, notification_type, is_read, \
                                    sender_id, recipient_id, created_at, updated_at";

pub struct NotificationService;

impl NotificationService {
    /// Only rows the caller sent or received.
    #[instrument(skip(db))]
    pub async fn get_notifications(db: &PgPool, user_id: i32) -> Result<Vec<Notification>, AppError> {
        let notifications = sqlx::query_as::<_, Notification>(&format!(
            "SELECT {NOTIFICATION_COLUMNS} FROM notifications
             WHERE sender_id = $1 OR recipient_id = $1
             ORDER BY created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(db)
        .await
        .context("Failed to fetch notifications")
        .map_err(AppError::database)?;

        Ok(notifications)
    }

    /// A row the caller neither sent nor received answers 404.
    #[instrument(skip(db))]
    pub async fn get_notification_by_id(
        db: &PgPool,
        id: i32,
        user_id: i32,
    ) -> Result<Notification, AppError> {
        let notification = sqlx::query_as::<_, Notification>(&format!(
            "SELECT {NOTIFICATION_COLUMNS} FROM notifications
             WHERE id = $1 AND (sender_id = $2 OR recipient_id = $2)"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch notification by ID")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Notification not found")))?;

        Ok(notification)
    }

    #[instrument(skip(db, dto))]
    pub async fn create_notification(
        db: &PgPool,
        sender_id: i32,
        dto: CreateNotificationDto,
    ) -> Result<Notification, AppError> {
        let notification = sqlx::query_as::<_, Notification>(&format!(
            "INSERT INTO notifications (title, message, notification_type, sender_id, recipient_id)
             VALUES ($1, $2, COALESCE($3, 'general'), $4, $5)
             RETURNING {NOTIFICATION_COLUMNS}"
        ))
        .bind(&dto.title)
        .bind(&dto.message)
        .bind(dto.notification_type)
        .bind(sender_id)
        .bind(dto.recipient_id)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_foreign_key_violation() {
                    return AppError::bad_request(anyhow::anyhow!(
                        "Recipient {} does not exist",
                        dto.recipient_id
                    ));
                }
            }
            AppError::database(anyhow::Error::from(e))
        })?;

        Ok(notification)
    }

    /// Scoped to the sender: a non-sender caller sees 404.
    #[instrument(skip(db, dto))]
    pub async fn update_notification(
        db: &PgPool,
        id: i32,
        sender_id: i32,
        dto: UpdateNotificationDto,
    ) -> Result<Notification, AppError> {
        let existing = sqlx::query_as::<_, Notification>(&format!(
            "SELECT {NOTIFICATION_COLUMNS} FROM notifications WHERE id = $1 AND sender_id = $2"
        ))
        .bind(id)
        .bind(sender_id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch notification for update")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Notification not found")))?;

        let title = dto.title.unwrap_or(existing.title);
        let message = dto.message.unwrap_or(existing.message);
        let notification_type = dto.notification_type.unwrap_or(existing.notification_type);
        let is_read = dto.is_read.unwrap_or(existing.is_read);

        let notification = sqlx::query_as::<_, Notification>(&format!(
            "UPDATE notifications
             SET title = $1, message = $2, notification_type = $3, is_read = $4, updated_at = NOW()
             WHERE id = $5 AND sender_id = $6
             RETURNING {NOTIFICATION_COLUMNS}"
        ))
        .bind(&title)
        .bind(&message)
        .bind(notification_type)
        .bind(is_read)
        .bind(id)
        .bind(sender_id)
        .fetch_one(db)
        .await
        .context("Failed to update notification")
        .map_err(AppError::database)?;

        Ok(notification)
    }

    /// Scoped to the sender: a non-sender caller sees 404.
    #[instrument(skip(db))]
    pub async fn delete_notification(db: &PgPool, id: i32, sender_id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = $1 AND sender_id = $2")
            .bind(id)
            .bind(sender_id)
            .execute(db)
            .await
            .context("Failed to delete notification")
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!(
                "Notification not found"
            )));
        }

        Ok(())
    }
}
