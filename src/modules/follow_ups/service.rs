use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;

use crate::modules::follow_ups::model::{CreateFollowUpDto, FollowUp, UpdateFollowUpDto};
use crate::utils::errors::AppError;

const FOLLOW_UP_COLUMNS: &str = "id, date, notes, activities, mood, sleep_quality, appetite, \
                                 behavior, learning_progress, student_id, teacher_id, \
                                 created_at, updated_at";

pub struct FollowUpService;

impl FollowUpService {
    #[instrument(skip(db))]
    pub async fn get_follow_ups(db: &PgPool) -> Result<Vec<FollowUp>, AppError> {
        let follow_ups = sqlx::query_as::<_, FollowUp>(&format!(
            "SELECT {FOLLOW_UP_COLUMNS} FROM follow_ups ORDER BY date DESC, id DESC"
        ))
        .fetch_all(db)
        .await
        .context("Failed to fetch follow-ups")
        .map_err(AppError::database)?;

        Ok(follow_ups)
    }

    #[instrument(skip(db))]
    pub async fn get_follow_up_by_id(db: &PgPool, id: i32) -> Result<FollowUp, AppError> {
        let follow_up = sqlx::query_as::<_, FollowUp>(&format!(
            "SELECT {FOLLOW_UP_COLUMNS} FROM follow_ups WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch follow-up by ID")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Follow-up not found")))?;

        Ok(follow_up)
    }

    #[instrument(skip(db, dto))]
    pub async fn create_follow_up(
        db: &PgPool,
        teacher_id: i32,
        dto: CreateFollowUpDto,
    ) -> Result<FollowUp, AppError> {
        let follow_up = sqlx::query_as::<_, FollowUp>(&format!(
            "INSERT INTO follow_ups (date, notes, activities, mood, sleep_quality, appetite,
                                     behavior, learning_progress, student_id, teacher_id)
             VALUES (COALESCE($1, CURRENT_DATE), $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {FOLLOW_UP_COLUMNS}"
        ))
        .bind(dto.date)
        .bind(&dto.notes)
        .bind(&dto.activities)
        .bind(dto.mood)
        .bind(dto.sleep_quality)
        .bind(dto.appetite)
        .bind(&dto.behavior)
        .bind(&dto.learning_progress)
        .bind(dto.student_id)
        .bind(teacher_id)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_foreign_key_violation() {
                    return AppError::bad_request(anyhow::anyhow!(
                        "Student {} does not exist",
                        dto.student_id
                    ));
                }
            }
            AppError::database(anyhow::Error::from(e))
        })?;

        Ok(follow_up)
    }

    /// Scoped to the recording user: a non-recorder caller sees 404.
    #[instrument(skip(db, dto))]
    pub async fn update_follow_up(
        db: &PgPool,
        id: i32,
        teacher_id: i32,
        dto: UpdateFollowUpDto,
    ) -> Result<FollowUp, AppError> {
        let existing = sqlx::query_as::<_, FollowUp>(&format!(
            "SELECT {FOLLOW_UP_COLUMNS} FROM follow_ups WHERE id = $1 AND teacher_id = $2"
        ))
        .bind(id)
        .bind(teacher_id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch follow-up for update")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Follow-up not found")))?;

        let date = dto.date.unwrap_or(existing.date);
        let notes = dto.notes.unwrap_or(existing.notes);
        let activities = dto.activities.or(existing.activities);
        let mood = dto.mood.or(existing.mood);
        let sleep_quality = dto.sleep_quality.or(existing.sleep_quality);
        let appetite = dto.appetite.or(existing.appetite);
        let behavior = dto.behavior.or(existing.behavior);
        let learning_progress = dto.learning_progress.or(existing.learning_progress);

        let follow_up = sqlx::query_as::<_, FollowUp>(&format!(
            "UPDATE follow_ups
             SET date = $1, notes = $2, activities = $3, mood = $4, sleep_quality = $5,
                 appetite = $6, behavior = $7, learning_progress = $8, updated_at = NOW()
             WHERE id = $9 AND teacher_id = $10
             RETURNING {FOLLOW_UP_COLUMNS}"
        ))
        .bind(date)
        .bind(&notes)
        .bind(&activities)
        .bind(mood)
        .bind(sleep_quality)
        .bind(appetite)
        .bind(&behavior)
        .bind(&learning_progress)
        .bind(id)
        .bind(teacher_id)
        .fetch_one(db)
        .await
        .context("Failed to update follow-up")
        .map_err(AppError::database)?;

        Ok(follow_up)
    }

    #[instrument(skip(db))]
    pub async fn delete_follow_up(db: &PgPool, id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM follow_ups WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .context("Failed to delete follow-up")
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Follow-up not found")));
        }

        Ok(())
    }
}
