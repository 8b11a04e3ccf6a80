use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;

use crate::modules::teachers::model::{CreateTeacherDto, Teacher, UpdateTeacherDto};
use crate::utils::errors::AppError;

const TEACHER_COLUMNS: &str =
    "id, user_id, specialization, bio, phone, classroom_id, created_at, updated_at";

pub struct TeacherService;

impl TeacherService {
    #[instrument(skip(db))]
    pub async fn get_teachers(db: &PgPool) -> Result<Vec<Teacher>, AppError> {
        let teachers = sqlx::query_as::<_, Teacher>(&format!(
            "SELECT {TEACHER_COLUMNS} FROM teachers ORDER BY id"
        ))
        .fetch_all(db)
        .await
        .context("Failed to fetch teachers")
        .map_err(AppError::database)?;

        Ok(teachers)
    }

    #[instrument(skip(db))]
    pub async fn get_teacher_by_id(db: &PgPool, id: i32) -> Result<Teacher, AppError> {
        let teacher = sqlx::query_as::<_, Teacher>(&format!(
            "SELECT {TEACHER_COLUMNS} FROM teachers WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch teacher by ID")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Teacher not found")))?;

        Ok(teacher)
    }

    #[instrument(skip(db, dto))]
    pub async fn create_teacher(db: &PgPool, dto: CreateTeacherDto) -> Result<Teacher, AppError> {
        let teacher = sqlx::query_as::<_, Teacher>(&format!(
            "INSERT INTO teachers (user_id, specialization, bio, phone, classroom_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {TEACHER_COLUMNS}"
        ))
        .bind(dto.user_id)
        .bind(&dto.specialization)
        .bind(&dto.bio)
        .bind(&dto.phone)
        .bind(dto.classroom_id)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::conflict(anyhow::anyhow!(
                        "User {} already has a teacher profile",
                        dto.user_id
                    ));
                }
                if db_err.is_foreign_key_violation() {
                    return AppError::bad_request(anyhow::anyhow!(
                        "Referenced user or classroom does not exist"
                    ));
                }
            }
            AppError::database(anyhow::Error::from(e))
        })?;

        Ok(teacher)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_teacher(
        db: &PgPool,
        id: i32,
        dto: UpdateTeacherDto,
    ) -> Result<Teacher, AppError> {
        let existing = Self::get_teacher_by_id(db, id).await?;

        let specialization = dto.specialization.or(existing.specialization);
        let bio = dto.bio.or(existing.bio);
        let phone = dto.phone.or(existing.phone);
        let classroom_id = dto.classroom_id.or(existing.classroom_id);

        let teacher = sqlx::query_as::<_, Teacher>(&format!(
            "UPDATE teachers
             SET specialization = $1, bio = $2, phone = $3, classroom_id = $4, updated_at = NOW()
             WHERE id = $5
             RETURNING {TEACHER_COLUMNS}"
        ))
        .bind(&specialization)
        .bind(&bio)
        .bind(&phone)
        .bind(classroom_id)
        .bind(id)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_foreign_key_violation() {
                    return AppError::bad_request(anyhow::anyhow!(
                        "Classroom does not exist"
                    ));
                }
            }
            AppError::database(anyhow::Error::from(e))
        })?;

        Ok(teacher)
    }

    #[instrument(skip(db))]
    pub async fn delete_teacher(db: &PgPool, id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM teachers WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .context("Failed to delete teacher")
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Teacher not found")));
        }

        Ok(())
    }
}
