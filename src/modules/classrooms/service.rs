use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;

use crate::modules::classrooms::model::{Classroom, CreateClassroomDto, UpdateClassroomDto};
use crate::utils::errors::AppError;

const CLASSROOM_COLUMNS: &str =
    "id, name, description, capacity, age_group, created_at, updated_at";

pub struct ClassroomService;

impl ClassroomService {
    #[instrument(skip(db))]
    pub async fn get_classrooms(db: &PgPool) -> Result<Vec<Classroom>, AppError> {
        let classrooms = sqlx::query_as::<_, Classroom>(&format!(
            "SELECT {CLASSROOM_COLUMNS} FROM classrooms ORDER BY name"
        ))
        .fetch_all(db)
        .await
        .context("Failed to fetch classrooms")
        .map_err(AppError::database)?;

        Ok(classrooms)
    }

    #[instrument(skip(db))]
    pub async fn get_classroom_by_id(db: &PgPool, id: i32) -> Result<Classroom, AppError> {
        let classroom = sqlx::query_as::<_, Classroom>(&format!(
            "SELECT {CLASSROOM_COLUMNS} FROM classrooms WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch classroom by ID")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Classroom not found")))?;

        Ok(classroom)
    }

    #[instrument(skip(db, dto))]
    pub async fn create_classroom(
        db: &PgPool,
        dto: CreateClassroomDto,
    ) -> Result<Classroom, AppError> {
        let classroom = sqlx::query_as::<_, Classroom>(&format!(
            "INSERT INTO classrooms (name, description, capacity, age_group)
             VALUES ($1, $2, COALESCE($3, 20), $4)
             RETURNING {CLASSROOM_COLUMNS}"
        ))
        .bind(&dto.name)
        .bind(&dto.description)
        .bind(dto.capacity)
        .bind(&dto.age_group)
        .fetch_one(db)
        .await
        .context("Failed to create classroom")
        .map_err(AppError::database)?;

        Ok(classroom)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_classroom(
        db: &PgPool,
        id: i32,
        dto: UpdateClassroomDto,
    ) -> Result<Classroom, AppError> {
        let existing = Self::get_classroom_by_id(db, id).await?;

        let name = dto.name.unwrap_or(existing.name);
        let description = dto.description.or(existing.description);
        let capacity = dto.capacity.unwrap_or(existing.capacity);
        let age_group = dto.age_group.or(existing.age_group);

        let classroom = sqlx::query_as::<_, Classroom>(&format!(
            "UPDATE classrooms
             SET name = $1, description = $2, capacity = $3, age_group = $4, updated_at = NOW()
             WHERE id = $5
             RETURNING {CLASSROOM_COLUMNS}"
        ))
        .bind(&name)
        .bind(&description)
        .bind(capacity)
        .bind(&age_group)
        .bind(id)
        .fetch_one(db)
        .await
        .context("Failed to update classroom")
        .map_err(AppError::database)?;

        Ok(classroom)
    }

    #[instrument(skip(db))]
    pub async fn delete_classroom(db: &PgPool, id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM classrooms WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_foreign_key_violation() {
                        return AppError::bad_request(anyhow::anyhow!(
                            "Classroom still has students or teachers assigned"
                        ));
                    }
                }
                AppError::database(anyhow::Error::from(e))
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Classroom not found")));
        }

        Ok(())
    }
}
