use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;

use crate::modules::students::model::{CreateStudentDto, Student, UpdateStudentDto};
use crate::utils::errors::AppError;

const STUDENT_COLUMNS: &str = "id, first_name, last_name, date_of_birth, gender, allergies, \
                               medical_notes, enrollment_date, classroom_id, created_at, updated_at";

pub struct StudentService;

impl StudentService {
    #[instrument(skip(db))]
    pub async fn get_students(db: &PgPool) -> Result<Vec<Student>, AppError> {
        let students = sqlx::query_as::<_, Student>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students ORDER BY last_name, first_name"
        ))
        .fetch_all(db)
        .await
        .context("Failed to fetch students")
        .map_err(AppError::database)?;

        Ok(students)
    }

    #[instrument(skip(db))]
    pub async fn get_student_by_id(db: &PgPool, id: i32) -> Result<Student, AppError> {
        let student = sqlx::query_as::<_, Student>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch student by ID")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Student not found")))?;

        Ok(student)
    }

    #[instrument(skip(db, dto))]
    pub async fn create_student(db: &PgPool, dto: CreateStudentDto) -> Result<Student, AppError> {
        let student = sqlx::query_as::<_, Student>(&format!(
            "INSERT INTO students (first_name, last_name, date_of_birth, gender, allergies,
                                   medical_notes, enrollment_date, classroom_id)
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, CURRENT_DATE), $8)
             RETURNING {STUDENT_COLUMNS}"
        ))
        .bind(&dto.first_name)
        .bind(&dto.last_name)
        .bind(dto.date_of_birth)
        .bind(dto.gender)
        .bind(&dto.allergies)
        .bind(&dto.medical_notes)
        .bind(dto.enrollment_date)
        .bind(dto.classroom_id)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_foreign_key_violation() {
                    return AppError::bad_request(anyhow::anyhow!(
                        "Classroom {} does not exist",
                        dto.classroom_id
                    ));
                }
            }
            AppError::database(anyhow::Error::from(e))
        })?;

        Ok(student)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_student(
        db: &PgPool,
        id: i32,
        dto: UpdateStudentDto,
    ) -> Result<Student, AppError> {
        let existing = Self::get_student_by_id(db, id).await?;

        let first_name = dto.first_name.unwrap_or(existing.first_name);
        let last_name = dto.last_name.unwrap_or(existing.last_name);
        let date_of_birth = dto.date_of_birth.unwrap_or(existing.date_of_birth);
        let gender = dto.gender.unwrap_or(existing.gender);
        let allergies = dto.allergies.or(existing.allergies);
        let medical_notes = dto.medical_notes.or(existing.medical_notes);
        let enrollment_date = dto.enrollment_date.unwrap_or(existing.enrollment_date);
        let classroom_id = dto.classroom_id.unwrap_or(existing.classroom_id);

        let student = sqlx::query_as::<_, Student>(&format!(
            "UPDATE students
             SET first_name = $1, last_name = $2, date_of_birth = $3, gender = $4,
                 allergies = $5, medical_notes = $6, enrollment_date = $7, classroom_id = $8,
                 updated_at = NOW()
             WHERE id = $9
             RETURNING {STUDENT_COLUMNS}"
        ))
        .bind(&first_name)
        .bind(&last_name)
        .bind(date_of_birth)
        .bind(gender)
        .bind(&allergies)
        .bind(&medical_notes)
        .bind(enrollment_date)
        .bind(classroom_id)
        .bind(id)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_foreign_key_violation() {
                    return AppError::bad_request(anyhow::anyhow!(
                        "Classroom {} does not exist",
                        classroom_id
                    ));
                }
            }
            AppError::database(anyhow::Error::from(e))
        })?;

        Ok(student)
    }

    #[instrument(skip(db))]
    pub async fn delete_student(db: &PgPool, id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .context("Failed to delete student")
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Student not found")));
        }

        Ok(())
    }
}
