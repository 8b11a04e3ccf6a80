use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;

use crate::modules::menus::model::{CreateMonthlyMenuDto, MonthlyMenu, UpdateMonthlyMenuDto};
use crate::utils::errors::AppError;

const MENU_COLUMNS: &str =
    "id, month, year, file_url, description, uploaded_by_id, created_at, updated_at";

pub struct MenuService;

impl MenuService {
    #[instrument(skip(db))]
    pub async fn get_menus(db: &PgPool) -> Result<Vec<MonthlyMenu>, AppError> {
        let menus = sqlx::query_as::<_, MonthlyMenu>(&format!(
            "SELECT {MENU_COLUMNS} FROM monthly_menus ORDER BY year DESC, month DESC"
        ))
        .fetch_all(db)
        .await
        .context("Failed to fetch menus")
        .map_err(AppError::database)?;

        Ok(menus)
    }

    #[instrument(skip(db))]
    pub async fn get_menu_by_id(db: &PgPool, id: i32) -> Result<MonthlyMenu, AppError> {
        let menu = sqlx::query_as::<_, MonthlyMenu>(&format!(
            "SELECT {MENU_COLUMNS} FROM monthly_menus WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch menu by ID")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Menu not found")))?;

        Ok(menu)
    }

    #[instrument(skip(db, dto))]
    pub async fn create_menu(
        db: &PgPool,
        uploaded_by_id: i32,
        dto: CreateMonthlyMenuDto,
    ) -> Result<MonthlyMenu, AppError> {
        let menu = sqlx::query_as::<_, MonthlyMenu>(&format!(
            "INSERT INTO monthly_menus (month, year, file_url, description, uploaded_by_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {MENU_COLUMNS}"
        ))
        .bind(dto.month)
        .bind(dto.year)
        .bind(&dto.file_url)
        .bind(&dto.description)
        .bind(uploaded_by_id)
        .fetch_one(db)
        .await
        .context("Failed to create menu")
        .map_err(AppError::database)?;

        Ok(menu)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_menu(
        db: &PgPool,
        id: i32,
        dto: UpdateMonthlyMenuDto,
    ) -> Result<MonthlyMenu, AppError> {
        let existing = Self::get_menu_by_id(db, id).await?;

        let month = dto.month.unwrap_or(existing.month);
        let year = dto.year.unwrap_or(existing.year);
        let file_url = dto.file_url.unwrap_or(existing.file_url);
        let description = dto.description.or(existing.description);

        let menu = sqlx::query_as::<_, MonthlyMenu>(&format!(
            "UPDATE monthly_menus
             SET month = $1, year = $2, file_url = $3, description = $4, updated_at = NOW()
             WHERE id = $5
             RETURNING {MENU_COLUMNS}"
        ))
        .bind(month)
        .bind(year)
        .bind(&file_url)
        .bind(&description)
        .bind(id)
        .fetch_one(db)
        .await
        .context("Failed to update menu")
        .map_err(AppError::database)?;

        Ok(menu)
    }

    #[instrument(skip(db))]
    pub async fn delete_menu(db: &PgPool, id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM monthly_menus WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .context("Failed to delete menu")
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Menu not found")));
        }

        Ok(())
    }
}
