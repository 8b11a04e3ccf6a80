use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// One lunch menu file per month, referenced by URL.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct MonthlyMenu {
    pub id: i32,
    pub month: i32,
    pub year: i32,
    pub file_url: String,
    pub description: Option<String>,
    pub uploaded_by_id: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// `uploaded_by_id` is stamped from the authenticated caller.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateMonthlyMenuDto {
    #[validate(range(min = 1, max = 12))]
    pub month: i32,
    pub year: i32,
    #[validate(length(min = 1))]
    pub file_url: String,
    pub description: Option<String>,
}

/// Omitted fields keep their stored values.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateMonthlyMenuDto {
    #[validate(range(min = 1, max = 12))]
    pub month: Option<i32>,
    pub year: Option<i32>,
    #[validate(length(min = 1))]
    pub file_url: Option<String>,
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_month_out_of_range_rejected() {
        let dto = CreateMonthlyMenuDto {
            month: 13,
            year: 2025,
            file_url: "/uploads/menus/march.pdf".to_string(),
            description: None,
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_month_in_range_accepted() {
        let dto = CreateMonthlyMenuDto {
            month: 12,
            year: 2025,
            file_url: "/uploads/menus/december.pdf".to_string(),
            description: None,
        };
        assert!(dto.validate().is_ok());
    }
}
