use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Teacher profile attached to a user account. Deleting the user cascades
/// to this row.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Teacher {
    pub id: i32,
    pub user_id: i32,
    pub specialization: Option<String>,
    pub bio: Option<String>,
    pub phone: Option<String>,
    pub classroom_id: Option<i32>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateTeacherDto {
    pub user_id: i32,
    pub specialization: Option<String>,
    pub bio: Option<String>,
    pub phone: Option<String>,
    pub classroom_id: Option<i32>,
}

/// Omitted fields keep their stored values. The linked user account
/// cannot be changed after creation.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateTeacherDto {
    pub specialization: Option<String>,
    pub bio: Option<String>,
    pub phone: Option<String>,
    pub classroom_id: Option<i32>,
}
