use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Classroom {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub capacity: i32,
    pub age_group: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateClassroomDto {
    #[validate(length(min = 1))]
    pub name: String,
    pub description: Option<String>,
    /// Defaults to 20 when omitted.
    #[validate(range(min = 1))]
    pub capacity: Option<i32>,
    pub age_group: Option<String>,
}

/// Omitted fields keep their stored values.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateClassroomDto {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 1))]
    pub capacity: Option<i32>,
    pub age_group: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_create_classroom_dto_defaults() {
        let dto: CreateClassroomDto = serde_json::from_str(r#"{"name": "Caterpillars"}"#).unwrap();
        assert!(dto.capacity.is_none());
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_create_classroom_rejects_zero_capacity() {
        let dto: CreateClassroomDto =
            serde_json::from_str(r#"{"name": "Caterpillars", "capacity": 0}"#).unwrap();
        assert!(dto.validate().is_err());
    }
}
