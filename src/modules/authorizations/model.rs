use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Serialize, Deserialize, sqlx::Type, Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "authorization_status", rename_all = "lowercase")]
pub enum AuthorizationStatus {
    Pending,
    Approved,
    Rejected,
}

/// A consent request raised by staff for a parent to approve or reject.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Authorization {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub status: AuthorizationStatus,
    pub response_date: Option<chrono::DateTime<chrono::Utc>>,
    pub response_notes: Option<String>,
    pub expiry_date: Option<chrono::DateTime<chrono::Utc>>,
    pub student_id: i32,
    pub parent_id: i32,
    pub requested_by_id: i32,
    pub responded_by_id: Option<i32>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// `requested_by_id` is stamped from the authenticated caller, never
/// taken from the body.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateAuthorizationDto {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    pub expiry_date: Option<chrono::DateTime<chrono::Utc>>,
    pub student_id: i32,
    pub parent_id: i32,
}

/// Supplying a status records the caller as the responder and stamps the
/// response date.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateAuthorizationDto {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
    pub status: Option<AuthorizationStatus>,
    pub response_notes: Option<String>,
    pub expiry_date: Option<chrono::DateTime<chrono::Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serde() {
        assert_eq!(
            serde_json::to_string(&AuthorizationStatus::Pending).unwrap(),
            "\"pending\""
        );
        let s: AuthorizationStatus = serde_json::from_str("\"rejected\"").unwrap();
        assert_eq!(s, AuthorizationStatus::Rejected);
    }

    #[test]
    fn test_create_dto_ignores_requested_by_in_body() {
        let json = r#"{
            "title": "Field trip",
            "description": "Visit to the park",
            "student_id": 1,
            "parent_id": 2,
            "requested_by_id": 99
        }"#;
        // Unknown keys are ignored by serde; the stamp comes from the caller.
        let dto: CreateAuthorizationDto = serde_json::from_str(json).unwrap();
        assert_eq!(dto.student_id, 1);
    }
}
