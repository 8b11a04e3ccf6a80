//! User data models and DTOs.
//!
//! The [`User`] struct is the sanitized representation: the password hash
//! lives only in the database and in short-lived query-local structs, so
//! it can never leak through a response body.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// System roles. Every user carries exactly one.
#[derive(Serialize, Deserialize, sqlx::Type, Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Teacher,
    Parent,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Teacher => "teacher",
            UserRole::Parent => "parent",
        }
    }
}

/// A user in the system, without the password hash.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    pub photo_url: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Partial profile update. Omitted fields keep their stored values.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateUserDto {
    #[validate(length(min = 1))]
    pub username: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 1))]
    pub first_name: Option<String>,
    #[validate(length(min = 1))]
    pub last_name: Option<String>,
}

/// Password change. `current_password` is required when the caller is the
/// target user; admins changing someone else's password omit it.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ChangePasswordDto {
    pub current_password: Option<String>,
    #[validate(length(min = 6))]
    pub new_password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PhotoResponse {
    pub photo_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_user_role_as_str() {
        assert_eq!(UserRole::Admin.as_str(), "admin");
        assert_eq!(UserRole::Teacher.as_str(), "teacher");
        assert_eq!(UserRole::Parent.as_str(), "parent");
    }

    #[test]
    fn test_user_role_serde_roundtrip() {
        let json = serde_json::to_string(&UserRole::Parent).unwrap();
        assert_eq!(json, "\"parent\"");
        let role: UserRole = serde_json::from_str("\"teacher\"").unwrap();
        assert_eq!(role, UserRole::Teacher);
    }

    #[test]
    fn test_user_serialization_has_no_password_field() {
        let user = User {
            id: 1,
            username: "jdoe".to_string(),
            email: "jdoe@example.com".to_string(),
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            role: UserRole::Teacher,
            photo_url: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };

        let serialized = serde_json::to_string(&user).unwrap();
        assert!(serialized.contains("jdoe@example.com"));
        assert!(!serialized.contains("password"));
    }

    #[test]
    fn test_update_user_dto_validation() {
        let dto = UpdateUserDto {
            email: Some("not-an-email".to_string()),
            ..Default::default()
        };
        assert!(dto.validate().is_err());

        let dto = UpdateUserDto {
            email: Some("ok@example.com".to_string()),
            first_name: Some("Jane".to_string()),
            ..Default::default()
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_change_password_dto_validation() {
        let dto = ChangePasswordDto {
            current_password: Some("oldpass".to_string()),
            new_password: "short".to_string(),
        };
        assert!(dto.validate().is_err());

        let dto = ChangePasswordDto {
            current_password: None,
            new_password: "abcdef".to_string(),
        };
        assert!(dto.validate().is_ok());
    }
}
