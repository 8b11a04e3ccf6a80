use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// A file-reference record; the bytes themselves live wherever
/// `file_url` points.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Document {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub file_url: String,
    pub file_type: String,
    pub file_size: Option<i32>,
    pub is_public: bool,
    pub category: Option<String>,
    pub uploaded_by_id: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// `uploaded_by_id` is stamped from the authenticated caller.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateDocumentDto {
    #[validate(length(min = 1))]
    pub title: String,
    pub description: Option<String>,
    #[validate(length(min = 1))]
    pub file_url: String,
    #[validate(length(min = 1))]
    pub file_type: String,
    pub file_size: Option<i32>,
    /// Defaults to true when omitted.
    pub is_public: Option<bool>,
    pub category: Option<String>,
}

/// Only the uploader may update; a foreign row answers 404.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateDocumentDto {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(length(min = 1))]
    pub file_url: Option<String>,
    #[validate(length(min = 1))]
    pub file_type: Option<String>,
    pub file_size: Option<i32>,
    pub is_public: Option<bool>,
    pub category: Option<String>,
}
