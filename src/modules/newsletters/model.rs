use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Serialize, Deserialize, sqlx::Type, Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "newsletter_status", rename_all = "lowercase")]
pub enum NewsletterStatus {
    Draft,
    Published,
}

/// Attachments are stored as a JSON array serialized to TEXT and exposed
/// as a plain list; a NULL column reads back as an empty list.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Newsletter {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub attachments: Vec<String>,
    pub published_at: Option<chrono::DateTime<chrono::Utc>>,
    pub status: NewsletterStatus,
    pub author_id: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Database projection before the attachments column is decoded.
#[derive(FromRow, Debug)]
pub struct NewsletterRow {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub attachments: Option<String>,
    pub published_at: Option<chrono::DateTime<chrono::Utc>>,
    pub status: NewsletterStatus,
    pub author_id: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<NewsletterRow> for Newsletter {
    fn from(row: NewsletterRow) -> Self {
        let attachments = row
            .attachments
            .as_deref()
            .map(|raw| serde_json::from_str(raw).unwrap_or_default())
            .unwrap_or_default();
        Newsletter {
            id: row.id,
            title: row.title,
            content: row.content,
            attachments,
            published_at: row.published_at,
            status: row.status,
            author_id: row.author_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// `author_id` is stamped from the authenticated caller.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateNewsletterDto {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub content: String,
    pub attachments: Option<Vec<String>>,
    pub published_at: Option<chrono::DateTime<chrono::Utc>>,
    pub status: Option<NewsletterStatus>,
}

/// Only the author may update; a foreign row answers 404.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateNewsletterDto {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub content: Option<String>,
    pub attachments: Option<Vec<String>>,
    pub published_at: Option<chrono::DateTime<chrono::Utc>>,
    pub status: Option<NewsletterStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn row(attachments: Option<&str>) -> NewsletterRow {
        NewsletterRow {
            id: 1,
            title: "March news".to_string(),
            content: "Hello".to_string(),
            attachments: attachments.map(str::to_string),
            published_at: None,
            status: NewsletterStatus::Draft,
            author_id: 7,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_null_attachments_read_as_empty_list() {
        let newsletter = Newsletter::from(row(None));
        assert!(newsletter.attachments.is_empty());
    }

    #[test]
    fn test_attachments_decode_from_json_text() {
        let newsletter = Newsletter::from(row(Some(r#"["a.pdf","b.png"]"#)));
        assert_eq!(newsletter.attachments, vec!["a.pdf", "b.png"]);
    }

    #[test]
    fn test_malformed_attachments_read_as_empty_list() {
        let newsletter = Newsletter::from(row(Some("not json")));
        assert!(newsletter.attachments.is_empty());
    }
}
