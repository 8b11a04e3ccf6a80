use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Serialize, Deserialize, sqlx::Type, Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "mood_level", rename_all = "lowercase")]
pub enum MoodLevel {
    Happy,
    Neutral,
    Sad,
}

#[derive(Serialize, Deserialize, sqlx::Type, Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "quality_level", rename_all = "lowercase")]
pub enum QualityLevel {
    Good,
    Fair,
    Poor,
}

/// A dated observation of a student. `teacher_id` records the user who
/// wrote it.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct FollowUp {
    pub id: i32,
    pub date: chrono::NaiveDate,
    pub notes: String,
    pub activities: Option<String>,
    pub mood: Option<MoodLevel>,
    pub sleep_quality: Option<QualityLevel>,
    pub appetite: Option<QualityLevel>,
    pub behavior: Option<String>,
    pub learning_progress: Option<String>,
    pub student_id: i32,
    pub teacher_id: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// `teacher_id` is stamped from the authenticated caller.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateFollowUpDto {
    /// Defaults to today when omitted.
    pub date: Option<chrono::NaiveDate>,
    #[validate(length(min = 1))]
    pub notes: String,
    pub activities: Option<String>,
    pub mood: Option<MoodLevel>,
    pub sleep_quality: Option<QualityLevel>,
    pub appetite: Option<QualityLevel>,
    pub behavior: Option<String>,
    pub learning_progress: Option<String>,
    pub student_id: i32,
}

/// Only the recording user may update; a foreign row answers 404.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateFollowUpDto {
    pub date: Option<chrono::NaiveDate>,
    #[validate(length(min = 1))]
    pub notes: Option<String>,
    pub activities: Option<String>,
    pub mood: Option<MoodLevel>,
    pub sleep_quality: Option<QualityLevel>,
    pub appetite: Option<QualityLevel>,
    pub behavior: Option<String>,
    pub learning_progress: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mood_serde() {
        assert_eq!(serde_json::to_string(&MoodLevel::Happy).unwrap(), "\"happy\"");
        let q: QualityLevel = serde_json::from_str("\"fair\"").unwrap();
        assert_eq!(q, QualityLevel::Fair);
    }

    #[test]
    fn test_create_dto_minimal() {
        let dto: CreateFollowUpDto =
            serde_json::from_str(r#"{"notes": "Slept well", "student_id": 4}"#).unwrap();
        assert!(dto.date.is_none());
        assert!(dto.mood.is_none());
        assert_eq!(dto.student_id, 4);
    }
}
