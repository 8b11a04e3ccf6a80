use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Serialize, Deserialize, sqlx::Type, Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "gender", rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// An enrolled child. Every student belongs to exactly one classroom.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Student {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: chrono::NaiveDate,
    pub gender: Gender,
    pub allergies: Option<String>,
    pub medical_notes: Option<String>,
    pub enrollment_date: chrono::NaiveDate,
    pub classroom_id: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateStudentDto {
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
    pub date_of_birth: chrono::NaiveDate,
    pub gender: Gender,
    pub allergies: Option<String>,
    pub medical_notes: Option<String>,
    /// Defaults to today when omitted.
    pub enrollment_date: Option<chrono::NaiveDate>,
    pub classroom_id: i32,
}

/// Omitted fields keep their stored values.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateStudentDto {
    #[validate(length(min = 1))]
    pub first_name: Option<String>,
    #[validate(length(min = 1))]
    pub last_name: Option<String>,
    pub date_of_birth: Option<chrono::NaiveDate>,
    pub gender: Option<Gender>,
    pub allergies: Option<String>,
    pub medical_notes: Option<String>,
    pub enrollment_date: Option<chrono::NaiveDate>,
    pub classroom_id: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_serde() {
        assert_eq!(serde_json::to_string(&Gender::Male).unwrap(), "\"male\"");
        let g: Gender = serde_json::from_str("\"other\"").unwrap();
        assert_eq!(g, Gender::Other);
    }

    #[test]
    fn test_create_student_dto_deserialize() {
        let json = r#"{
            "first_name": "Lucia",
            "last_name": "Perez",
            "date_of_birth": "2022-03-14",
            "gender": "female",
            "classroom_id": 3
        }"#;
        let dto: CreateStudentDto = serde_json::from_str(json).unwrap();
        assert_eq!(dto.first_name, "Lucia");
        assert_eq!(dto.gender, Gender::Female);
        assert!(dto.enrollment_date.is_none());
        assert!(dto.allergies.is_none());
    }

    #[test]
    fn test_create_student_dto_rejects_unknown_gender() {
        let json = r#"{
            "first_name": "A",
            "last_name": "B",
            "date_of_birth": "2022-03-14",
            "gender": "unknown",
            "classroom_id": 1
        }"#;
        assert!(serde_json::from_str::<CreateStudentDto>(json).is_err());
    }
}
