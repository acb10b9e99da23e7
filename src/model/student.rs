use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": "3f2b8c1e-6d1a-4c55-9d1e-0f4a2b7c9e11",
        "name": "Alice",
        "roll_number": "R1",
        "class_name": "10A",
        "department": "Science",
        "email": "alice@school.edu",
        "phone": null,
        "created_at": "2024-01-01T08:00:00Z"
    })
)]
pub struct Student {
    #[schema(example = "3f2b8c1e-6d1a-4c55-9d1e-0f4a2b7c9e11")]
    pub id: String,

    #[schema(example = "Alice")]
    pub name: String,

    #[schema(example = "R1")]
    pub roll_number: String,

    #[schema(example = "10A")]
    pub class_name: String,

    #[schema(example = "Science", nullable = true)]
    pub department: Option<String>,

    #[schema(example = "alice@school.edu", nullable = true)]
    pub email: Option<String>,

    #[schema(example = "+15550100", nullable = true)]
    pub phone: Option<String>,

    #[schema(example = "2024-01-01T08:00:00Z", format = "date-time", value_type = String)]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct NewStudent {
    #[schema(example = "Alice")]
    #[serde(default)]
    pub name: String,
    #[schema(example = "R1")]
    #[serde(default)]
    pub roll_number: String,
    #[schema(example = "10A")]
    #[serde(default)]
    pub class_name: String,
    #[schema(example = "Science")]
    pub department: Option<String>,
    #[schema(example = "alice@school.edu", format = "email")]
    pub email: Option<String>,
    #[schema(example = "+15550100")]
    pub phone: Option<String>,
}

impl NewStudent {
    /// Trims every field, rejects blank required ones and drops blank optional ones.
    pub fn validate(self) -> AppResult<NewStudent> {
        let name = required("name", self.name)?;
        let roll_number = required("roll_number", self.roll_number)?;
        let class_name = required("class_name", self.class_name)?;

        Ok(NewStudent {
            name,
            roll_number,
            class_name,
            department: optional(self.department),
            email: optional(self.email),
            phone: optional(self.phone),
        })
    }
}

fn required(field: &str, value: String) -> AppResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> NewStudent {
        NewStudent {
            name: " Alice ".into(),
            roll_number: "R1".into(),
            class_name: "10A".into(),
            department: Some("  ".into()),
            email: Some("alice@school.edu".into()),
            phone: None,
        }
    }

    #[test]
    fn validate_trims_and_drops_blank_optionals() {
        let s = alice().validate().unwrap();
        assert_eq!(s.name, "Alice");
        assert_eq!(s.department, None);
        assert_eq!(s.email.as_deref(), Some("alice@school.edu"));
    }

    #[test]
    fn validate_rejects_blank_required_fields() {
        let mut s = alice();
        s.class_name = "   ".into();
        let err = s.validate().unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
        assert_eq!(err.to_string(), "class_name is required");
    }

    #[test]
    fn missing_fields_deserialize_as_blank() {
        let s: NewStudent = serde_json::from_str(r#"{"name":"Bob"}"#).unwrap();
        assert!(s.roll_number.is_empty());
        assert!(s.validate().is_err());
    }
}
