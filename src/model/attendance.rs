use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString, AsRefStr, ToSchema,
)]
pub enum AttendanceStatus {
    Present,
    Absent,
}

impl AttendanceStatus {
    pub fn parse(value: &str) -> AppResult<Self> {
        AttendanceStatus::from_str(value).map_err(|_| {
            AppError::validation(format!(
                "Invalid status {value:?}. Allowed: Present, Absent"
            ))
        })
    }
}

pub fn parse_date(value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        AppError::validation(format!("Invalid date {value:?}, expected YYYY-MM-DD"))
    })
}

/// Display fields of the student a record points at.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct StudentRef {
    #[schema(example = "Alice")]
    pub name: String,
    #[schema(example = "R1")]
    pub roll_number: String,
    #[schema(example = "10A")]
    pub class_name: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[schema(example = json!({
    "id": "9b0c5a8e-1f4d-4c0b-8f0e-5d6a7b8c9d01",
    "student_id": "3f2b8c1e-6d1a-4c55-9d1e-0f4a2b7c9e11",
    "date": "2024-01-01",
    "status": "Present",
    "created_at": "2024-01-01T08:00:00Z",
    "updated_at": "2024-01-01T08:00:00Z",
    "student": { "name": "Alice", "roll_number": "R1", "class_name": "10A" }
}))]
pub struct AttendanceRecord {
    pub id: String,
    pub student_id: String,
    #[schema(example = "2024-01-01", format = "date", value_type = String)]
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    #[schema(format = "date-time", value_type = String)]
    pub created_at: DateTime<Utc>,
    #[schema(format = "date-time", value_type = String)]
    pub updated_at: DateTime<Utc>,
    /// `null` once the student has been deleted.
    pub student: Option<StudentRef>,
}

/// Flat row of `attendance LEFT JOIN students`.
#[derive(Debug, sqlx::FromRow)]
pub struct AttendanceRow {
    pub id: String,
    pub student_id: String,
    pub date: NaiveDate,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub student_name: Option<String>,
    pub student_roll_number: Option<String>,
    pub student_class_name: Option<String>,
}

impl TryFrom<AttendanceRow> for AttendanceRecord {
    type Error = AppError;

    fn try_from(row: AttendanceRow) -> Result<Self, Self::Error> {
        let status = AttendanceStatus::from_str(&row.status).map_err(|e| AppError::Storage {
            source: sqlx::Error::Decode(Box::new(e)),
        })?;

        let student = match (row.student_name, row.student_roll_number, row.student_class_name) {
            (Some(name), Some(roll_number), Some(class_name)) => Some(StudentRef {
                name,
                roll_number,
                class_name,
            }),
            _ => None,
        };

        Ok(AttendanceRecord {
            id: row.id,
            student_id: row.student_id,
            date: row.date,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
            student,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[schema(example = json!({
    "date": "2024-01-02",
    "total_students": 2,
    "present_today": 2,
    "absent_today": 0,
    "not_marked_today": 0
}))]
pub struct AttendanceStats {
    #[schema(example = "2024-01-02", format = "date", value_type = String)]
    pub date: NaiveDate,
    pub total_students: i64,
    pub present_today: i64,
    pub absent_today: i64,
    pub not_marked_today: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct MarkAttendance {
    #[schema(example = "3f2b8c1e-6d1a-4c55-9d1e-0f4a2b7c9e11")]
    pub student_id: String,
    #[schema(example = "2024-01-01", format = "date")]
    pub date: String,
    #[schema(example = "Present")]
    pub status: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct MarkAllAttendance {
    #[schema(example = "2024-01-01", format = "date")]
    pub date: String,
    #[schema(example = "Present")]
    pub status: String,
}
