use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::model::attendance::AttendanceRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, ToSchema)]
#[schema(example = json!({ "present": 3, "absent": 1, "total": 4, "rate": 75 }))]
pub struct ReportSummary {
    pub present: usize,
    pub absent: usize,
    pub total: usize,
    /// Whole-number percentage of present records.
    pub rate: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReportView {
    Date,
    Student,
    All,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct ReportQuery {
    /// Which record set to report on
    pub view: ReportView,
    /// Required when view = date
    #[schema(example = "2024-01-01")]
    pub date: Option<String>,
    /// Required when view = student
    pub student_id: Option<String>,
    /// Only used when view = all
    #[schema(example = 100)]
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReportResponse {
    pub view: ReportView,
    pub records: Vec<AttendanceRecord>,
    pub summary: ReportSummary,
}
