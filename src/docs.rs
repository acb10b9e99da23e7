use crate::model::attendance::{
    AttendanceRecord, AttendanceStats, AttendanceStatus, MarkAllAttendance, MarkAttendance,
    StudentRef,
};
use crate::model::report::{ReportQuery, ReportResponse, ReportSummary, ReportView};
use crate::model::student::{NewStudent, Student};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Attendance API",
        version = "0.1.0",
        description = r#"
## Student Attendance Tracking

Backend for a class attendance register.

### 🔹 Key Features
- **Students**
  - Add, list, view and delete students
- **Attendance**
  - Mark a student Present or Absent for a day (marking again overwrites)
  - Mark the whole roster at once
  - Daily statistics: present, absent and not yet marked
- **Reports**
  - Records by day, by student or latest overall, with a present rate
  - CSV export

### 📦 Response Format
- JSON bodies, snake_case fields
- Errors are `{"message": "..."}` with 400, 404 or 500

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::student::list_students,
        crate::api::student::add_student,
        crate::api::student::get_student,
        crate::api::student::delete_student,

        crate::api::attendance::mark,
        crate::api::attendance::mark_all,
        crate::api::attendance::by_date,
        crate::api::attendance::by_student,
        crate::api::attendance::all,
        crate::api::attendance::stats,

        crate::api::report::get_report,
        crate::api::report::export
    ),
    components(
        schemas(
            Student,
            NewStudent,
            AttendanceStatus,
            StudentRef,
            AttendanceRecord,
            AttendanceStats,
            MarkAttendance,
            MarkAllAttendance,
            ReportSummary,
            ReportView,
            ReportQuery,
            ReportResponse
        )
    ),
    tags(
        (name = "Student", description = "Student directory APIs"),
        (name = "Attendance", description = "Attendance marking and queries"),
        (name = "Report", description = "Summaries and CSV export"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_route_is_documented() {
        let doc = ApiDoc::openapi();
        let paths: Vec<_> = doc.paths.paths.keys().cloned().collect();
        for expected in [
            "/api/students",
            "/api/students/{id}",
            "/api/attendance/mark",
            "/api/attendance/mark-all",
            "/api/attendance/date/{date}",
            "/api/attendance/student/{id}",
            "/api/attendance/all",
            "/api/attendance/stats",
            "/api/reports",
            "/api/reports/export",
        ] {
            assert!(paths.iter().any(|p| p == expected), "missing {expected}");
        }
    }
}
