use actix_web::{HttpResponse, Responder, web};
use chrono::Local;
use serde::Deserialize;
use sqlx::SqlitePool;
use utoipa::IntoParams;

use crate::model::attendance::{
    AttendanceRecord, AttendanceStats, AttendanceStatus, MarkAllAttendance, MarkAttendance,
    parse_date,
};
use crate::error::AppError;
use crate::store::ledger;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LimitQuery {
    /// Max records to return (default 100, at most 1000)
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StatsQuery {
    /// Day to report on, `YYYY-MM-DD`; defaults to today
    pub date: Option<String>,
}

/// Mark attendance for one student on one day
#[utoipa::path(
    post,
    path = "/api/attendance/mark",
    request_body = MarkAttendance,
    responses(
        (status = 200, description = "Attendance recorded (overwrites an earlier mark)", body = AttendanceRecord),
        (status = 400, description = "Invalid status or date", body = Object, example = json!({
            "message": "Invalid status \"Late\". Allowed: Present, Absent"
        })),
        (status = 404, description = "Student not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn mark(
    pool: web::Data<SqlitePool>,
    payload: web::Json<MarkAttendance>,
) -> actix_web::Result<impl Responder> {
    let student_id = payload.student_id.trim();
    if student_id.is_empty() {
        return Err(AppError::validation("student_id is required").into());
    }
    let date = parse_date(&payload.date)?;
    let status = AttendanceStatus::parse(&payload.status)?;

    let record = ledger::mark(pool.get_ref(), student_id, date, status).await?;
    Ok(HttpResponse::Ok().json(record))
}

/// Mark every student for one day
#[utoipa::path(
    post,
    path = "/api/attendance/mark-all",
    request_body = MarkAllAttendance,
    responses(
        (status = 200, description = "One record per student", body = [AttendanceRecord]),
        (status = 400, description = "Invalid status or date"),
        (status = 404, description = "A student disappeared mid-batch; earlier marks are kept"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn mark_all(
    pool: web::Data<SqlitePool>,
    payload: web::Json<MarkAllAttendance>,
) -> actix_web::Result<impl Responder> {
    let date = parse_date(&payload.date)?;
    let status = AttendanceStatus::parse(&payload.status)?;

    let records = ledger::mark_all(pool.get_ref(), date, status).await?;
    tracing::info!(%date, %status, count = records.len(), "Marked all students");
    Ok(HttpResponse::Ok().json(records))
}

/// Attendance of every student for one day
#[utoipa::path(
    get,
    path = "/api/attendance/date/{date}",
    params(
        ("date" = String, Path, description = "Day, YYYY-MM-DD")
    ),
    responses(
        (status = 200, description = "Records for the day, empty if none", body = [AttendanceRecord]),
        (status = 400, description = "Invalid date")
    ),
    tag = "Attendance"
)]
pub async fn by_date(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let date = parse_date(&path.into_inner())?;
    let records = ledger::get_by_date(pool.get_ref(), date).await?;
    Ok(HttpResponse::Ok().json(records))
}

/// Attendance history of one student
#[utoipa::path(
    get,
    path = "/api/attendance/student/{id}",
    params(
        ("id" = String, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "History ordered by date", body = [AttendanceRecord])
    ),
    tag = "Attendance"
)]
pub async fn by_student(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let records = ledger::get_by_student(pool.get_ref(), &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(records))
}

/// Latest attendance records across all students
#[utoipa::path(
    get,
    path = "/api/attendance/all",
    params(LimitQuery),
    responses(
        (status = 200, description = "Latest records, newest first", body = [AttendanceRecord])
    ),
    tag = "Attendance"
)]
pub async fn all(
    pool: web::Data<SqlitePool>,
    query: web::Query<LimitQuery>,
) -> actix_web::Result<impl Responder> {
    let records = ledger::get_all(pool.get_ref(), query.limit).await?;
    Ok(HttpResponse::Ok().json(records))
}

/// Present, absent and unmarked counts for one day
#[utoipa::path(
    get,
    path = "/api/attendance/stats",
    params(StatsQuery),
    responses(
        (status = 200, description = "Counts for the day", body = AttendanceStats),
        (status = 400, description = "Invalid date")
    ),
    tag = "Attendance"
)]
pub async fn stats(
    pool: web::Data<SqlitePool>,
    query: web::Query<StatsQuery>,
) -> actix_web::Result<impl Responder> {
    let for_date = match query.date.as_deref() {
        Some(raw) => parse_date(raw)?,
        None => Local::now().date_naive(),
    };

    let stats = ledger::get_stats(pool.get_ref(), for_date).await?;
    Ok(HttpResponse::Ok().json(stats))
}
