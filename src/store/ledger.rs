use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::model::attendance::{AttendanceRecord, AttendanceRow, AttendanceStats, AttendanceStatus};
use crate::store::directory;

pub const DEFAULT_ALL_LIMIT: i64 = 100;
pub const MAX_ALL_LIMIT: i64 = 1000;

const RECORD_SELECT: &str = r#"
    SELECT
        a.id,
        a.student_id,
        a.date,
        a.status,
        a.created_at,
        a.updated_at,
        s.name        AS student_name,
        s.roll_number AS student_roll_number,
        s.class_name  AS student_class_name
    FROM attendance a
    LEFT JOIN students s ON s.id = a.student_id
"#;

fn into_records(rows: Vec<AttendanceRow>) -> AppResult<Vec<AttendanceRecord>> {
    rows.into_iter().map(AttendanceRecord::try_from).collect()
}

/// Upserts the status for one (student, date) pair.
pub async fn mark(
    pool: &SqlitePool,
    student_id: &str,
    date: NaiveDate,
    status: AttendanceStatus,
) -> AppResult<AttendanceRecord> {
    if !directory::student_exists(pool, student_id).await? {
        return Err(AppError::not_found(format!("Student {student_id} not found")));
    }

    let now = Utc::now();
    let id = sqlx::query_scalar::<_, String>(
        r#"
        INSERT INTO attendance (id, student_id, date, status, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?)
        ON CONFLICT (student_id, date) DO UPDATE
            SET status = excluded.status,
                updated_at = excluded.updated_at
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4().to_string())
    .bind(student_id)
    .bind(date)
    .bind(status.as_ref())
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    debug!(student_id, %date, %status, "Attendance marked");

    let sql = format!("{RECORD_SELECT} WHERE a.id = ?");
    let row = sqlx::query_as::<_, AttendanceRow>(&sql)
        .bind(&id)
        .fetch_one(pool)
        .await?;
    AttendanceRecord::try_from(row)
}

/// Marks each id in order. Stops at the first failure; earlier writes stay.
pub async fn mark_batch(
    pool: &SqlitePool,
    student_ids: &[String],
    date: NaiveDate,
    status: AttendanceStatus,
) -> AppResult<Vec<AttendanceRecord>> {
    let mut marked = Vec::with_capacity(student_ids.len());
    for student_id in student_ids {
        match mark(pool, student_id, date, status).await {
            Ok(record) => marked.push(record),
            Err(e) => {
                warn!(
                    error = %e,
                    student_id = %student_id,
                    committed = marked.len(),
                    remaining = student_ids.len() - marked.len() - 1,
                    "Batch marking aborted"
                );
                return Err(e);
            }
        }
    }
    Ok(marked)
}

/// Marks every student currently in the directory.
pub async fn mark_all(
    pool: &SqlitePool,
    date: NaiveDate,
    status: AttendanceStatus,
) -> AppResult<Vec<AttendanceRecord>> {
    let ids: Vec<String> = directory::list_students(pool)
        .await?
        .into_iter()
        .map(|s| s.id)
        .collect();
    mark_batch(pool, &ids, date, status).await
}

pub async fn get_by_date(pool: &SqlitePool, date: NaiveDate) -> AppResult<Vec<AttendanceRecord>> {
    let sql = format!("{RECORD_SELECT} WHERE a.date = ? ORDER BY a.created_at, a.rowid");
    debug!(sql = %sql, %date, "Fetching attendance by date");
    let rows = sqlx::query_as::<_, AttendanceRow>(&sql)
        .bind(date)
        .fetch_all(pool)
        .await?;
    into_records(rows)
}

pub async fn get_by_student(
    pool: &SqlitePool,
    student_id: &str,
) -> AppResult<Vec<AttendanceRecord>> {
    let sql = format!("{RECORD_SELECT} WHERE a.student_id = ? ORDER BY a.date");
    debug!(sql = %sql, student_id, "Fetching attendance by student");
    let rows = sqlx::query_as::<_, AttendanceRow>(&sql)
        .bind(student_id)
        .fetch_all(pool)
        .await?;
    into_records(rows)
}

/// Newest first.
pub async fn get_all(pool: &SqlitePool, limit: Option<i64>) -> AppResult<Vec<AttendanceRecord>> {
    let limit = limit.unwrap_or(DEFAULT_ALL_LIMIT).clamp(1, MAX_ALL_LIMIT);
    let sql = format!("{RECORD_SELECT} ORDER BY a.date DESC, a.updated_at DESC LIMIT ?");
    debug!(sql = %sql, limit, "Fetching latest attendance");
    let rows = sqlx::query_as::<_, AttendanceRow>(&sql)
        .bind(limit)
        .fetch_all(pool)
        .await?;
    into_records(rows)
}

pub async fn get_stats(pool: &SqlitePool, for_date: NaiveDate) -> AppResult<AttendanceStats> {
    let total_students = directory::count_students(pool).await?;

    let counts = sqlx::query_as::<_, (String, i64)>(
        "SELECT status, COUNT(*) FROM attendance WHERE date = ? GROUP BY status",
    )
    .bind(for_date)
    .fetch_all(pool)
    .await?;

    let mut present_today = 0;
    let mut absent_today = 0;
    for (status, count) in counts {
        match AttendanceStatus::parse(&status) {
            Ok(AttendanceStatus::Present) => present_today = count,
            Ok(AttendanceStatus::Absent) => absent_today = count,
            Err(_) => warn!(status = %status, count, "Ignoring unknown attendance status"),
        }
    }

    // orphaned records can push the marked count past the roster
    let not_marked_today = (total_students - present_today - absent_today).max(0);

    Ok(AttendanceStats {
        date: for_date,
        total_students,
        present_today,
        absent_today,
        not_marked_today,
    })
}
