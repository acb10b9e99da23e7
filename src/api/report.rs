use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{HttpResponse, Responder, web};
use chrono::Local;
use sqlx::SqlitePool;

use crate::error::{AppError, AppResult};
use crate::model::attendance::{AttendanceRecord, parse_date};
use crate::model::report::{ReportQuery, ReportResponse, ReportView};
use crate::report;
use crate::store::ledger;

async fn load_records(pool: &SqlitePool, query: &ReportQuery) -> AppResult<Vec<AttendanceRecord>> {
    match query.view {
        ReportView::Date => {
            let raw = query
                .date
                .as_deref()
                .ok_or_else(|| AppError::validation("date is required for the date view"))?;
            ledger::get_by_date(pool, parse_date(raw)?).await
        }
        ReportView::Student => {
            let student_id = query
                .student_id
                .as_deref()
                .filter(|id| !id.trim().is_empty())
                .ok_or_else(|| AppError::validation("student_id is required for the student view"))?;
            ledger::get_by_student(pool, student_id).await
        }
        ReportView::All => ledger::get_all(pool, query.limit).await,
    }
}

/// Records of one view together with their summary
#[utoipa::path(
    get,
    path = "/api/reports",
    params(ReportQuery),
    responses(
        (status = 200, description = "Records and summary", body = ReportResponse),
        (status = 400, description = "Missing or invalid view parameters")
    ),
    tag = "Report"
)]
pub async fn get_report(
    pool: web::Data<SqlitePool>,
    query: web::Query<ReportQuery>,
) -> actix_web::Result<impl Responder> {
    let records = load_records(pool.get_ref(), &query).await?;
    let summary = report::summarize(&records);

    Ok(HttpResponse::Ok().json(ReportResponse {
        view: query.view,
        records,
        summary,
    }))
}

/// Same records as `/api/reports`, rendered as CSV
#[utoipa::path(
    get,
    path = "/api/reports/export",
    params(ReportQuery),
    responses(
        (status = 200, description = "CSV attachment", content_type = "text/csv", body = String),
        (status = 400, description = "Missing or invalid view parameters")
    ),
    tag = "Report"
)]
pub async fn export(
    pool: web::Data<SqlitePool>,
    query: web::Query<ReportQuery>,
) -> actix_web::Result<impl Responder> {
    let records = load_records(pool.get_ref(), &query).await?;
    let body = report::to_delimited_text(&records);
    let filename = report::export_filename(Local::now().date_naive());

    tracing::debug!(view = ?query.view, rows = records.len(), %filename, "Exporting report");

    Ok(HttpResponse::Ok()
        .content_type("text/csv")
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(filename)],
        })
        .body(body))
}

#[cfg(test)]
mod tests {
    use crate::api::test_app;
    use crate::db::test_pool;
    use crate::model::attendance::AttendanceStatus;
    use crate::store::directory::{add_student, new_student};
    use crate::store::ledger;
    use actix_web::{http::StatusCode, test};
    use chrono::NaiveDate;
    use serde_json::Value;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[actix_web::test]
    async fn report_by_date_includes_summary() {
        let pool = test_pool().await;
        let a = add_student(&pool, new_student("Alice", "R1", "10A")).await.unwrap();
        let b = add_student(&pool, new_student("Bob", "R2", "10A")).await.unwrap();
        ledger::mark(&pool, &a.id, day(1), AttendanceStatus::Present).await.unwrap();
        ledger::mark(&pool, &b.id, day(1), AttendanceStatus::Absent).await.unwrap();
        let app = test::init_service(test_app(pool)).await;

        let req = test::TestRequest::get()
            .uri("/api/reports?view=date&date=2024-01-01")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["view"], "date");
        assert_eq!(body["records"].as_array().unwrap().len(), 2);
        assert_eq!(body["summary"]["present"], 1);
        assert_eq!(body["summary"]["absent"], 1);
        assert_eq!(body["summary"]["total"], 2);
        assert_eq!(body["summary"]["rate"], 50);
    }

    #[actix_web::test]
    async fn report_by_student_and_all() {
        let pool = test_pool().await;
        let a = add_student(&pool, new_student("Alice", "R1", "10A")).await.unwrap();
        for d in 1..=3 {
            ledger::mark(&pool, &a.id, day(d), AttendanceStatus::Present).await.unwrap();
        }
        let app = test::init_service(test_app(pool)).await;

        let req = test::TestRequest::get()
            .uri(&format!("/api/reports?view=student&student_id={}", a.id))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["summary"]["total"], 3);
        assert_eq!(body["summary"]["rate"], 100);

        let req = test::TestRequest::get()
            .uri("/api/reports?view=all&limit=2")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["records"].as_array().unwrap().len(), 2);
    }

    #[actix_web::test]
    async fn missing_view_parameter_is_bad_request() {
        let app = test::init_service(test_app(test_pool().await)).await;

        for uri in ["/api/reports?view=date", "/api/reports?view=student"] {
            let req = test::TestRequest::get().uri(uri).to_request();
            assert_eq!(
                test::call_service(&app, req).await.status(),
                StatusCode::BAD_REQUEST
            );
        }
    }

    #[actix_web::test]
    async fn missing_view_gets_json_error() {
        let app = test::init_service(test_app(test_pool().await)).await;

        let req = test::TestRequest::get()
            .uri("/api/reports?date=2024-01-01")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["message"].as_str().unwrap().contains("view"));
    }

    #[actix_web::test]
    async fn export_is_a_csv_attachment() {
        let pool = test_pool().await;
        let a = add_student(&pool, new_student("Alice", "R1", "10A")).await.unwrap();
        ledger::mark(&pool, &a.id, day(1), AttendanceStatus::Present).await.unwrap();
        let app = test::init_service(test_app(pool)).await;

        let req = test::TestRequest::get()
            .uri("/api/reports/export?view=date&date=2024-01-01")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers().get("content-type").unwrap(), "text/csv");
        let disposition = resp
            .headers()
            .get("content-disposition")
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.starts_with("attachment"));
        assert!(disposition.contains("attendance-report-"));

        let body = test::read_body(resp).await;
        assert_eq!(
            std::str::from_utf8(&body).unwrap(),
            "Name,Roll Number,Class,Date,Status\nAlice,R1,10A,2024-01-01,Present\n"
        );
    }
}
