use actix_web::{HttpResponse, Responder, web};
use serde_json::json;
use sqlx::SqlitePool;

use crate::model::student::{NewStudent, Student};
use crate::store::directory;

/// List students
#[utoipa::path(
    get,
    path = "/api/students",
    responses(
        (status = 200, description = "All students in creation order", body = [Student]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Student"
)]
pub async fn list_students(pool: web::Data<SqlitePool>) -> actix_web::Result<impl Responder> {
    let students = directory::list_students(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(students))
}

/// Create Student
#[utoipa::path(
    post,
    path = "/api/students",
    request_body = NewStudent,
    responses(
        (status = 201, description = "Student created", body = Student),
        (status = 400, description = "Missing required field", body = Object, example = json!({
            "message": "roll_number is required"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Student"
)]
pub async fn add_student(
    pool: web::Data<SqlitePool>,
    payload: web::Json<NewStudent>,
) -> actix_web::Result<impl Responder> {
    let student = directory::add_student(pool.get_ref(), payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(student))
}

/// Get Student by ID
#[utoipa::path(
    get,
    path = "/api/students/{id}",
    params(
        ("id" = String, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Student found", body = Student),
        (status = 404, description = "Student not found", body = Object, example = json!({
            "message": "Student not found"
        }))
    ),
    tag = "Student"
)]
pub async fn get_student(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let student = directory::get_student(pool.get_ref(), &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(student))
}

/// Delete Student
///
/// Attendance already recorded for the student is kept.
#[utoipa::path(
    delete,
    path = "/api/students/{id}",
    params(
        ("id" = String, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Successfully deleted", body = Object, example = json!({
            "message": "Successfully deleted"
        })),
        (status = 404, description = "Student not found", body = Object, example = json!({
            "message": "Student not found"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Student"
)]
pub async fn delete_student(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let student_id = path.into_inner();
    directory::delete_student(pool.get_ref(), &student_id).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Successfully deleted"
    })))
}
