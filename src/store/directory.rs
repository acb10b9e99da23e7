use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::model::student::{NewStudent, Student};

const STUDENT_COLUMNS: &str =
    "id, name, roll_number, class_name, department, email, phone, created_at";

/// All students in creation order.
pub async fn list_students(pool: &SqlitePool) -> AppResult<Vec<Student>> {
    let sql = format!("SELECT {STUDENT_COLUMNS} FROM students ORDER BY created_at, rowid");
    let students = sqlx::query_as::<_, Student>(&sql).fetch_all(pool).await?;
    Ok(students)
}

pub async fn get_student(pool: &SqlitePool, id: &str) -> AppResult<Student> {
    let sql = format!("SELECT {STUDENT_COLUMNS} FROM students WHERE id = ?");
    sqlx::query_as::<_, Student>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::not_found("Student not found"))
}

pub async fn student_exists(pool: &SqlitePool, id: &str) -> AppResult<bool> {
    let found = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM students WHERE id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;
    Ok(found > 0)
}

pub async fn count_students(pool: &SqlitePool) -> AppResult<i64> {
    let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM students")
        .fetch_one(pool)
        .await?;
    Ok(total)
}

/// Roll numbers are not unique; a duplicate is only logged.
pub async fn add_student(pool: &SqlitePool, fields: NewStudent) -> AppResult<Student> {
    let fields = fields.validate()?;

    let duplicates = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM students WHERE roll_number = ? AND class_name = ?",
    )
    .bind(&fields.roll_number)
    .bind(&fields.class_name)
    .fetch_one(pool)
    .await?;
    if duplicates > 0 {
        warn!(
            roll_number = %fields.roll_number,
            class_name = %fields.class_name,
            "Roll number already used in this class"
        );
    }

    let student = Student {
        id: Uuid::new_v4().to_string(),
        name: fields.name,
        roll_number: fields.roll_number,
        class_name: fields.class_name,
        department: fields.department,
        email: fields.email,
        phone: fields.phone,
        created_at: Utc::now(),
    };

    sqlx::query(
        r#"
        INSERT INTO students
            (id, name, roll_number, class_name, department, email, phone, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&student.id)
    .bind(&student.name)
    .bind(&student.roll_number)
    .bind(&student.class_name)
    .bind(&student.department)
    .bind(&student.email)
    .bind(&student.phone)
    .bind(student.created_at)
    .execute(pool)
    .await?;

    debug!(student_id = %student.id, "Student created");
    Ok(student)
}

/// Attendance history is left in place.
pub async fn delete_student(pool: &SqlitePool, id: &str) -> AppResult<()> {
    let result = sqlx::query("DELETE FROM students WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Student not found"));
    }

    debug!(student_id = id, "Student deleted");
    Ok(())
}

#[cfg(test)]
pub(crate) fn new_student(name: &str, roll: &str, class: &str) -> NewStudent {
    NewStudent {
        name: name.into(),
        roll_number: roll.into(),
        class_name: class.into(),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    #[actix_web::test]
    async fn added_student_is_listed_exactly_once() {
        let pool = test_pool().await;
        let alice = add_student(&pool, new_student("Alice", "R1", "10A"))
            .await
            .unwrap();

        let listed = list_students(&pool).await.unwrap();
        assert_eq!(listed.iter().filter(|s| s.id == alice.id).count(), 1);
        assert_eq!(listed[0].name, "Alice");
    }

    #[actix_web::test]
    async fn list_keeps_creation_order() {
        let pool = test_pool().await;
        for (name, roll) in [("Carol", "R3"), ("Alice", "R1"), ("Bob", "R2")] {
            add_student(&pool, new_student(name, roll, "10A")).await.unwrap();
        }

        let names: Vec<_> = list_students(&pool)
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["Carol", "Alice", "Bob"]);
    }

    #[actix_web::test]
    async fn blank_required_field_is_rejected_before_write() {
        let pool = test_pool().await;
        let err = add_student(&pool, new_student("Alice", "", "10A"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
        assert_eq!(count_students(&pool).await.unwrap(), 0);
    }

    #[actix_web::test]
    async fn duplicate_roll_numbers_are_accepted() {
        let pool = test_pool().await;
        let a = add_student(&pool, new_student("Alice", "R1", "10A")).await.unwrap();
        let b = add_student(&pool, new_student("Alicia", "R1", "10A")).await.unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(count_students(&pool).await.unwrap(), 2);
    }

    #[actix_web::test]
    async fn get_and_delete() {
        let pool = test_pool().await;
        let alice = add_student(&pool, new_student("Alice", "R1", "10A")).await.unwrap();

        let fetched = get_student(&pool, &alice.id).await.unwrap();
        assert_eq!(fetched.roll_number, "R1");
        assert!(student_exists(&pool, &alice.id).await.unwrap());

        delete_student(&pool, &alice.id).await.unwrap();
        assert!(!student_exists(&pool, &alice.id).await.unwrap());
        assert!(matches!(
            get_student(&pool, &alice.id).await,
            Err(AppError::NotFound { .. })
        ));
    }

    #[actix_web::test]
    async fn deleting_unknown_student_is_not_found() {
        let pool = test_pool().await;
        let err = delete_student(&pool, "nope").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }
}
