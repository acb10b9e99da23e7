use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS students (
        id          TEXT PRIMARY KEY NOT NULL,
        name        TEXT NOT NULL,
        roll_number TEXT NOT NULL,
        class_name  TEXT NOT NULL,
        department  TEXT,
        email       TEXT,
        phone       TEXT,
        created_at  TEXT NOT NULL
    )
    "#,
    // no foreign key: attendance outlives the student it points at
    r#"
    CREATE TABLE IF NOT EXISTS attendance (
        id          TEXT PRIMARY KEY NOT NULL,
        student_id  TEXT NOT NULL,
        date        TEXT NOT NULL,
        status      TEXT NOT NULL,
        created_at  TEXT NOT NULL,
        updated_at  TEXT NOT NULL
    )
    "#,
    r#"
    CREATE UNIQUE INDEX IF NOT EXISTS attendance_student_date
        ON attendance (student_id, date)
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS attendance_date ON attendance (date)
    "#,
];

pub async fn init_db(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections.max(1))
        .connect(database_url)
        .await?;

    create_schema(&pool).await?;
    tracing::info!(database_url, "Database ready");
    Ok(pool)
}

async fn create_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}

/// Single-connection in-memory database; every connection to `sqlite::memory:`
/// opens a fresh database, so the pool must never grow or recycle.
#[cfg(test)]
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite");
    create_schema(&pool).await.expect("schema");
    pool
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn schema_creation_is_idempotent() {
        let pool = test_pool().await;
        create_schema(&pool).await.unwrap();

        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name",
        )
        .fetch_all(&pool)
        .await
        .unwrap();
        let names: Vec<_> = tables.into_iter().map(|(n,)| n).collect();
        assert_eq!(names, vec!["attendance", "students"]);
    }
}
