pub mod attendance;
pub mod report;
pub mod student;

/// App with the API routes under `/api` and no rate limiting, for handler tests.
#[cfg(test)]
pub(crate) fn test_app(
    pool: sqlx::SqlitePool,
) -> actix_web::App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<actix_web::body::BoxBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    use actix_web::{App, web};

    App::new()
        .app_data(web::Data::new(pool))
        .service(web::scope("/api").configure(crate::routes::api_routes))
}
