use crate::{
    api::{attendance, report, student},
    config::Config,
    error::AppError,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{HttpResponse, web};
use anyhow::{Result, anyhow};
use serde_json::json;
use std::sync::Arc;

pub type Limiter = Governor<PeerIpKeyExtractor, NoOpMiddleware>;

/// Per-IP limiter allowing `requests_per_min` with the same burst size.
pub fn build_limiter(requests_per_min: u32) -> Result<Limiter> {
    let requests_per_min = requests_per_min.max(1);
    let per_ms = (60_000 / requests_per_min as u64).max(1);

    let cfg = GovernorConfigBuilder::default()
        .milliseconds_per_request(per_ms)
        .burst_size(requests_per_min)
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .ok_or_else(|| anyhow!("invalid rate limit: {requests_per_min} per minute"))?;
    Ok(Governor::new(&cfg))
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config, limiter: Arc<Limiter>) {
    cfg.route("/health", web::get().to(health));

    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(limiter) // rate limiting
            .configure(api_routes),
    );
}

pub fn api_routes(cfg: &mut web::ServiceConfig) {
    // extractor failures answer with the same JSON body as handler errors
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::validation(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::validation(err.to_string()).into()),
    );

    cfg.service(
        web::scope("/students")
            // /students
            .service(
                web::resource("")
                    .route(web::get().to(student::list_students))
                    .route(web::post().to(student::add_student)),
            )
            // /students/{id}
            .service(
                web::resource("/{id}")
                    .route(web::get().to(student::get_student))
                    .route(web::delete().to(student::delete_student)),
            ),
    )
    .service(
        web::scope("/attendance")
            .service(web::resource("/mark").route(web::post().to(attendance::mark)))
            .service(web::resource("/mark-all").route(web::post().to(attendance::mark_all)))
            .service(web::resource("/date/{date}").route(web::get().to(attendance::by_date)))
            .service(web::resource("/student/{id}").route(web::get().to(attendance::by_student)))
            .service(web::resource("/all").route(web::get().to(attendance::all)))
            .service(web::resource("/stats").route(web::get().to(attendance::stats))),
    )
    .service(
        web::scope("/reports")
            // /reports
            .service(web::resource("").route(web::get().to(report::get_report)))
            // /reports/export
            .service(web::resource("/export").route(web::get().to(report::export))),
    );
}
