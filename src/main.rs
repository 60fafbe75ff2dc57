use std::sync::Arc;

use actix_web::middleware::NormalizePath;
use actix_web::web::Data;
use actix_web::{App, HttpResponse, HttpServer, Responder, get};
use dotenvy::dotenv;

mod api;
mod config;
mod db;
mod docs;
mod error;
mod model;
mod repo;
mod routes;
mod stats;
mod store;

use config::Config;
use db::init_store;
use repo::attendance::AttendanceRepo;
use repo::employee::EmployeeRepo;
use stats::StatsEngine;
use store::RecordStore;

use crate::docs::ApiDoc;
use tracing::{info, warn};
use tracing_appender::rolling;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[get("/")]
async fn index() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "HRMS API",
        "status": "running"
    }))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    let config = Config::from_env();

    // Rolling daily log
    let file_appender = rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!("Server starting...");

    let store: Arc<dyn RecordStore> = Arc::new(init_store(&config).await);

    // Best-effort connectivity check; the health endpoint reports the
    // live status either way.
    if let Err(e) = store.ping().await {
        warn!(error = %e, "store unreachable at startup");
    }

    let attendance_repo = AttendanceRepo::new(store.clone());
    let employee_repo = EmployeeRepo::new(store.clone(), attendance_repo.clone());
    let stats_engine = StatsEngine::new(store.clone());

    let server_addr = config.server_addr.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(Data::from(store.clone()))
            .app_data(Data::new(employee_repo.clone()))
            .app_data(Data::new(attendance_repo.clone()))
            .app_data(Data::new(stats_engine.clone()))
            .service(index)
            .route("/health", actix_web::web::get().to(api::health::health))
            .configure(routes::configure)
    })
    .bind(server_addr)?
    .run()
    .await
}
