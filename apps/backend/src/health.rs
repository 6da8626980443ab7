use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::AppError;

async fn root() -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().body("Gongzhu backend is running!"))
}

async fn health() -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    })))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(root))
        .route("/health", web::get().to(health));
}
