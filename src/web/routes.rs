use actix_web::web;
use crate::web::handlers;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(handlers::json_config())
        .route("/chat", web::post().to(handlers::chat))
        .route("/", web::get().to(handlers::index))
        .route("/health", web::get().to(handlers::health_check));
}
