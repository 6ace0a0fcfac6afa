use actix_web::web;

use crate::handlers::health_handlers::{health_check, root};
use crate::handlers::qr_handlers::generate_qr;

/// Configure the routes
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(root))
        .route("/health", web::get().to(health_check))
        .route("/qr", web::get().to(generate_qr));
}
