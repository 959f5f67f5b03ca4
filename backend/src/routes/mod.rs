use actix_web::web;

use crate::handlers;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .configure(handlers::chat::configure)
            .configure(handlers::events::configure),
    )
    .configure(handlers::health::configure);
}
