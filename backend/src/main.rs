mod config;
mod errors;
mod handlers;
mod routes;
mod services;
mod state;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use sqlx::postgres::PgPoolOptions;
use std::io;

use config::AppConfig;
use state::AppState;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Initialize logger
    env_logger::init();

    log::info!("Starting festbot backend...");

    let config = AppConfig::from_env();
    let port = config.backend_port;

    log::info!("Environment mode: {}", config.env_mode);
    log::info!("Binding to port: {}", port);

    log::info!("Connecting to PostgreSQL database...");
    let db_pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .expect("Failed to connect to Postgres");
    log::info!("Database connection established");

    let cors_origin = config.cors_origin.clone();
    let app_state = web::Data::new(AppState::new(db_pool, config));

    log::info!("Starting HTTP server on 0.0.0.0:{}", port);

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(
                Cors::default()
                    .allowed_origin(&cors_origin)
                    .allowed_methods(vec!["GET", "POST", "OPTIONS"])
                    .allowed_headers(vec!["Content-Type"])
                    .max_age(3600),
            )
            .configure(routes::configure_routes)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
