mod analysis;
mod config;
mod inference;
mod ledger;
mod routes;

use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use config::ServiceConfig;
use inference::model::Classifier;
use ledger::DonationLedger;
use routes::configure_routes;
use std::env;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    dotenv::dotenv().ok();

    if let Ok(current_dir) = env::current_dir() {
        log::info!("Current working directory: {}", current_dir.display());
    } else {
        log::error!("Failed to get the current working directory.");
    }

    let config = match ServiceConfig::load() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load service configuration: {e}");
            return Err(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("Configuration loading failed: {e}"),
            ));
        }
    };

    let classifier = Classifier::load(&config.model.weights_path);
    if classifier.model_loaded() {
        log::info!("Model weights loaded from {}", config.model.weights_path);
    } else {
        log::warn!("No trained model available; predictions fall back to random sampling");
    }

    let classifier = web::Data::new(classifier);
    let ledger = web::Data::new(DonationLedger::new());
    let config = web::Data::new(config);

    let port = env::var("PORT").unwrap_or_else(|_| "8081".to_string());
    let bind_address = format!("0.0.0.0:{}", port);

    log::info!("Starting server on {}", bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allowed_methods(vec!["GET", "POST", "OPTIONS"])
                    .allowed_headers(vec![
                        actix_web::http::header::AUTHORIZATION,
                        actix_web::http::header::ACCEPT,
                        actix_web::http::header::CONTENT_TYPE,
                    ])
                    .max_age(3600),
            )
            .app_data(classifier.clone())
            .app_data(ledger.clone())
            .app_data(config.clone())
            .configure(configure_routes)
    })
    .bind(&bind_address)?
    .run()
    .await
}
