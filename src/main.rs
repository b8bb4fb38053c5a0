use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use neighborfit::config::{LoggingSettings, Settings};
use neighborfit::routes::{self, AppState};
use neighborfit::{Catalog, Matcher};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber; RUST_LOG overrides the configured level
fn init_logging(logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }
}

fn build_cors(settings: &Settings) -> Cors {
    if settings.cors_is_permissive() {
        return Cors::permissive();
    }

    settings
        .cors
        .allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allow_any_method()
        .allow_any_header()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e));
        }
    };

    init_logging(&settings.logging);

    info!("Starting NeighborFit matching service...");

    // Catalog is loaded once and never mutated; a missing file yields an empty catalog
    let catalog = Arc::new(Catalog::load_or_empty(&settings.catalog.path));

    info!("Catalog ready with {} neighborhoods", catalog.len());

    let weights = settings.scoring_weights();
    if (weights.total() - 1.0).abs() > 1e-6 {
        warn!("Scoring weights sum to {:.4}, expected 1.0", weights.total());
    }

    let matcher = Matcher::new(weights, settings.matching.max_results);

    info!(
        "Matcher initialized with weights: {:?}, max results: {}",
        matcher.weights(),
        matcher.max_results()
    );

    let app_state = AppState { catalog, matcher };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(routes::handle_json_payload_error))
            .wrap(routes::internal_error_handlers())
            .wrap(build_cors(&settings))
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
            .default_service(web::route().to(routes::not_found))
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
