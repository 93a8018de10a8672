use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use skillswap_match::config::{LoggingSettings, Settings};
use skillswap_match::core::Matcher;
use skillswap_match::models::ScoringWeights;
use skillswap_match::routes::{self, AppState};
use skillswap_match::services::{CacheManager, ProfileStoreClient};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_logging(logging: &LoggingSettings) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // SKILLSWAP_CONFIG points at a config file outside the default locations
    let loaded = match std::env::var("SKILLSWAP_CONFIG") {
        Ok(path) => Settings::load_from(path),
        Err(_) => Settings::load(),
    };

    let settings = match loaded {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    init_logging(&settings.logging);

    info!("Starting SkillSwap match service...");

    let store = match ProfileStoreClient::new(
        settings.profile_store.base_url.clone(),
        Duration::from_secs(settings.profile_store.timeout_secs),
    ) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            error!("Failed to create profile store client: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::Other, e.to_string()));
        }
    };

    info!("Profile store client initialized ({})", store.base_url());

    let cache = Arc::new(CacheManager::new(
        settings.cache.l1_cache_size,
        settings.cache.ttl_secs,
    ));

    info!(
        "Cache manager initialized ({} entries, TTL: {}s)",
        settings.cache.l1_cache_size, settings.cache.ttl_secs
    );

    let matcher = Matcher::new(ScoringWeights::from(&settings.scoring.weights));

    info!("Matcher initialized with weights: {:?}", matcher.weights());

    let app_state = AppState {
        store,
        cache,
        matcher,
        matching: settings.matching.clone(),
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
