//! Pothole Reporting Backend
//!
//! A REST backend for a map-centric civic-reporting application: pothole
//! markers, community votes, repair reports with county resolution, and
//! a community leaderboard.

mod api;
mod auth;
mod config;
mod db;
mod errors;
mod geocode;
mod models;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use db::Repository;
use geocode::Geocoder;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub geocoder: Arc<Geocoder>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Pothole Reporting Backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Geocode provider: {:?}", config.geocode_provider);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Warn if PSK is not configured
    if config.api_psk.is_none() {
        tracing::warn!("No API PSK configured (POTHOLE_API_PSK). Authentication is disabled!");
    }

    // Initialize database
    let pool = db::init_database(&config.db_path).await?;
    let repo = Arc::new(Repository::new(pool));

    // Build the configured geocoding provider
    let geocoder = Arc::new(Geocoder::from_config(&config));

    // Create application state
    let state = AppState {
        repo,
        geocoder,
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Clone PSK for the auth layer
    let psk = state.config.api_psk.clone();

    // API routes
    let api_routes = Router::new()
        // Potholes
        .route("/potholes", get(api::list_potholes))
        .route("/potholes", post(api::create_pothole))
        .route("/potholes/{id}", get(api::get_pothole))
        .route("/potholes/{id}/votes", post(api::cast_vote))
        // Reports
        .route("/reports", get(api::list_reports))
        .route("/reports", post(api::create_report))
        .route("/reports/{id}", get(api::get_report))
        .route("/reports/{id}", delete(api::delete_report))
        .route("/reports/{id}/complete", post(api::complete_report))
        // Leaderboard
        .route("/leaderboard", get(api::leaderboard))
        // Geocoding
        .route("/geocode", post(api::resolve_location))
        // Apply PSK auth middleware
        .layer(middleware::from_fn(move |req, next| {
            auth::psk_auth_layer(psk.clone(), req, next)
        }));

    // Health check (no auth required)
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
