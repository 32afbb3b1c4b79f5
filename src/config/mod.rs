//! Configuration module for the pothole backend.
//!
//! All configuration is loaded from environment variables with sensible
//! defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Which reverse-geocoding provider this deployment uses. Exactly one is
/// active at a time; the strategies are interchangeable behind the
/// `Geocoder` interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeocodeProvider {
    /// Commercial geocoding API keyed by an API key
    Google,
    /// Public government geocoding service keyed by benchmark/vintage
    Census,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Pre-shared key for API authentication (required in production)
    pub api_psk: Option<String>,
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Reverse-geocoding provider selection
    pub geocode_provider: GeocodeProvider,
    /// API key for the Google provider
    pub google_maps_api_key: Option<String>,
    /// Benchmark parameter for the Census provider
    pub census_benchmark: String,
    /// Vintage parameter for the Census provider
    pub census_vintage: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let api_psk = env::var("POTHOLE_API_PSK").ok();

        let db_path = env::var("POTHOLE_DB_PATH")
            .unwrap_or_else(|_| "./data/app.sqlite".to_string())
            .into();

        let bind_addr = env::var("POTHOLE_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .expect("Invalid POTHOLE_BIND_ADDR format");

        let log_level = env::var("POTHOLE_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let geocode_provider = match env::var("POTHOLE_GEOCODE_PROVIDER")
            .unwrap_or_else(|_| "google".to_string())
            .to_lowercase()
            .as_str()
        {
            "google" => GeocodeProvider::Google,
            "census" => GeocodeProvider::Census,
            other => panic!("Unknown POTHOLE_GEOCODE_PROVIDER: {}", other),
        };

        let google_maps_api_key = env::var("POTHOLE_GOOGLE_MAPS_API_KEY").ok();

        let census_benchmark = env::var("POTHOLE_CENSUS_BENCHMARK")
            .unwrap_or_else(|_| "Public_AR_Current".to_string());

        let census_vintage =
            env::var("POTHOLE_CENSUS_VINTAGE").unwrap_or_else(|_| "Current_Current".to_string());

        Self {
            api_psk,
            db_path,
            bind_addr,
            log_level,
            geocode_provider,
            google_maps_api_key,
            census_benchmark,
            census_vintage,
        }
    }
}
