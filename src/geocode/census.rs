//! Public government geocoding provider.
//!
//! Returns county and state names directly, keyed by benchmark/vintage
//! parameters. Unlike the commercial provider, state names arrive in
//! full form.

use serde::Deserialize;

use super::{ResolvedLocation, UNKNOWN};
use crate::errors::AppError;

const GEOCODE_URL: &str = "https://geocoding.geo.census.gov/geographies/coordinates";

#[derive(Debug, Deserialize)]
struct GeographiesResponse {
    result: GeographiesResult,
}

#[derive(Debug, Deserialize)]
struct GeographiesResult {
    geographies: Geographies,
}

#[derive(Debug, Deserialize)]
struct Geographies {
    #[serde(rename = "States", default)]
    states: Vec<Geography>,
    #[serde(rename = "Counties", default)]
    counties: Vec<Geography>,
}

#[derive(Debug, Deserialize)]
struct Geography {
    #[serde(rename = "NAME")]
    name: String,
}

/// Client for the public government geocoding service.
pub struct CensusGeocoder {
    http_client: reqwest::Client,
    benchmark: String,
    vintage: String,
}

impl CensusGeocoder {
    pub fn new(benchmark: String, vintage: String) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            benchmark,
            vintage,
        }
    }

    /// Resolve a coordinate pair through the provider.
    pub async fn resolve(&self, lat: f64, lng: f64) -> Result<ResolvedLocation, AppError> {
        let response = self
            .http_client
            .get(GEOCODE_URL)
            .query(&[
                ("x", lng.to_string()),
                ("y", lat.to_string()),
                ("benchmark", self.benchmark.clone()),
                ("vintage", self.vintage.clone()),
                ("format", "json".to_string()),
            ])
            .send()
            .await
            .map_err(|e| AppError::GeocodeUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::error!("Geocoding API error: {}", status);
            return Err(AppError::GeocodeUnavailable(format!(
                "Geocoding API error: {}",
                status
            )));
        }

        let body: GeographiesResponse = response
            .json()
            .await
            .map_err(|e| AppError::GeocodeUnavailable(e.to_string()))?;

        Ok(extract_names(&body.result.geographies))
    }
}

/// The county and state arrive as the first entry of their geography
/// lists.
fn extract_names(geographies: &Geographies) -> ResolvedLocation {
    let county = geographies
        .counties
        .first()
        .map(|g| g.name.clone())
        .unwrap_or_else(|| UNKNOWN.to_string());
    let state = geographies
        .states
        .first()
        .map(|g| g.name.clone())
        .unwrap_or_else(|| UNKNOWN.to_string());

    ResolvedLocation { county, state }
}
