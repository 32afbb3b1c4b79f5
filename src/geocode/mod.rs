//! Coordinate-to-county resolution.
//!
//! Two independent provider strategies exist behind one interface;
//! exactly one is selected per deployment through configuration. Callers
//! in the report workflow must treat resolution failure as non-fatal and
//! fall back to "Unknown". There is no caching layer; every call
//! re-queries the provider.

mod census;
mod google;

pub use census::CensusGeocoder;
pub use google::GoogleGeocoder;

use serde::{Deserialize, Serialize};

use crate::config::{Config, GeocodeProvider};
use crate::errors::AppError;

/// Fallback value for a county or state that cannot be resolved.
pub const UNKNOWN: &str = "Unknown";

/// A resolved county/state pair. Fields fall back to "Unknown" rather
/// than being absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResolvedLocation {
    pub county: String,
    pub state: String,
}

/// Reverse-geocoding client dispatching to the configured provider.
pub enum Geocoder {
    Google(GoogleGeocoder),
    Census(CensusGeocoder),
}

impl Geocoder {
    /// Build the provider selected by configuration.
    pub fn from_config(config: &Config) -> Self {
        match config.geocode_provider {
            GeocodeProvider::Google => {
                Geocoder::Google(GoogleGeocoder::new(config.google_maps_api_key.clone()))
            }
            GeocodeProvider::Census => Geocoder::Census(CensusGeocoder::new(
                config.census_benchmark.clone(),
                config.census_vintage.clone(),
            )),
        }
    }

    /// Resolve a coordinate pair to a county and state.
    pub async fn resolve(&self, lat: f64, lng: f64) -> Result<ResolvedLocation, AppError> {
        validate_coordinates(lat, lng)?;
        match self {
            Geocoder::Google(provider) => provider.resolve(lat, lng).await,
            Geocoder::Census(provider) => provider.resolve(lat, lng).await,
        }
    }
}

/// Check that both coordinates are present, then validate them.
pub fn require_coordinates(lat: Option<f64>, lng: Option<f64>) -> Result<(f64, f64), AppError> {
    match (lat, lng) {
        (Some(lat), Some(lng)) => {
            validate_coordinates(lat, lng)?;
            Ok((lat, lng))
        }
        _ => Err(AppError::Validation(
            "Latitude and longitude are required".to_string(),
        )),
    }
}

/// Check that a coordinate pair is numeric and within range.
pub fn validate_coordinates(lat: f64, lng: f64) -> Result<(), AppError> {
    if !lat.is_finite() || !lng.is_finite() {
        return Err(AppError::Validation("Invalid coordinates".to_string()));
    }
    if !(-90.0..=90.0).contains(&lat) {
        return Err(AppError::Validation(format!(
            "Latitude {} out of range",
            lat
        )));
    }
    if !(-180.0..=180.0).contains(&lng) {
        return Err(AppError::Validation(format!(
            "Longitude {} out of range",
            lng
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_coordinates() {
        assert!(validate_coordinates(39.29, -76.61).is_ok());
        assert!(validate_coordinates(0.0, 0.0).is_ok());
    }

    #[test]
    fn accepts_boundary_values() {
        assert!(validate_coordinates(90.0, 180.0).is_ok());
        assert!(validate_coordinates(-90.0, -180.0).is_ok());
    }

    #[test]
    fn rejects_out_of_range_latitude() {
        assert!(validate_coordinates(90.1, 0.0).is_err());
        assert!(validate_coordinates(-123.0, 0.0).is_err());
    }

    #[test]
    fn rejects_out_of_range_longitude() {
        assert!(validate_coordinates(0.0, 180.5).is_err());
        assert!(validate_coordinates(0.0, -200.0).is_err());
    }

    #[test]
    fn rejects_non_finite_values() {
        assert!(validate_coordinates(f64::NAN, 0.0).is_err());
        assert!(validate_coordinates(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn requires_both_coordinates() {
        assert!(require_coordinates(Some(39.29), Some(-76.61)).is_ok());
        assert!(require_coordinates(None, Some(-76.61)).is_err());
        assert!(require_coordinates(Some(39.29), None).is_err());
        assert!(require_coordinates(None, None).is_err());
    }
}
