//! Commercial reverse-geocoding provider.
//!
//! Returns structured address components tagged with types; the county is
//! the long form of administrative_area_level_2 and the state the short
//! form of administrative_area_level_1.

use serde::Deserialize;

use super::{ResolvedLocation, UNKNOWN};
use crate::errors::AppError;

const GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

const COUNTY_COMPONENT: &str = "administrative_area_level_2";
const STATE_COMPONENT: &str = "administrative_area_level_1";

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeResult>,
    status: String,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    #[serde(default)]
    address_components: Vec<AddressComponent>,
    #[serde(default)]
    types: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct AddressComponent {
    long_name: String,
    short_name: String,
    types: Vec<String>,
}

/// Client for the commercial geocoding API.
pub struct GoogleGeocoder {
    http_client: reqwest::Client,
    api_key: Option<String>,
}

impl GoogleGeocoder {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            api_key,
        }
    }

    /// Resolve a coordinate pair through the provider.
    pub async fn resolve(&self, lat: f64, lng: f64) -> Result<ResolvedLocation, AppError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            AppError::GeocodeUnavailable("Google Maps API key not configured".to_string())
        })?;

        let response = self
            .http_client
            .get(GEOCODE_URL)
            .query(&[
                ("latlng", format!("{},{}", lat, lng)),
                ("key", api_key.to_string()),
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

        let body: GeocodeResponse = response
            .json()
            .await
            .map_err(|e| AppError::GeocodeUnavailable(e.to_string()))?;

        if body.status != "OK" {
            return Err(AppError::GeocodeUnavailable(format!(
                "Geocoding failed: {}",
                body.status
            )));
        }

        Ok(extract_county_state(&body.results))
    }
}

/// Pick the county and state out of a geocoding result list.
///
/// Results typed street_address or route are the most specific; the first
/// such result supplies the county (long form) and state (short form,
/// "MD" rather than "Maryland"). If that pass yields no county, scan
/// every result in order and stop at the first one naming a county. Both
/// fields default to "Unknown".
fn extract_county_state(results: &[GeocodeResult]) -> ResolvedLocation {
    let mut county = UNKNOWN.to_string();
    let mut state = UNKNOWN.to_string();

    for result in results {
        if result
            .types
            .iter()
            .any(|t| t == "street_address" || t == "route")
        {
            for component in &result.address_components {
                if component.types.iter().any(|t| t == COUNTY_COMPONENT) {
                    county = component.long_name.clone();
                }
                if component.types.iter().any(|t| t == STATE_COMPONENT) {
                    state = component.short_name.clone();
                }
            }
            break;
        }
    }

    if county == UNKNOWN {
        for result in results {
            for component in &result.address_components {
                if component.types.iter().any(|t| t == COUNTY_COMPONENT) {
                    county = component.long_name.clone();
                }
                if component.types.iter().any(|t| t == STATE_COMPONENT) {
                    state = component.short_name.clone();
                }
            }
            if county != UNKNOWN {
                break;
            }
        }
    }

    ResolvedLocation { county, state }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Vec<GeocodeResult> {
        serde_json::from_str::<GeocodeResponse>(json)
            .unwrap()
            .results
    }

    #[test]
    fn street_address_result_yields_county_and_state() {
        let results = parse(
            r#"{
                "status": "OK",
                "results": [{
                    "types": ["street_address"],
                    "address_components": [
                        {
                            "long_name": "Baltimore County",
                            "short_name": "Baltimore County",
                            "types": ["administrative_area_level_2", "political"]
                        },
                        {
                            "long_name": "Maryland",
                            "short_name": "MD",
                            "types": ["administrative_area_level_1", "political"]
                        }
                    ]
                }]
            }"#,
        );

        let resolved = extract_county_state(&results);
        assert_eq!(resolved.county, "Baltimore County");
        assert_eq!(resolved.state, "MD");
    }

    #[test]
    fn route_result_is_treated_as_specific() {
        let results = parse(
            r#"{
                "status": "OK",
                "results": [{
                    "types": ["route"],
                    "address_components": [
                        {
                            "long_name": "Howard County",
                            "short_name": "Howard County",
                            "types": ["administrative_area_level_2"]
                        },
                        {
                            "long_name": "Maryland",
                            "short_name": "MD",
                            "types": ["administrative_area_level_1"]
                        }
                    ]
                }]
            }"#,
        );

        let resolved = extract_county_state(&results);
        assert_eq!(resolved.county, "Howard County");
        assert_eq!(resolved.state, "MD");
    }

    #[test]
    fn fallback_scans_all_results_when_no_specific_match() {
        // No street_address/route result; the county comes from the
        // second result via the fallback scan.
        let results = parse(
            r#"{
                "status": "OK",
                "results": [
                    {
                        "types": ["locality", "political"],
                        "address_components": [
                            {
                                "long_name": "Towson",
                                "short_name": "Towson",
                                "types": ["locality"]
                            }
                        ]
                    },
                    {
                        "types": ["postal_code"],
                        "address_components": [
                            {
                                "long_name": "Baltimore County",
                                "short_name": "Baltimore County",
                                "types": ["administrative_area_level_2"]
                            },
                            {
                                "long_name": "Maryland",
                                "short_name": "MD",
                                "types": ["administrative_area_level_1"]
                            }
                        ]
                    }
                ]
            }"#,
        );

        let resolved = extract_county_state(&results);
        assert_eq!(resolved.county, "Baltimore County");
        assert_eq!(resolved.state, "MD");
    }

    #[test]
    fn missing_county_component_defaults_to_unknown() {
        let results = parse(
            r#"{
                "status": "OK",
                "results": [{
                    "types": ["street_address"],
                    "address_components": [
                        {
                            "long_name": "Maryland",
                            "short_name": "MD",
                            "types": ["administrative_area_level_1"]
                        }
                    ]
                }]
            }"#,
        );

        let resolved = extract_county_state(&results);
        assert_eq!(resolved.county, "Unknown");
        assert_eq!(resolved.state, "MD");
    }

    #[test]
    fn no_county_in_any_result_defaults_to_unknown() {
        let results = parse(
            r#"{
                "status": "OK",
                "results": [
                    {
                        "types": ["locality"],
                        "address_components": [
                            {
                                "long_name": "Towson",
                                "short_name": "Towson",
                                "types": ["locality"]
                            }
                        ]
                    }
                ]
            }"#,
        );

        let resolved = extract_county_state(&results);
        assert_eq!(resolved.county, "Unknown");
        assert_eq!(resolved.state, "Unknown");
    }

    #[test]
    fn empty_results_default_to_unknown() {
        let results = parse(r#"{ "status": "OK", "results": [] }"#);

        let resolved = extract_county_state(&results);
        assert_eq!(resolved.county, "Unknown");
        assert_eq!(resolved.state, "Unknown");
    }

    #[test]
    fn specific_result_stops_the_scan() {
        // The street_address result wins even when a later result names a
        // different county.
        let results = parse(
            r#"{
                "status": "OK",
                "results": [
                    {
                        "types": ["street_address"],
                        "address_components": [
                            {
                                "long_name": "Baltimore County",
                                "short_name": "Baltimore County",
                                "types": ["administrative_area_level_2"]
                            },
                            {
                                "long_name": "Maryland",
                                "short_name": "MD",
                                "types": ["administrative_area_level_1"]
                            }
                        ]
                    },
                    {
                        "types": ["postal_code"],
                        "address_components": [
                            {
                                "long_name": "Harford County",
                                "short_name": "Harford County",
                                "types": ["administrative_area_level_2"]
                            }
                        ]
                    }
                ]
            }"#,
        );

        let resolved = extract_county_state(&results);
        assert_eq!(resolved.county, "Baltimore County");
        assert_eq!(resolved.state, "MD");
    }
}
