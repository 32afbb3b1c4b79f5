//! Geocoding API endpoint.

use axum::{extract::State, Json};
use serde::Deserialize;

use super::{success, ApiResult};
use crate::geocode::{require_coordinates, ResolvedLocation};
use crate::AppState;

/// Request body for coordinate resolution.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeocodeRequest {
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
}

/// POST /api/geocode - Resolve a coordinate pair to a county and state.
pub async fn resolve_location(
    State(state): State<AppState>,
    Json(request): Json<GeocodeRequest>,
) -> ApiResult<ResolvedLocation> {
    let (lat, lng) = require_coordinates(request.lat, request.lng)?;
    let resolved = state.geocoder.resolve(lat, lng).await?;
    success(resolved)
}
