//! Pothole API endpoints, including the leaderboard projection.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use super::{success, ApiResult};
use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::geocode::validate_coordinates;
use crate::models::{CreatePotholeRequest, Pothole};
use crate::AppState;

/// Listing query parameters.
#[derive(Debug, Deserialize)]
pub struct ListPotholesQuery {
    /// Maximum number of potholes to return, newest first.
    #[serde(default)]
    pub limit: Option<i64>,
}

/// Maximum page size for pothole listings.
const MAX_LIST_LIMIT: i64 = 100;

/// GET /api/potholes - List potholes, newest first.
pub async fn list_potholes(
    State(state): State<AppState>,
    Query(params): Query<ListPotholesQuery>,
) -> ApiResult<Vec<Pothole>> {
    let limit = params.limit.map(|l| l.clamp(1, MAX_LIST_LIMIT));
    let potholes = state.repo.list_potholes(limit).await?;
    success(potholes)
}

/// GET /api/potholes/:id - Get a single pothole.
pub async fn get_pothole(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Pothole> {
    match state.repo.get_pothole(&id).await? {
        Some(pothole) => success(pothole),
        None => Err(AppError::NotFound(format!("Pothole {} not found", id))),
    }
}

/// POST /api/potholes - Register a new pothole marker.
pub async fn create_pothole(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(request): Json<CreatePotholeRequest>,
) -> ApiResult<Pothole> {
    // Validate required fields
    if request.name.trim().is_empty() {
        return Err(AppError::Validation("Name is required".to_string()));
    }
    validate_coordinates(request.latitude, request.longitude)?;

    let pothole = state.repo.create_pothole(&user_id, &request).await?;
    success(pothole)
}

/// GET /api/leaderboard - Potholes ranked by community upvotes.
pub async fn leaderboard(State(state): State<AppState>) -> ApiResult<Vec<Pothole>> {
    let potholes = state.repo.list_leaderboard().await?;
    success(potholes)
}
