//! Report workflow endpoints.
//!
//! Creating a report resolves the clicked coordinate to a county before
//! insertion; geocoding failure never blocks creation.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{success, ApiResult};
use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::geocode::{require_coordinates, UNKNOWN};
use crate::models::{CreateReportRequest, Report};
use crate::AppState;

/// GET /api/reports - The caller's reports, newest first.
pub async fn list_reports(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> ApiResult<Vec<Report>> {
    let reports = state.repo.list_reports(&user_id).await?;
    success(reports)
}

/// GET /api/reports/:id - A single report owned by the caller.
///
/// The response carries the county and coordinates for the read-only
/// panel beside the embedded repair-request form. Legacy rows with an
/// empty county are re-resolved for the response without rewriting the
/// record.
pub async fn get_report(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Report> {
    let mut report = state
        .repo
        .get_report(&id, &user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Report {} not found", id)))?;

    if report.county.is_empty() {
        report.county = match state.geocoder.resolve(report.lat, report.lng).await {
            Ok(resolved) => resolved.county,
            Err(e) => {
                tracing::warn!("Failed to resolve county for report {}: {}", id, e);
                UNKNOWN.to_string()
            }
        };
    }

    success(report)
}

/// POST /api/reports - File a repair report for a coordinate.
pub async fn create_report(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(request): Json<CreateReportRequest>,
) -> ApiResult<Report> {
    let (lat, lng) = require_coordinates(request.lat, request.lng)?;

    let county = match state.geocoder.resolve(lat, lng).await {
        Ok(resolved) => resolved.county,
        Err(e) => {
            tracing::warn!("Geocoding failed, falling back to Unknown: {}", e);
            UNKNOWN.to_string()
        }
    };

    let report = state.repo.create_report(&user_id, lat, lng, &county).await?;
    success(report)
}

/// POST /api/reports/:id/complete - Mark a report completed.
pub async fn complete_report(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Report> {
    let report = state.repo.complete_report(&id, &user_id).await?;
    success(report)
}

/// DELETE /api/reports/:id - Delete a report owned by the caller.
pub async fn delete_report(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<String>,
) -> ApiResult<()> {
    state.repo.delete_report(&id, &user_id).await?;
    success(())
}
