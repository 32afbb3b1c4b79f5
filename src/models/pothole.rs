//! Pothole model, the primary map entity.

use serde::{Deserialize, Serialize};

/// A reported road-defect location shown as a map marker.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pothole {
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Denormalized community vote count, never negative.
    pub upvote_count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub created_at: String,
}

/// Request body for registering a new pothole marker.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePotholeRequest {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}
