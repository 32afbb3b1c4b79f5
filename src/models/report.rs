//! Repair-request report model with its two-state lifecycle.

use serde::{Deserialize, Serialize};

/// Lifecycle state of a report. Transitions one way, pending to completed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Pending,
    Completed,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "pending",
            ReportStatus::Completed => "completed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(ReportStatus::Pending),
            "completed" => Some(ReportStatus::Completed),
            _ => None,
        }
    }
}

/// A formal repair request filed by a user against a chosen coordinate.
///
/// The county is resolved once at creation and cached on the record.
/// Reports are owned exclusively by their creating user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: String,
    pub user_id: String,
    pub lat: f64,
    pub lng: f64,
    pub county: String,
    pub status: ReportStatus,
    pub created_at: String,
    pub updated_at: String,
}

/// Request body for filing a new report. Coordinates are validated for
/// presence and range before any external call.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReportRequest {
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
}
