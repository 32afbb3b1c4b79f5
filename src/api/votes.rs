//! Vote API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use super::{success, ApiResult};
use crate::auth::AuthUser;
use crate::models::{CastVoteRequest, Pothole, PotholeVote};
use crate::AppState;

/// Response for a cast vote: the stored vote and the pothole with its
/// adjusted count.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CastVoteResponse {
    pub vote: PotholeVote,
    pub pothole: Pothole,
}

/// POST /api/potholes/:id/votes - Cast an upvote or downvote.
pub async fn cast_vote(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<String>,
    Json(request): Json<CastVoteRequest>,
) -> ApiResult<CastVoteResponse> {
    let (vote, pothole) = state
        .repo
        .cast_vote(&id, &user_id, request.vote_type)
        .await?;
    success(CastVoteResponse { vote, pothole })
}
