//! Community vote model for potholes.

use serde::{Deserialize, Serialize};

/// Direction of a community vote.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VoteType {
    Upvote,
    Downvote,
}

impl VoteType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteType::Upvote => "upvote",
            VoteType::Downvote => "downvote",
        }
    }
}

/// A single user's vote on a pothole.
///
/// Rows are append-only. At most one row may exist per
/// (pothole, user, vote type); an upvote and a downvote from the same
/// user may coexist.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PotholeVote {
    pub id: String,
    pub pothole_id: String,
    pub user_id: String,
    pub vote_type: VoteType,
    pub created_at: String,
}

/// Request body for casting a vote.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CastVoteRequest {
    pub vote_type: VoteType,
}
