//! Database repository for CRUD operations.
//!
//! Report reads and writes are scoped by owner at the query level; a
//! zero-row update or delete is indistinguishable from a missing row.

use chrono::Utc;
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::{
    CreatePotholeRequest, Pothole, PotholeVote, Report, ReportStatus, VoteType,
};

/// Database repository for all data operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ==================== POTHOLE OPERATIONS ====================

    /// List potholes, newest first. A negative limit means no limit.
    pub async fn list_potholes(&self, limit: Option<i64>) -> Result<Vec<Pothole>, AppError> {
        let rows = sqlx::query(
            "SELECT id, name, latitude, longitude, upvote_count, user_id, created_at FROM potholes ORDER BY created_at DESC LIMIT ?"
        )
        .bind(limit.unwrap_or(-1))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(pothole_from_row).collect())
    }

    /// List potholes ranked by community votes, newest first among ties.
    pub async fn list_leaderboard(&self) -> Result<Vec<Pothole>, AppError> {
        let rows = sqlx::query(
            "SELECT id, name, latitude, longitude, upvote_count, user_id, created_at FROM potholes ORDER BY upvote_count DESC, created_at DESC"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(pothole_from_row).collect())
    }

    /// Get a pothole by ID.
    pub async fn get_pothole(&self, id: &str) -> Result<Option<Pothole>, AppError> {
        let row = sqlx::query(
            "SELECT id, name, latitude, longitude, upvote_count, user_id, created_at FROM potholes WHERE id = ?"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(pothole_from_row))
    }

    /// Register a new pothole marker.
    pub async fn create_pothole(
        &self,
        user_id: &str,
        request: &CreatePotholeRequest,
    ) -> Result<Pothole, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO potholes (id, name, latitude, longitude, upvote_count, user_id, created_at) VALUES (?, ?, ?, ?, 0, ?, ?)"
        )
        .bind(&id)
        .bind(&request.name)
        .bind(request.latitude)
        .bind(request.longitude)
        .bind(user_id)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(Pothole {
            id,
            name: request.name.clone(),
            latitude: request.latitude,
            longitude: request.longitude,
            upvote_count: 0,
            user_id: Some(user_id.to_string()),
            created_at: now,
        })
    }

    // ==================== VOTE OPERATIONS ====================

    /// Cast a vote and adjust the pothole's denormalized count.
    ///
    /// Runs in one transaction. The UNIQUE constraint on
    /// (pothole_id, user_id, vote_type) is the duplicate check, and the
    /// counter adjustment happens in SQL so concurrent votes cannot lose
    /// updates. A downvote never takes the count below zero.
    pub async fn cast_vote(
        &self,
        pothole_id: &str,
        user_id: &str,
        vote_type: VoteType,
    ) -> Result<(PotholeVote, Pothole), AppError> {
        let mut tx = self.pool.begin().await?;

        let exists = sqlx::query("SELECT id FROM potholes WHERE id = ?")
            .bind(pothole_id)
            .fetch_optional(&mut *tx)
            .await?;
        if exists.is_none() {
            return Err(AppError::NotFound(format!(
                "Pothole {} not found",
                pothole_id
            )));
        }

        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        let insert = sqlx::query(
            "INSERT INTO pothole_votes (id, pothole_id, user_id, vote_type, created_at) VALUES (?, ?, ?, ?, ?)"
        )
        .bind(&id)
        .bind(pothole_id)
        .bind(user_id)
        .bind(vote_type.as_str())
        .bind(&now)
        .execute(&mut *tx)
        .await;

        if let Err(e) = insert {
            if e.as_database_error()
                .is_some_and(|db| db.is_unique_violation())
            {
                let verb = match vote_type {
                    VoteType::Upvote => "upvoted",
                    VoteType::Downvote => "downvoted",
                };
                return Err(AppError::DuplicateVote(format!(
                    "You have already {} this pothole",
                    verb
                )));
            }
            return Err(e.into());
        }

        let adjust = match vote_type {
            VoteType::Upvote => "UPDATE potholes SET upvote_count = upvote_count + 1 WHERE id = ?",
            VoteType::Downvote => {
                "UPDATE potholes SET upvote_count = MAX(0, upvote_count - 1) WHERE id = ?"
            }
        };
        sqlx::query(adjust).bind(pothole_id).execute(&mut *tx).await?;

        let row = sqlx::query(
            "SELECT id, name, latitude, longitude, upvote_count, user_id, created_at FROM potholes WHERE id = ?"
        )
        .bind(pothole_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        let vote = PotholeVote {
            id,
            pothole_id: pothole_id.to_string(),
            user_id: user_id.to_string(),
            vote_type,
            created_at: now,
        };

        Ok((vote, pothole_from_row(&row)))
    }

    // ==================== REPORT OPERATIONS ====================

    /// List a user's reports, newest first.
    pub async fn list_reports(&self, user_id: &str) -> Result<Vec<Report>, AppError> {
        let rows = sqlx::query(
            "SELECT id, user_id, lat, lng, county, status, created_at, updated_at FROM reports WHERE user_id = ? ORDER BY created_at DESC"
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(report_from_row).collect())
    }

    /// Get a report by ID, scoped to its owner.
    pub async fn get_report(&self, id: &str, user_id: &str) -> Result<Option<Report>, AppError> {
        let row = sqlx::query(
            "SELECT id, user_id, lat, lng, county, status, created_at, updated_at FROM reports WHERE id = ? AND user_id = ?"
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(report_from_row))
    }

    /// File a new report. Every call inserts exactly one row; duplicate
    /// coordinates are permitted.
    pub async fn create_report(
        &self,
        user_id: &str,
        lat: f64,
        lng: f64,
        county: &str,
    ) -> Result<Report, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO reports (id, user_id, lat, lng, county, status, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?)"
        )
        .bind(&id)
        .bind(user_id)
        .bind(lat)
        .bind(lng)
        .bind(county)
        .bind(ReportStatus::Pending.as_str())
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(Report {
            id,
            user_id: user_id.to_string(),
            lat,
            lng,
            county: county.to_string(),
            status: ReportStatus::Pending,
            created_at: now.clone(),
            updated_at: now,
        })
    }

    /// Mark a report completed. Re-completing is a harmless no-op on
    /// status but refreshes updated_at.
    pub async fn complete_report(&self, id: &str, user_id: &str) -> Result<Report, AppError> {
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            "UPDATE reports SET status = ?, updated_at = ? WHERE id = ? AND user_id = ?",
        )
        .bind(ReportStatus::Completed.as_str())
        .bind(&now)
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Report {} not found", id)));
        }

        self.get_report(id, user_id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("Report {} missing after update", id)))
    }

    /// Hard-delete a report, scoped to its owner.
    pub async fn delete_report(&self, id: &str, user_id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM reports WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Report {} not found", id)));
        }

        Ok(())
    }
}

// Helper functions for row conversion

fn pothole_from_row(row: &sqlx::sqlite::SqliteRow) -> Pothole {
    Pothole {
        id: row.get("id"),
        name: row.get("name"),
        latitude: row.get("latitude"),
        longitude: row.get("longitude"),
        upvote_count: row.get("upvote_count"),
        user_id: row.get("user_id"),
        created_at: row.get("created_at"),
    }
}

fn report_from_row(row: &sqlx::sqlite::SqliteRow) -> Report {
    let status_str: String = row.get("status");
    Report {
        id: row.get("id"),
        user_id: row.get("user_id"),
        lat: row.get("lat"),
        lng: row.get("lng"),
        county: row.get("county"),
        status: ReportStatus::from_str(&status_str).unwrap_or(ReportStatus::Pending),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}
