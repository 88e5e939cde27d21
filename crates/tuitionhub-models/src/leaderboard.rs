use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use tuitionhub_core::serde::deserialize_optional_i64;
use tuitionhub_performance::{LeaderboardEntry, Rank, RankedEntry};

pub const DEFAULT_LEADERBOARD_LIMIT: i64 = 50;
pub const MAX_LEADERBOARD_LIMIT: i64 = 100;
pub const POINTS_PER_LEVEL: i32 = 100;

/// Level reached with `total_points`, starting at 1.
pub fn level_for(total_points: i32) -> i32 {
    1 + total_points.max(0) / POINTS_PER_LEVEL
}

#[derive(Debug, Clone, FromRow)]
pub struct LeaderboardRow {
    pub user_id: Uuid,
    pub full_name: String,
    pub avatar_url: Option<String>,
    pub class_name: Option<String>,
    pub total_points: i32,
    pub level: i32,
    pub badges: Vec<String>,
}

impl LeaderboardRow {
    pub fn entry(&self) -> LeaderboardEntry {
        LeaderboardEntry {
            user_id: self.user_id,
            total_points: self.total_points,
            level: self.level,
            badges: self.badges.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LeaderboardEntryView {
    pub rank: usize,
    pub user_id: Uuid,
    pub full_name: String,
    pub avatar_url: Option<String>,
    pub class_name: Option<String>,
    pub total_points: i32,
    pub level: i32,
    pub badges: Vec<String>,
}

impl LeaderboardEntryView {
    pub fn new(ranked: RankedEntry, row: &LeaderboardRow) -> Self {
        Self {
            rank: ranked.rank,
            user_id: ranked.entry.user_id,
            full_name: row.full_name.clone(),
            avatar_url: row.avatar_url.clone(),
            class_name: row.class_name.clone(),
            total_points: ranked.entry.total_points,
            level: ranked.entry.level,
            badges: ranked.entry.badges,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LeaderboardResponse {
    pub entries: Vec<LeaderboardEntryView>,
    /// The caller's position, or `unranked` when they have no points row
    pub my_rank: Rank,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LeaderboardParams {
    /// Number of entries (1-100, default: 50)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub limit: Option<i64>,
}

impl LeaderboardParams {
    pub fn limit(&self) -> i64 {
        self.limit
            .unwrap_or(DEFAULT_LEADERBOARD_LIMIT)
            .clamp(1, MAX_LEADERBOARD_LIMIT)
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AwardPointsDto {
    #[validate(range(min = 1, max = 10000, message = "Points must be between 1 and 10000"))]
    pub points: i32,
    #[validate(length(min = 1, max = 50, message = "Badge must be 1-50 characters"))]
    pub badge: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct UserPoints {
    pub user_id: Uuid,
    pub total_points: i32,
    pub level: i32,
    pub badges: Vec<String>,
    pub updated_at: DateTime<Utc>,
}
