use std::collections::HashMap;

use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use tuitionhub_core::AppError;
use tuitionhub_models::leaderboard::{
    AwardPointsDto, LeaderboardEntryView, LeaderboardResponse, LeaderboardRow, UserPoints,
    level_for,
};
use tuitionhub_performance::{rank_entries, rank_of};

use crate::metrics::track_points_awarded;

pub struct LeaderboardService;

impl LeaderboardService {
    /// The top `limit` entries plus the caller's rank over the full board.
    #[instrument(skip(db))]
    pub async fn get_leaderboard(
        db: &PgPool,
        caller: Uuid,
        limit: i64,
    ) -> Result<LeaderboardResponse, AppError> {
        let rows = sqlx::query_as::<_, LeaderboardRow>(
            r#"SELECT p.user_id, u.full_name, u.avatar_url, c.name AS class_name,
                      p.total_points, p.level, p.badges
               FROM user_points p
               JOIN users u ON u.id = p.user_id
               LEFT JOIN classes c ON c.id = u.class_id"#,
        )
        .fetch_all(db)
        .await?;

        let ranked = rank_entries(rows.iter().map(LeaderboardRow::entry).collect());
        let my_rank = rank_of(&ranked, caller);

        let by_user: HashMap<Uuid, &LeaderboardRow> =
            rows.iter().map(|row| (row.user_id, row)).collect();
        let entries = ranked
            .into_iter()
            .take(limit.max(0) as usize)
            .filter_map(|r| {
                let row = *by_user.get(&r.entry.user_id)?;
                Some(LeaderboardEntryView::new(r, row))
            })
            .collect();

        Ok(LeaderboardResponse { entries, my_rank })
    }

    /// Adds points, recomputes the level and appends `badge` if new.
    #[instrument(skip(db))]
    pub async fn award_points(
        db: &PgPool,
        user_id: Uuid,
        dto: AwardPointsDto,
    ) -> Result<UserPoints, AppError> {
        let is_student = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE id = $1 AND role = 'student')",
        )
        .bind(user_id)
        .fetch_one(db)
        .await?;
        if !is_student {
            return Err(AppError::not_found(anyhow::anyhow!("Student not found")));
        }

        let mut tx = db.begin().await?;

        sqlx::query("INSERT INTO user_points (user_id) VALUES ($1) ON CONFLICT (user_id) DO NOTHING")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        let (total_points, badges) = sqlx::query_as::<_, (i32, Vec<String>)>(
            "SELECT total_points, badges FROM user_points WHERE user_id = $1 FOR UPDATE",
        )
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        let award = apply_award(total_points, badges, dto.points, dto.badge.as_deref())?;

        let points = sqlx::query_as::<_, UserPoints>(
            r#"UPDATE user_points
               SET total_points = $2, level = $3, badges = $4, updated_at = NOW()
               WHERE user_id = $1
               RETURNING user_id, total_points, level, badges, updated_at"#,
        )
        .bind(user_id)
        .bind(award.total_points)
        .bind(award.level)
        .bind(&award.badges)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        track_points_awarded(dto.points, award.badge_added);
        Ok(points)
    }
}

#[derive(Debug, PartialEq)]
pub(crate) struct Award {
    pub total_points: i32,
    pub level: i32,
    pub badges: Vec<String>,
    pub badge_added: bool,
}

pub(crate) fn apply_award(
    total_points: i32,
    mut badges: Vec<String>,
    points: i32,
    badge: Option<&str>,
) -> Result<Award, AppError> {
    let total_points = total_points
        .checked_add(points)
        .ok_or_else(|| AppError::bad_request(anyhow::anyhow!("Point total would overflow")))?;

    let badge_added = match badge.map(str::trim).filter(|b| !b.is_empty()) {
        Some(badge) if !badges.iter().any(|b| b == badge) => {
            badges.push(badge.to_string());
            true
        }
        _ => false,
    };

    Ok(Award {
        total_points,
        level: level_for(total_points),
        badges,
        badge_added,
    })
}
