use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LeaderboardEntry {
    pub user_id: Uuid,
    pub total_points: i32,
    pub level: i32,
    pub badges: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RankedEntry {
    /// 1-based position.
    pub rank: usize,
    #[serde(flatten)]
    pub entry: LeaderboardEntry,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "status", content = "position", rename_all = "lowercase")]
pub enum Rank {
    Ranked(usize),
    Unranked,
}

/// Orders entries by points, highest first. Equal points fall back to
/// ascending `user_id` so the result never depends on input order.
pub fn rank_entries(mut entries: Vec<LeaderboardEntry>) -> Vec<RankedEntry> {
    entries.sort_by(|a, b| {
        b.total_points
            .cmp(&a.total_points)
            .then_with(|| a.user_id.cmp(&b.user_id))
    });

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| RankedEntry {
            rank: index + 1,
            entry,
        })
        .collect()
}

pub fn rank_of(ranked: &[RankedEntry], user_id: Uuid) -> Rank {
    ranked
        .iter()
        .find(|r| r.entry.user_id == user_id)
        .map(|r| Rank::Ranked(r.rank))
        .unwrap_or(Rank::Unranked)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(user_id: Uuid, total_points: i32) -> LeaderboardEntry {
        LeaderboardEntry {
            user_id,
            total_points,
            level: 1 + total_points / 100,
            badges: vec![],
        }
    }

    fn ids() -> (Uuid, Uuid, Uuid) {
        (
            Uuid::from_u128(1),
            Uuid::from_u128(2),
            Uuid::from_u128(3),
        )
    }

    #[test]
    fn test_sorted_by_points_descending() {
        let (a, b, c) = ids();
        let ranked = rank_entries(vec![entry(b, 80), entry(a, 120), entry(c, 100)]);

        let order: Vec<Uuid> = ranked.iter().map(|r| r.entry.user_id).collect();
        assert_eq!(order, vec![a, c, b]);
        assert_eq!(
            ranked.iter().map(|r| r.rank).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn test_ties_break_by_user_id_regardless_of_input_order() {
        let (a, b, c) = ids();
        let forward = rank_entries(vec![entry(a, 100), entry(b, 80), entry(c, 100)]);
        let reversed = rank_entries(vec![entry(c, 100), entry(b, 80), entry(a, 100)]);

        assert_eq!(forward, reversed);
        assert_eq!(forward[0].entry.user_id, a);
        assert_eq!(forward[1].entry.user_id, c);
        assert_eq!(forward[2].entry.user_id, b);
    }

    #[test]
    fn test_rank_of_present_user() {
        let (a, b, c) = ids();
        let ranked = rank_entries(vec![entry(a, 100), entry(b, 80), entry(c, 100)]);

        assert_eq!(rank_of(&ranked, a), Rank::Ranked(1));
        assert_eq!(rank_of(&ranked, c), Rank::Ranked(2));
        assert_eq!(rank_of(&ranked, b), Rank::Ranked(3));
    }

    #[test]
    fn test_rank_of_missing_user_is_unranked() {
        let (a, b, _) = ids();
        let ranked = rank_entries(vec![entry(a, 10)]);

        assert_eq!(rank_of(&ranked, b), Rank::Unranked);
        assert_eq!(rank_of(&[], a), Rank::Unranked);
    }

    #[test]
    fn test_rank_serialization() {
        assert_eq!(
            serde_json::to_value(Rank::Ranked(4)).unwrap(),
            serde_json::json!({"status": "ranked", "position": 4})
        );
        assert_eq!(
            serde_json::to_value(Rank::Unranked).unwrap(),
            serde_json::json!({"status": "unranked"})
        );
    }
}
