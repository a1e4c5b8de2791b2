use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct UserProgressDto {
    #[serde(with = "crate::model::id_string")]
    #[schema(value_type = String)]
    pub guild_id: u64,
    #[serde(with = "crate::model::id_string")]
    #[schema(value_type = String)]
    pub user_id: u64,
    pub xp: u64,
    pub level: u32,
    pub xp_to_next_level: u64,
    pub streak: u32,
    pub last_daily_claim: Option<DateTime<Utc>>,
    pub daily_game_xp: u64,
    pub unlocked_games: Vec<String>,
    pub completed_quests: BTreeMap<String, Vec<usize>>,
    pub game_times: BTreeMap<String, u64>,
    pub total_games: u64,
    pub total_correct: u64,
    /// Percentage of correct quiz answers.
    pub accuracy: f64,
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, ToSchema)]
pub struct LeaderboardEntryDto {
    pub rank: u32,
    #[serde(with = "crate::model::id_string")]
    #[schema(value_type = String)]
    pub user_id: u64,
    pub level: u32,
    pub xp: u64,
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, ToSchema)]
pub struct GrantXpDto {
    /// XP to add. Negative values are rejected.
    pub amount: i64,
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, ToSchema)]
pub struct GrantXpResultDto {
    pub xp: u64,
    pub level: u32,
    pub leveled_up: bool,
}
