use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, ToSchema)]
pub struct GuildSettingsDto {
    #[serde(with = "crate::model::id_string")]
    #[schema(value_type = String)]
    pub guild_id: u64,
    pub daily_game_xp_cap: u64,
    pub base_daily_xp: u64,
    pub streak_bonus_per_day: u64,
    #[serde(with = "crate::model::opt_id_string", default)]
    #[schema(value_type = Option<String>)]
    pub announce_channel_id: Option<u64>,
    /// Absent while the guild uses the defaults.
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, ToSchema)]
pub struct UpdateGuildSettingsDto {
    pub daily_game_xp_cap: u64,
    pub base_daily_xp: u64,
    pub streak_bonus_per_day: u64,
    #[serde(with = "crate::model::opt_id_string", default)]
    #[schema(value_type = Option<String>)]
    pub announce_channel_id: Option<u64>,
}
