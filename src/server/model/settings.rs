//! Per-guild progression settings.
//!
//! Guilds can override the play-time XP cap and the daily bonus amounts. Everything else in
//! [`ProgressionRules`] is process-wide.

use chrono::{DateTime, Utc};
use sea_orm::DbErr;

use crate::{
    model::settings::{GuildSettingsDto, UpdateGuildSettingsDto},
    server::progression::rules::ProgressionRules,
};

/// Effective settings of one guild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildSettings {
    pub guild_id: u64,
    pub daily_game_xp_cap: u64,
    pub base_daily_xp: u64,
    pub streak_bonus_per_day: u64,
    /// Channel receiving announcements that are not tied to a command, such as play-time
    /// quests and unlocks.
    pub announce_channel_id: Option<u64>,
    /// `None` while the guild still runs on the process defaults.
    pub updated_at: Option<DateTime<Utc>>,
}

impl GuildSettings {
    /// Settings of a guild that never stored its own, taken from the process defaults.
    pub fn defaults(guild_id: u64, rules: &ProgressionRules) -> Self {
        Self {
            guild_id,
            daily_game_xp_cap: rules.daily_game_xp_cap,
            base_daily_xp: rules.base_daily_xp,
            streak_bonus_per_day: rules.streak_bonus_per_day,
            announce_channel_id: None,
            updated_at: None,
        }
    }

    /// Applies the guild's overrides on top of the process-wide rules.
    pub fn rules(&self, defaults: &ProgressionRules) -> ProgressionRules {
        ProgressionRules {
            daily_game_xp_cap: self.daily_game_xp_cap,
            base_daily_xp: self.base_daily_xp,
            streak_bonus_per_day: self.streak_bonus_per_day,
            ..defaults.clone()
        }
    }

    pub fn from_entity(entity: entity::guild_settings::Model) -> Result<Self, DbErr> {
        let guild_id = entity
            .guild_id
            .parse::<u64>()
            .map_err(|e| DbErr::Custom(format!("Failed to parse guild_id: {}", e)))?;
        let announce_channel_id = entity
            .announce_channel_id
            .map(|id| {
                id.parse::<u64>().map_err(|e| {
                    DbErr::Custom(format!("Failed to parse announce_channel_id: {}", e))
                })
            })
            .transpose()?;

        Ok(Self {
            guild_id,
            daily_game_xp_cap: entity.daily_game_xp_cap.max(0) as u64,
            base_daily_xp: entity.base_daily_xp.max(0) as u64,
            streak_bonus_per_day: entity.streak_bonus_per_day.max(0) as u64,
            announce_channel_id,
            updated_at: Some(entity.updated_at),
        })
    }

    pub fn into_dto(self) -> GuildSettingsDto {
        GuildSettingsDto {
            guild_id: self.guild_id,
            daily_game_xp_cap: self.daily_game_xp_cap,
            base_daily_xp: self.base_daily_xp,
            streak_bonus_per_day: self.streak_bonus_per_day,
            announce_channel_id: self.announce_channel_id,
            updated_at: self.updated_at,
        }
    }
}

/// Parameters for replacing a guild's settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateGuildSettingsParam {
    pub guild_id: u64,
    pub daily_game_xp_cap: u64,
    pub base_daily_xp: u64,
    pub streak_bonus_per_day: u64,
    pub announce_channel_id: Option<u64>,
}

impl UpdateGuildSettingsParam {
    pub fn from_dto(guild_id: u64, dto: UpdateGuildSettingsDto) -> Self {
        Self {
            guild_id,
            daily_game_xp_cap: dto.daily_game_xp_cap,
            base_daily_xp: dto.base_daily_xp,
            streak_bonus_per_day: dto.streak_bonus_per_day,
            announce_channel_id: dto.announce_channel_id,
        }
    }
}
