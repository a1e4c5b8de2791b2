use sea_orm::DatabaseConnection;

use crate::server::{
    data::guild_settings::GuildSettingsRepository,
    error::AppError,
    model::settings::{GuildSettings, UpdateGuildSettingsParam},
    progression::rules::ProgressionRules,
};

/// Upper bound of every XP amount a guild may configure.
pub const MAX_SETTING_XP: u64 = 1_000_000;

pub struct GuildSettingsService<'a> {
    db: &'a DatabaseConnection,
    defaults: &'a ProgressionRules,
}

impl<'a> GuildSettingsService<'a> {
    pub fn new(db: &'a DatabaseConnection, defaults: &'a ProgressionRules) -> Self {
        Self { db, defaults }
    }

    /// Effective settings of a guild, falling back to the process defaults.
    pub async fn get(&self, guild_id: u64) -> Result<GuildSettings, AppError> {
        let stored = GuildSettingsRepository::new(self.db).get(guild_id).await?;

        Ok(stored.unwrap_or_else(|| GuildSettings::defaults(guild_id, self.defaults)))
    }

    /// Progression rules in force for a guild.
    pub async fn rules(&self, guild_id: u64) -> Result<ProgressionRules, AppError> {
        Ok(self.get(guild_id).await?.rules(self.defaults))
    }

    /// Replaces the settings of a guild.
    ///
    /// # Returns
    /// - `Ok(GuildSettings)` - Stored settings
    /// - `Err(AppError::BadRequest)` - A zero daily game XP cap, or an amount above
    ///   [`MAX_SETTING_XP`]
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn update(&self, param: UpdateGuildSettingsParam) -> Result<GuildSettings, AppError> {
        if param.daily_game_xp_cap == 0 {
            return Err(AppError::BadRequest(
                "daily_game_xp_cap must be greater than zero".to_string(),
            ));
        }

        for (name, value) in [
            ("daily_game_xp_cap", param.daily_game_xp_cap),
            ("base_daily_xp", param.base_daily_xp),
            ("streak_bonus_per_day", param.streak_bonus_per_day),
        ] {
            if value > MAX_SETTING_XP {
                return Err(AppError::BadRequest(format!(
                    "{} must not exceed {}, got {}",
                    name, MAX_SETTING_XP, value
                )));
            }
        }

        let settings = GuildSettingsRepository::new(self.db).upsert(param).await?;
        tracing::info!("Updated progression settings of guild {}", settings.guild_id);

        Ok(settings)
    }
}
