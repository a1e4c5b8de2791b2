//! Per-guild settings repository.

use chrono::Utc;
use migration::OnConflict;
use sea_orm::{ActiveValue, DatabaseConnection, DbErr, EntityTrait};

use crate::server::{
    model::settings::{GuildSettings, UpdateGuildSettingsParam},
    util::parse::to_db_i64,
};

pub struct GuildSettingsRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> GuildSettingsRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Stored settings of a guild.
    ///
    /// # Returns
    /// - `Ok(Some(GuildSettings))` - The guild stored its own settings
    /// - `Ok(None)` - The guild runs on the defaults
    /// - `Err(DbErr)` - Database error
    pub async fn get(&self, guild_id: u64) -> Result<Option<GuildSettings>, DbErr> {
        entity::prelude::GuildSettings::find_by_id(guild_id.to_string())
            .one(self.db)
            .await?
            .map(GuildSettings::from_entity)
            .transpose()
    }

    /// Creates or replaces the settings of a guild.
    pub async fn upsert(&self, param: UpdateGuildSettingsParam) -> Result<GuildSettings, DbErr> {
        let entity = entity::prelude::GuildSettings::insert(entity::guild_settings::ActiveModel {
            guild_id: ActiveValue::Set(param.guild_id.to_string()),
            daily_game_xp_cap: ActiveValue::Set(to_db_i64(param.daily_game_xp_cap)),
            base_daily_xp: ActiveValue::Set(to_db_i64(param.base_daily_xp)),
            streak_bonus_per_day: ActiveValue::Set(to_db_i64(param.streak_bonus_per_day)),
            announce_channel_id: ActiveValue::Set(
                param.announce_channel_id.map(|id| id.to_string()),
            ),
            updated_at: ActiveValue::Set(Utc::now()),
        })
        .on_conflict(
            OnConflict::column(entity::guild_settings::Column::GuildId)
                .update_columns([
                    entity::guild_settings::Column::DailyGameXpCap,
                    entity::guild_settings::Column::BaseDailyXp,
                    entity::guild_settings::Column::StreakBonusPerDay,
                    entity::guild_settings::Column::AnnounceChannelId,
                    entity::guild_settings::Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec_with_returning(self.db)
        .await?;

        GuildSettings::from_entity(entity)
    }
}
