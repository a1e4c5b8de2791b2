//! Guild settings factory.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating per-guild progression settings.
pub struct GuildSettingsFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: String,
    daily_game_xp_cap: i64,
    base_daily_xp: i64,
    streak_bonus_per_day: i64,
    announce_channel_id: Option<String>,
}

impl<'a> GuildSettingsFactory<'a> {
    /// Creates a new factory with the stock progression values (cap 200, daily 50, streak 10).
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            guild_id: next_id().to_string(),
            daily_game_xp_cap: 200,
            base_daily_xp: 50,
            streak_bonus_per_day: 10,
            announce_channel_id: None,
        }
    }

    pub fn guild_id(mut self, guild_id: impl Into<String>) -> Self {
        self.guild_id = guild_id.into();
        self
    }

    pub fn daily_game_xp_cap(mut self, cap: i64) -> Self {
        self.daily_game_xp_cap = cap;
        self
    }

    pub fn base_daily_xp(mut self, xp: i64) -> Self {
        self.base_daily_xp = xp;
        self
    }

    pub fn streak_bonus_per_day(mut self, xp: i64) -> Self {
        self.streak_bonus_per_day = xp;
        self
    }

    pub fn announce_channel_id(mut self, channel_id: impl Into<String>) -> Self {
        self.announce_channel_id = Some(channel_id.into());
        self
    }

    /// Builds and inserts the settings row.
    pub async fn build(self) -> Result<entity::guild_settings::Model, DbErr> {
        entity::guild_settings::ActiveModel {
            guild_id: ActiveValue::Set(self.guild_id),
            daily_game_xp_cap: ActiveValue::Set(self.daily_game_xp_cap),
            base_daily_xp: ActiveValue::Set(self.base_daily_xp),
            streak_bonus_per_day: ActiveValue::Set(self.streak_bonus_per_day),
            announce_channel_id: ActiveValue::Set(self.announce_channel_id),
            updated_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await
    }
}

/// Creates settings with stock values for a fresh guild id.
pub async fn create_guild_settings(
    db: &DatabaseConnection,
) -> Result<entity::guild_settings::Model, DbErr> {
    GuildSettingsFactory::new(db).build().await
}
