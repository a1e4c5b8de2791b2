//! Game session factory for creating persisted "playing" sessions.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test game sessions.
///
/// # Example
///
/// ```rust,ignore
/// let session = GameSessionFactory::new(&db, "Minecraft")
///     .started_at(Utc::now() - Duration::minutes(45))
///     .build()
///     .await?;
/// ```
pub struct GameSessionFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: String,
    user_id: String,
    game_name: String,
    started_at: DateTime<Utc>,
}

impl<'a> GameSessionFactory<'a> {
    /// Creates a new factory for a session of `game_name` started now in guild `"1"`.
    pub fn new(db: &'a DatabaseConnection, game_name: impl Into<String>) -> Self {
        Self {
            db,
            guild_id: "1".to_string(),
            user_id: next_id().to_string(),
            game_name: game_name.into(),
            started_at: Utc::now(),
        }
    }

    pub fn guild_id(mut self, guild_id: impl Into<String>) -> Self {
        self.guild_id = guild_id.into();
        self
    }

    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    pub fn started_at(mut self, started_at: DateTime<Utc>) -> Self {
        self.started_at = started_at;
        self
    }

    /// Builds and inserts the session.
    ///
    /// # Returns
    /// - `Ok(entity::game_session::Model)` - Created session entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::game_session::Model, DbErr> {
        entity::game_session::ActiveModel {
            guild_id: ActiveValue::Set(self.guild_id),
            user_id: ActiveValue::Set(self.user_id),
            game_name: ActiveValue::Set(self.game_name),
            started_at: ActiveValue::Set(self.started_at),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a session for `game_name` started now with a fresh user id.
pub async fn create_game_session(
    db: &DatabaseConnection,
    game_name: &str,
) -> Result<entity::game_session::Model, DbErr> {
    GameSessionFactory::new(db, game_name).build().await
}
