//! Persisted gaming sessions.
//!
//! Each member has at most one running session per guild. Keeping them in the database lets
//! the elapsed time survive a bot restart.

use chrono::{DateTime, Utc};
use migration::OnConflict;
use sea_orm::{ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};

use crate::server::model::session::GameSession;

pub struct GameSessionRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> GameSessionRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Running session of a member, if any.
    pub async fn find(&self, guild_id: u64, user_id: u64) -> Result<Option<GameSession>, DbErr> {
        entity::prelude::GameSession::find_by_id((guild_id.to_string(), user_id.to_string()))
            .one(self.db)
            .await?
            .map(GameSession::from_entity)
            .transpose()
    }

    /// Stores the running session of a member, replacing any previous one.
    ///
    /// # Returns
    /// - `Ok(GameSession)` - The stored session
    /// - `Err(DbErr)` - Database error during upsert
    pub async fn upsert(
        &self,
        guild_id: u64,
        user_id: u64,
        game_name: &str,
        started_at: DateTime<Utc>,
    ) -> Result<GameSession, DbErr> {
        let entity = entity::prelude::GameSession::insert(entity::game_session::ActiveModel {
            guild_id: ActiveValue::Set(guild_id.to_string()),
            user_id: ActiveValue::Set(user_id.to_string()),
            game_name: ActiveValue::Set(game_name.to_string()),
            started_at: ActiveValue::Set(started_at),
        })
        .on_conflict(
            OnConflict::columns([
                entity::game_session::Column::GuildId,
                entity::game_session::Column::UserId,
            ])
            .update_columns([
                entity::game_session::Column::GameName,
                entity::game_session::Column::StartedAt,
            ])
            .to_owned(),
        )
        .exec_with_returning(self.db)
        .await?;

        GameSession::from_entity(entity)
    }

    /// Removes the running session of a member.
    ///
    /// # Returns
    /// - `Ok(true)` - A session was removed
    /// - `Ok(false)` - The member had no session
    /// - `Err(DbErr)` - Database error
    pub async fn delete(&self, guild_id: u64, user_id: u64) -> Result<bool, DbErr> {
        let result =
            entity::prelude::GameSession::delete_by_id((guild_id.to_string(), user_id.to_string()))
                .exec(self.db)
                .await?;

        Ok(result.rows_affected > 0)
    }

    /// Sessions that started before `cutoff`, across all guilds.
    pub async fn find_started_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<GameSession>, DbErr> {
        entity::prelude::GameSession::find()
            .filter(entity::game_session::Column::StartedAt.lt(cutoff))
            .all(self.db)
            .await?
            .into_iter()
            .map(GameSession::from_entity)
            .collect()
    }
}
