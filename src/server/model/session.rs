//! Persisted gaming session.

use chrono::{DateTime, Utc};
use sea_orm::DbErr;

use crate::server::progression::activity::ActiveSession;

/// A member's running "playing" session as stored in `game_session`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    pub guild_id: u64,
    pub user_id: u64,
    pub game_name: String,
    pub started_at: DateTime<Utc>,
}

impl GameSession {
    pub fn from_entity(entity: entity::game_session::Model) -> Result<Self, DbErr> {
        let guild_id = entity
            .guild_id
            .parse::<u64>()
            .map_err(|e| DbErr::Custom(format!("Failed to parse guild_id: {}", e)))?;
        let user_id = entity
            .user_id
            .parse::<u64>()
            .map_err(|e| DbErr::Custom(format!("Failed to parse user_id: {}", e)))?;

        Ok(Self {
            guild_id,
            user_id,
            game_name: entity.game_name,
            started_at: entity.started_at,
        })
    }

    /// State-machine view of the session.
    pub fn to_active(&self) -> ActiveSession {
        ActiveSession {
            game: self.game_name.clone(),
            started_at: self.started_at,
        }
    }
}
