//! User progress factory for creating test progress records.
//!
//! Inserts a `user_progress` row and, when requested, its `game_time`, `completed_quest` and
//! `unlocked_game` child rows.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test progress records with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::user_progress::UserProgressFactory;
///
/// let progress = UserProgressFactory::new(&db)
///     .user_id("123456789")
///     .xp(450)
///     .completed_quest("Minecraft", 0)
///     .build()
///     .await?;
/// ```
pub struct UserProgressFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: String,
    user_id: String,
    xp: i64,
    streak: i32,
    last_daily_claim: Option<DateTime<Utc>>,
    daily_game_xp: i64,
    last_game_xp_reset: DateTime<Utc>,
    game_times: Vec<(String, i64)>,
    completed_quests: Vec<(String, i32)>,
    unlocked_games: Vec<String>,
}

impl<'a> UserProgressFactory<'a> {
    /// Creates a new UserProgressFactory with default values.
    ///
    /// Defaults:
    /// - guild_id: `"1"`
    /// - user_id: auto-incremented unique id
    /// - all counters zero, no daily claim, game XP window reset now
    ///
    /// # Arguments
    /// - `db` - Database connection for inserting the entity
    ///
    /// # Returns
    /// - `UserProgressFactory` - New factory instance with defaults
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            guild_id: "1".to_string(),
            user_id: next_id().to_string(),
            xp: 0,
            streak: 0,
            last_daily_claim: None,
            daily_game_xp: 0,
            last_game_xp_reset: Utc::now(),
            game_times: Vec::new(),
            completed_quests: Vec::new(),
            unlocked_games: Vec::new(),
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

    pub fn xp(mut self, xp: i64) -> Self {
        self.xp = xp;
        self
    }

    /// Sets the streak together with the time of the last daily claim.
    pub fn streak(mut self, streak: i32, last_daily_claim: DateTime<Utc>) -> Self {
        self.streak = streak;
        self.last_daily_claim = Some(last_daily_claim);
        self
    }

    /// Sets the rolling game XP window counter and when it was last reset.
    pub fn daily_game_xp(mut self, daily_game_xp: i64, last_reset: DateTime<Utc>) -> Self {
        self.daily_game_xp = daily_game_xp;
        self.last_game_xp_reset = last_reset;
        self
    }

    pub fn game_time(mut self, game_name: impl Into<String>, minutes: i64) -> Self {
        self.game_times.push((game_name.into(), minutes));
        self
    }

    pub fn completed_quest(mut self, game_name: impl Into<String>, quest_index: i32) -> Self {
        self.completed_quests.push((game_name.into(), quest_index));
        self
    }

    pub fn unlocked_game(mut self, game_name: impl Into<String>) -> Self {
        self.unlocked_games.push(game_name.into());
        self
    }

    /// Builds and inserts the progress record and its child rows.
    ///
    /// # Returns
    /// - `Ok(entity::user_progress::Model)` - Created progress entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::user_progress::Model, DbErr> {
        let now = Utc::now();
        let progress = entity::user_progress::ActiveModel {
            guild_id: ActiveValue::Set(self.guild_id),
            user_id: ActiveValue::Set(self.user_id),
            xp: ActiveValue::Set(self.xp),
            streak: ActiveValue::Set(self.streak),
            last_daily_claim: ActiveValue::Set(self.last_daily_claim),
            daily_game_xp: ActiveValue::Set(self.daily_game_xp),
            last_game_xp_reset: ActiveValue::Set(self.last_game_xp_reset),
            total_games: ActiveValue::Set(0),
            total_correct: ActiveValue::Set(0),
            version: ActiveValue::Set(0),
            created_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        for (game_name, minutes) in self.game_times {
            entity::game_time::ActiveModel {
                progress_id: ActiveValue::Set(progress.id),
                game_name: ActiveValue::Set(game_name),
                minutes: ActiveValue::Set(minutes),
            }
            .insert(self.db)
            .await?;
        }

        for (game_name, quest_index) in self.completed_quests {
            entity::completed_quest::ActiveModel {
                progress_id: ActiveValue::Set(progress.id),
                game_name: ActiveValue::Set(game_name),
                quest_index: ActiveValue::Set(quest_index),
                completed_at: ActiveValue::Set(now),
            }
            .insert(self.db)
            .await?;
        }

        for game_name in self.unlocked_games {
            entity::unlocked_game::ActiveModel {
                progress_id: ActiveValue::Set(progress.id),
                game_name: ActiveValue::Set(game_name),
                unlocked_at: ActiveValue::Set(now),
            }
            .insert(self.db)
            .await?;
        }

        Ok(progress)
    }
}

/// Creates a progress record with default values.
///
/// Shorthand for `UserProgressFactory::new(db).build().await`.
pub async fn create_progress(
    db: &DatabaseConnection,
) -> Result<entity::user_progress::Model, DbErr> {
    UserProgressFactory::new(db).build().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TestBuilder;
    use sea_orm::{EntityTrait, ModelTrait};

    #[tokio::test]
    async fn creates_progress_with_defaults() -> Result<(), DbErr> {
        let test = TestBuilder::new()
            .with_progress_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let progress = create_progress(db).await?;

        assert_eq!(progress.guild_id, "1");
        assert!(!progress.user_id.is_empty());
        assert_eq!(progress.xp, 0);
        assert_eq!(progress.version, 0);
        assert!(progress.last_daily_claim.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn creates_progress_with_child_rows() -> Result<(), DbErr> {
        let test = TestBuilder::new()
            .with_progress_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let progress = UserProgressFactory::new(db)
            .xp(300)
            .game_time("Minecraft", 75)
            .completed_quest("Minecraft", 0)
            .unlocked_game("Terraria")
            .build()
            .await?;

        let stored = entity::prelude::UserProgress::find_by_id(progress.id)
            .one(db)
            .await?
            .unwrap();
        let times = stored
            .find_related(entity::prelude::GameTime)
            .all(db)
            .await?;
        let quests = stored
            .find_related(entity::prelude::CompletedQuest)
            .all(db)
            .await?;
        let unlocks = stored
            .find_related(entity::prelude::UnlockedGame)
            .all(db)
            .await?;

        assert_eq!(stored.xp, 300);
        assert_eq!(times.len(), 1);
        assert_eq!(times[0].minutes, 75);
        assert_eq!(quests.len(), 1);
        assert_eq!(unlocks[0].game_name, "Terraria");

        Ok(())
    }

    #[tokio::test]
    async fn creates_multiple_unique_users() -> Result<(), DbErr> {
        let test = TestBuilder::new()
            .with_progress_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let first = create_progress(db).await?;
        let second = create_progress(db).await?;

        assert_ne!(first.user_id, second.user_id);
        assert_ne!(first.id, second.id);

        Ok(())
    }
}
