//! User progress repository for database operations.
//!
//! A progress record spans four tables: the scalar `user_progress` row and its `game_time`,
//! `completed_quest` and `unlocked_game` children. This repository loads and stores them as one
//! [`UserProgress`] domain model.
//!
//! Saves are optimistic: the scalar row is only written when its `version` still matches the
//! version the record was loaded with. A mismatch means another writer saved in between and is
//! reported as [`SaveOutcome::Conflict`] instead of overwriting that write.

use chrono::{DateTime, Utc};
use migration::OnConflict;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection,
    DatabaseTransaction, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    TransactionTrait,
};
use std::collections::HashSet;

use crate::server::{
    model::progress::{LeaderboardEntry, UserProgress},
    util::parse::to_db_i64,
};

/// Result of a conditional save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The record was written and its version bumped.
    Saved,
    /// The stored version no longer matches; nothing was written.
    Conflict,
}

pub struct UserProgressRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserProgressRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Loads the progress record of a member, creating an empty one on first use.
    ///
    /// Two concurrent first interactions may both try to insert; the loser of that race
    /// re-reads the winner's row.
    ///
    /// # Arguments
    /// - `guild_id` - Discord guild ID
    /// - `user_id` - Discord user ID
    /// - `now` - Start of the game XP window of a newly created record
    ///
    /// # Returns
    /// - `Ok(UserProgress)` - Existing or newly created record
    /// - `Err(DbErr)` - Database error
    pub async fn get_or_create(
        &self,
        guild_id: u64,
        user_id: u64,
        now: DateTime<Utc>,
    ) -> Result<UserProgress, DbErr> {
        if let Some(progress) = self.find(guild_id, user_id).await? {
            return Ok(progress);
        }

        let inserted = entity::user_progress::ActiveModel {
            guild_id: ActiveValue::Set(guild_id.to_string()),
            user_id: ActiveValue::Set(user_id.to_string()),
            xp: ActiveValue::Set(0),
            streak: ActiveValue::Set(0),
            last_daily_claim: ActiveValue::Set(None),
            daily_game_xp: ActiveValue::Set(0),
            last_game_xp_reset: ActiveValue::Set(now),
            total_games: ActiveValue::Set(0),
            total_correct: ActiveValue::Set(0),
            version: ActiveValue::Set(0),
            created_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await;

        match inserted {
            Ok(model) => UserProgress::from_entities(model, Vec::new(), Vec::new(), Vec::new()),
            Err(err) => {
                tracing::debug!(
                    "Insert of progress for user {} in guild {} failed, re-reading: {}",
                    user_id,
                    guild_id,
                    err
                );
                self.find(guild_id, user_id).await?.ok_or(err)
            }
        }
    }

    /// Loads the progress record of a member with all child rows.
    ///
    /// # Returns
    /// - `Ok(Some(UserProgress))` - Record found
    /// - `Ok(None)` - Member never earned anything in this guild
    /// - `Err(DbErr)` - Database error
    pub async fn find(&self, guild_id: u64, user_id: u64) -> Result<Option<UserProgress>, DbErr> {
        let Some(model) = entity::prelude::UserProgress::find()
            .filter(entity::user_progress::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::user_progress::Column::UserId.eq(user_id.to_string()))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let game_times = entity::prelude::GameTime::find()
            .filter(entity::game_time::Column::ProgressId.eq(model.id))
            .all(self.db)
            .await?;
        let completed_quests = entity::prelude::CompletedQuest::find()
            .filter(entity::completed_quest::Column::ProgressId.eq(model.id))
            .all(self.db)
            .await?;
        let unlocked_games = entity::prelude::UnlockedGame::find()
            .filter(entity::unlocked_game::Column::ProgressId.eq(model.id))
            .all(self.db)
            .await?;

        UserProgress::from_entities(model, game_times, completed_quests, unlocked_games).map(Some)
    }

    /// Writes a progress record if nobody else saved it since it was loaded.
    ///
    /// Runs in one transaction. The scalar row is updated conditionally on `version`; on
    /// success the game times are upserted and completed quests and unlocked games missing
    /// from the database are inserted. Child rows are never deleted.
    ///
    /// On `Saved` the caller's `progress.version` is advanced to the stored version.
    ///
    /// # Returns
    /// - `Ok(SaveOutcome::Saved)` - Record written
    /// - `Ok(SaveOutcome::Conflict)` - Stale version, nothing written
    /// - `Err(DbErr)` - Database error
    pub async fn save(&self, progress: &mut UserProgress) -> Result<SaveOutcome, DbErr> {
        let txn = self.db.begin().await?;

        let updated = entity::prelude::UserProgress::update_many()
            .col_expr(
                entity::user_progress::Column::Xp,
                Expr::value(to_db_i64(progress.xp)),
            )
            .col_expr(
                entity::user_progress::Column::Streak,
                Expr::value(i32::try_from(progress.streak).unwrap_or(i32::MAX)),
            )
            .col_expr(
                entity::user_progress::Column::LastDailyClaim,
                Expr::value(progress.last_daily_claim),
            )
            .col_expr(
                entity::user_progress::Column::DailyGameXp,
                Expr::value(to_db_i64(progress.daily_game_xp)),
            )
            .col_expr(
                entity::user_progress::Column::LastGameXpReset,
                Expr::value(progress.last_game_xp_reset),
            )
            .col_expr(
                entity::user_progress::Column::TotalGames,
                Expr::value(to_db_i64(progress.total_games)),
            )
            .col_expr(
                entity::user_progress::Column::TotalCorrect,
                Expr::value(to_db_i64(progress.total_correct)),
            )
            .col_expr(
                entity::user_progress::Column::Version,
                Expr::value(progress.version + 1),
            )
            .filter(entity::user_progress::Column::Id.eq(progress.id))
            .filter(entity::user_progress::Column::Version.eq(progress.version))
            .exec(&txn)
            .await?;

        if updated.rows_affected == 0 {
            txn.rollback().await?;
            return Ok(SaveOutcome::Conflict);
        }

        Self::save_children(&txn, progress).await?;
        txn.commit().await?;

        progress.version += 1;
        Ok(SaveOutcome::Saved)
    }

    async fn save_children(txn: &DatabaseTransaction, progress: &UserProgress) -> Result<(), DbErr> {
        for (game, minutes) in &progress.game_times {
            entity::prelude::GameTime::insert(entity::game_time::ActiveModel {
                progress_id: ActiveValue::Set(progress.id),
                game_name: ActiveValue::Set(game.clone()),
                minutes: ActiveValue::Set(to_db_i64(*minutes)),
            })
            .on_conflict(
                OnConflict::columns([
                    entity::game_time::Column::ProgressId,
                    entity::game_time::Column::GameName,
                ])
                .update_column(entity::game_time::Column::Minutes)
                .to_owned(),
            )
            .exec_without_returning(txn)
            .await?;
        }

        let stored_quests: HashSet<(String, i32)> = entity::prelude::CompletedQuest::find()
            .filter(entity::completed_quest::Column::ProgressId.eq(progress.id))
            .all(txn)
            .await?
            .into_iter()
            .map(|q| (q.game_name, q.quest_index))
            .collect();

        let now = Utc::now();
        for (game, indices) in &progress.completed_quests {
            for &index in indices {
                let index = i32::try_from(index).unwrap_or(i32::MAX);
                if stored_quests.contains(&(game.clone(), index)) {
                    continue;
                }
                entity::completed_quest::ActiveModel {
                    progress_id: ActiveValue::Set(progress.id),
                    game_name: ActiveValue::Set(game.clone()),
                    quest_index: ActiveValue::Set(index),
                    completed_at: ActiveValue::Set(now),
                }
                .insert(txn)
                .await?;
            }
        }

        let stored_unlocks: HashSet<String> = entity::prelude::UnlockedGame::find()
            .filter(entity::unlocked_game::Column::ProgressId.eq(progress.id))
            .all(txn)
            .await?
            .into_iter()
            .map(|u| u.game_name)
            .collect();

        for game in progress
            .unlocked_games
            .iter()
            .filter(|game| !stored_unlocks.contains(*game))
        {
            entity::unlocked_game::ActiveModel {
                progress_id: ActiveValue::Set(progress.id),
                game_name: ActiveValue::Set(game.clone()),
                unlocked_at: ActiveValue::Set(now),
            }
            .insert(txn)
            .await?;
        }

        Ok(())
    }

    /// Top members of a guild by XP.
    ///
    /// Ties are broken by record creation order.
    ///
    /// # Arguments
    /// - `guild_id` - Discord guild ID
    /// - `limit` - Maximum number of entries
    ///
    /// # Returns
    /// - `Ok(Vec<LeaderboardEntry>)` - Entries ranked from 1
    /// - `Err(DbErr)` - Database error or unparsable stored id
    pub async fn leaderboard(
        &self,
        guild_id: u64,
        limit: u64,
    ) -> Result<Vec<LeaderboardEntry>, DbErr> {
        let rows = entity::prelude::UserProgress::find()
            .filter(entity::user_progress::Column::GuildId.eq(guild_id.to_string()))
            .order_by_desc(entity::user_progress::Column::Xp)
            .order_by_asc(entity::user_progress::Column::Id)
            .limit(limit)
            .all(self.db)
            .await?;

        rows.into_iter()
            .enumerate()
            .map(|(index, row)| {
                let user_id = row
                    .user_id
                    .parse::<u64>()
                    .map_err(|e| DbErr::Custom(format!("Failed to parse user_id: {}", e)))?;
                Ok(LeaderboardEntry {
                    rank: index as u32 + 1,
                    user_id,
                    xp: row.xp.max(0) as u64,
                })
            })
            .collect()
    }
}
