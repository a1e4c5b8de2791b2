//! Progress service.
//!
//! Wraps every progression operation in the same cycle: take the member's lock, load the
//! record, run the engine, save with a version check. A version conflict means a writer outside
//! this process saved in between; the cycle is then repeated on a fresh copy, a bounded number
//! of times.

use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;

use crate::server::{
    data::user_progress::{SaveOutcome, UserProgressRepository},
    error::{progress::ProgressError, AppError},
    model::progress::{LeaderboardEntry, UserProgress},
    progression::{
        catalog::{Difficulty, GameCatalog},
        daily::DailyBonus,
        event::{ProgressEvent, XpSource},
        rules::ProgressionRules,
        Progression,
    },
    service::{guild_settings::GuildSettingsService, lock::UserLocks},
};

/// Attempts of one update before giving up on version conflicts.
const MAX_SAVE_ATTEMPTS: usize = 3;

/// Largest leaderboard page.
pub const MAX_LEADERBOARD_LIMIT: u64 = 100;

/// Outcome of a saved update.
#[derive(Debug, Clone)]
pub struct ProgressUpdate<T> {
    /// Value returned by the engine operation.
    pub value: T,
    /// The record as saved.
    pub progress: UserProgress,
    /// Events emitted by the engine, in order.
    pub events: Vec<ProgressEvent>,
}

pub struct ProgressService<'a> {
    db: &'a DatabaseConnection,
    catalog: &'a GameCatalog,
    locks: &'a UserLocks,
    settings: GuildSettingsService<'a>,
}

impl<'a> ProgressService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        catalog: &'a GameCatalog,
        locks: &'a UserLocks,
        defaults: &'a ProgressionRules,
    ) -> Self {
        Self {
            db,
            catalog,
            locks,
            settings: GuildSettingsService::new(db, defaults),
        }
    }

    /// Runs `operation` on a member's record under the member's lock and saves the result.
    ///
    /// `operation` may run more than once when the save hits a version conflict; each run gets
    /// a freshly loaded record and an empty event list. When it returns an error nothing is
    /// saved.
    ///
    /// # Returns
    /// - `Ok(ProgressUpdate)` - Operation applied and saved
    /// - `Err(AppError::Conflict)` - Every attempt lost against a concurrent writer
    /// - `Err(AppError)` - Error from the operation or the database
    pub async fn update<T, F>(
        &self,
        guild_id: u64,
        user_id: u64,
        now: DateTime<Utc>,
        operation: F,
    ) -> Result<ProgressUpdate<T>, AppError>
    where
        F: FnMut(&Progression, &mut UserProgress, &mut Vec<ProgressEvent>) -> Result<T, AppError>,
    {
        let _guard = self.locks.lock(guild_id, user_id).await;
        self.update_locked(guild_id, user_id, now, operation).await
    }

    /// Same as [`update`](Self::update) for callers already holding the member's lock.
    pub async fn update_locked<T, F>(
        &self,
        guild_id: u64,
        user_id: u64,
        now: DateTime<Utc>,
        mut operation: F,
    ) -> Result<ProgressUpdate<T>, AppError>
    where
        F: FnMut(&Progression, &mut UserProgress, &mut Vec<ProgressEvent>) -> Result<T, AppError>,
    {
        let rules = self.settings.rules(guild_id).await?;
        let engine = Progression::new(&rules, self.catalog);
        let repo = UserProgressRepository::new(self.db);

        for attempt in 1..=MAX_SAVE_ATTEMPTS {
            let mut progress = repo.get_or_create(guild_id, user_id, now).await?;
            let mut events = Vec::new();

            let value = operation(&engine, &mut progress, &mut events)?;

            match repo.save(&mut progress).await? {
                SaveOutcome::Saved => {
                    return Ok(ProgressUpdate {
                        value,
                        progress,
                        events,
                    })
                }
                SaveOutcome::Conflict => {
                    tracing::warn!(
                        "Version conflict saving progress of user {} in guild {} (attempt {}/{})",
                        user_id,
                        guild_id,
                        attempt,
                        MAX_SAVE_ATTEMPTS
                    );
                }
            }
        }

        Err(AppError::Conflict(format!(
            "Progress of user {} in guild {} kept changing during update",
            user_id, guild_id
        )))
    }

    /// Claims the daily bonus of a member.
    ///
    /// # Returns
    /// - `Ok(ProgressUpdate<DailyBonus>)` - Bonus granted
    /// - `Err(AppError::ProgressErr(AlreadyClaimed))` - Cooldown still running
    pub async fn claim_daily(
        &self,
        guild_id: u64,
        user_id: u64,
        now: DateTime<Utc>,
    ) -> Result<ProgressUpdate<DailyBonus>, AppError> {
        self.update(guild_id, user_id, now, |engine, progress, events| {
            Ok(engine.claim_daily(progress, now, events)?)
        })
        .await
    }

    /// Records a quiz answer.
    pub async fn record_quiz(
        &self,
        guild_id: u64,
        user_id: u64,
        difficulty: Difficulty,
        correct: bool,
        now: DateTime<Utc>,
    ) -> Result<ProgressUpdate<u64>, AppError> {
        self.update(guild_id, user_id, now, |engine, progress, events| {
            Ok(engine.record_quiz_answer(progress, difficulty, correct, events))
        })
        .await
    }

    /// Grants XP on behalf of an administrator.
    ///
    /// # Returns
    /// - `Ok(ProgressUpdate<bool>)` - XP added; the value tells whether the member leveled up
    /// - `Err(AppError::ProgressErr(InvalidAmount))` - Negative amount
    pub async fn grant_xp(
        &self,
        guild_id: u64,
        user_id: u64,
        amount: i64,
        now: DateTime<Utc>,
    ) -> Result<ProgressUpdate<bool>, AppError> {
        let amount = u64::try_from(amount).map_err(|_| ProgressError::InvalidAmount(amount))?;

        let update = self
            .update(guild_id, user_id, now, |engine, progress, events| {
                Ok(engine.add_xp(progress, amount, XpSource::Admin, events))
            })
            .await?;

        tracing::info!(
            "Granted {} XP to user {} in guild {}",
            amount,
            user_id,
            guild_id
        );

        Ok(update)
    }

    /// Progress record of a member without creating one.
    pub async fn get(&self, guild_id: u64, user_id: u64) -> Result<Option<UserProgress>, AppError> {
        Ok(UserProgressRepository::new(self.db)
            .find(guild_id, user_id)
            .await?)
    }

    /// Top members of a guild. `limit` is clamped to `1..=100`.
    pub async fn leaderboard(
        &self,
        guild_id: u64,
        limit: u64,
    ) -> Result<Vec<LeaderboardEntry>, AppError> {
        let limit = limit.clamp(1, MAX_LEADERBOARD_LIMIT);

        Ok(UserProgressRepository::new(self.db)
            .leaderboard(guild_id, limit)
            .await?)
    }
}
