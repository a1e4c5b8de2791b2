//! Game activity service.
//!
//! Feeds presence signals into the activity state machine. The running session lives in
//! `game_session`, so a session survives a bot restart and its elapsed time is still credited
//! when the member stops playing afterwards.
//!
//! The session row is written before the progress record. If saving progress fails after the
//! session changed, the finished session is lost rather than credited twice.

use chrono::{DateTime, Duration, Utc};
use sea_orm::DatabaseConnection;

use crate::server::{
    data::game_session::GameSessionRepository,
    error::AppError,
    model::session::GameSession,
    progression::{
        activity::{transition, ActivitySignal, FinishedSession, SessionCredit, TransitionOutcome},
        catalog::GameCatalog,
        rules::ProgressionRules,
    },
    service::{
        lock::UserLocks,
        progress::{ProgressService, ProgressUpdate},
    },
};

/// A stale session closed by the sweep.
#[derive(Debug, Clone)]
pub struct SweptSession {
    pub session: GameSession,
    pub update: ProgressUpdate<SessionCredit>,
}

pub struct ActivityService<'a> {
    db: &'a DatabaseConnection,
    catalog: &'a GameCatalog,
    locks: &'a UserLocks,
    progress: ProgressService<'a>,
}

impl<'a> ActivityService<'a> {
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
            progress: ProgressService::new(db, catalog, locks, defaults),
        }
    }

    /// Applies a presence signal of a member.
    ///
    /// # Returns
    /// - `Ok(None)` - Nothing changed for the member's progress
    /// - `Ok(Some(ProgressUpdate))` - A session was credited or a bonus game unlocked
    /// - `Err(AppError)` - Database error
    pub async fn handle_signal(
        &self,
        guild_id: u64,
        user_id: u64,
        signal: ActivitySignal,
        now: DateTime<Utc>,
    ) -> Result<Option<ProgressUpdate<TransitionOutcome>>, AppError> {
        let _guard = self.locks.lock(guild_id, user_id).await;
        let sessions = GameSessionRepository::new(self.db);

        let current = sessions
            .find(guild_id, user_id)
            .await?
            .map(|s| s.to_active());
        let change = transition(current.as_ref(), signal, now);

        if change.is_noop() {
            return Ok(None);
        }

        match &change.next {
            Some(next) if change.started => {
                sessions
                    .upsert(guild_id, user_id, &next.game, next.started_at)
                    .await?;
                tracing::debug!(
                    "User {} in guild {} started playing {}",
                    user_id,
                    guild_id,
                    next.game
                );
            }
            Some(_) => {}
            None => {
                sessions.delete(guild_id, user_id).await?;
            }
        }

        if let Some(finished) = &change.finished {
            tracing::debug!(
                "User {} in guild {} stopped playing {} after {} minutes",
                user_id,
                guild_id,
                finished.game,
                finished.minutes
            );
        }

        let unlock_candidate = change.started
            && change
                .next
                .as_ref()
                .is_some_and(|next| self.catalog.bonus_game(&next.game).is_some());
        if change.finished.is_none() && !unlock_candidate {
            return Ok(None);
        }

        let update = self
            .progress
            .update_locked(guild_id, user_id, now, |engine, progress, events| {
                Ok(engine.apply_transition(progress, &change, now, events))
            })
            .await?;

        Ok(Some(update))
    }

    /// Closes sessions that have been running for longer than `max_age`.
    ///
    /// Covers members whose "stopped playing" signal never arrived. Each stale session is
    /// credited with at most `max_age` of play time and removed.
    ///
    /// # Returns
    /// - `Ok(Vec<SweptSession>)` - Sessions closed by this sweep
    /// - `Err(AppError)` - Database error
    pub async fn sweep_stale(
        &self,
        now: DateTime<Utc>,
        max_age: Duration,
    ) -> Result<Vec<SweptSession>, AppError> {
        let cutoff = now - max_age;
        let sessions = GameSessionRepository::new(self.db);
        let stale = sessions.find_started_before(cutoff).await?;

        let mut swept = Vec::with_capacity(stale.len());
        for candidate in stale {
            let _guard = self.locks.lock(candidate.guild_id, candidate.user_id).await;

            // The member may have switched games while we waited for the lock.
            let Some(session) = sessions
                .find(candidate.guild_id, candidate.user_id)
                .await?
                .filter(|s| s.started_at < cutoff)
            else {
                continue;
            };

            let minutes = (now - session.started_at)
                .min(max_age)
                .num_minutes()
                .max(0) as u64;
            let finished = FinishedSession {
                game: session.game_name.clone(),
                minutes,
            };

            sessions.delete(session.guild_id, session.user_id).await?;
            let update = self
                .progress
                .update_locked(
                    session.guild_id,
                    session.user_id,
                    now,
                    |engine, progress, events| {
                        Ok(engine.finish_session(progress, &finished, now, events))
                    },
                )
                .await?;

            tracing::info!(
                "Closed stale {} session of user {} in guild {} ({} minutes credited)",
                session.game_name,
                session.user_id,
                session.guild_id,
                minutes
            );

            swept.push(SweptSession { session, update });
        }

        Ok(swept)
    }
}
