//! XP accrual: plain XP, quiz answers and passive play time.

use chrono::{DateTime, Duration, Utc};

use crate::server::model::progress::UserProgress;

use super::{
    catalog::Difficulty,
    event::{NotificationSink, ProgressEvent, XpSource},
    level::{level_for_xp, xp_for_level},
    Progression,
};

/// Length of the rolling game XP window.
const GAME_XP_WINDOW_HOURS: i64 = 24;

impl<'a> Progression<'a> {
    /// Adds `amount` XP and reports a level-up when a boundary is crossed.
    ///
    /// Zero is a no-op. Several levels gained at once produce a single `LevelUp` event carrying
    /// the final level.
    ///
    /// # Arguments
    /// - `progress` - Record to mutate
    /// - `amount` - XP to add
    /// - `source` - Origin of the XP
    /// - `sink` - Receives the `LevelUp` event
    ///
    /// # Returns
    /// - `true` - The member reached a new level
    /// - `false` - Level unchanged
    pub fn add_xp(
        &self,
        progress: &mut UserProgress,
        amount: u64,
        source: XpSource,
        sink: &mut impl NotificationSink,
    ) -> bool {
        if amount == 0 {
            return false;
        }

        let old_level = level_for_xp(progress.xp);
        progress.xp = progress.xp.saturating_add(amount);
        let new_level = level_for_xp(progress.xp);

        tracing::trace!(
            "Added {} {} XP to user {} in guild {}",
            amount,
            source.as_str(),
            progress.user_id,
            progress.guild_id
        );

        if new_level > old_level {
            sink.notify(ProgressEvent::LevelUp {
                new_level,
                next_level_xp: xp_for_level(new_level.saturating_add(1)),
            });
            return true;
        }

        false
    }

    /// Converts played minutes into capped XP and accrues play time.
    ///
    /// Every full bucket of `game_minutes_per_bucket` minutes earns `game_xp_per_bucket` XP,
    /// clamped to what is left of the rolling daily cap. The window resets once 24 hours have
    /// passed since its last reset. Play time is recorded in full even when the XP is capped,
    /// and the game's quests are evaluated against the new cumulative time.
    ///
    /// # Arguments
    /// - `progress` - Record to mutate
    /// - `minutes_played` - Length of the finished session
    /// - `game_name` - Game that was played
    /// - `now` - Current time, used for the rolling window
    /// - `sink` - Receives level-up and quest events
    ///
    /// # Returns
    /// - XP actually granted for the play time (excluding quest rewards)
    pub fn add_game_xp(
        &self,
        progress: &mut UserProgress,
        minutes_played: u64,
        game_name: &str,
        now: DateTime<Utc>,
        sink: &mut impl NotificationSink,
    ) -> u64 {
        self.reset_game_xp_window(progress, now);

        if minutes_played == 0 {
            return 0;
        }

        let total_minutes = {
            let minutes = progress.game_times.entry(game_name.to_string()).or_insert(0);
            *minutes = minutes.saturating_add(minutes_played);
            *minutes
        };

        let headroom = self
            .rules
            .daily_game_xp_cap
            .saturating_sub(progress.daily_game_xp);

        let buckets = minutes_played
            .checked_div(self.rules.game_minutes_per_bucket)
            .unwrap_or(0);
        let earned = buckets
            .saturating_mul(self.rules.game_xp_per_bucket)
            .min(headroom);

        if earned > 0 {
            progress.daily_game_xp += earned;
            self.add_xp(progress, earned, XpSource::Game, sink);
        }

        self.check_and_complete_quests(progress, game_name, total_minutes, sink);

        earned
    }

    /// Resets the game XP counter when the rolling 24h window has elapsed.
    fn reset_game_xp_window(&self, progress: &mut UserProgress, now: DateTime<Utc>) {
        if now - progress.last_game_xp_reset >= Duration::hours(GAME_XP_WINDOW_HOURS) {
            progress.daily_game_xp = 0;
            progress.last_game_xp_reset = now;
        }
    }

    /// Records a quiz answer and rewards a correct one with the tier's XP.
    ///
    /// # Returns
    /// - XP earned (0 for a wrong answer)
    pub fn record_quiz_answer(
        &self,
        progress: &mut UserProgress,
        difficulty: Difficulty,
        correct: bool,
        sink: &mut impl NotificationSink,
    ) -> u64 {
        progress.total_games = progress.total_games.saturating_add(1);

        if !correct {
            return 0;
        }

        progress.total_correct = progress.total_correct.saturating_add(1);
        let reward = self.catalog.trivia_tier(difficulty).xp_reward;
        self.add_xp(progress, reward, XpSource::Quiz, sink);

        reward
    }
}
