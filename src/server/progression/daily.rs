//! Daily bonus and streaks.

use chrono::{DateTime, Duration, Utc};

use crate::server::{error::progress::ProgressError, model::progress::UserProgress};

use super::{
    event::{NotificationSink, ProgressEvent, XpSource},
    Progression,
};

/// Breakdown of a successful daily claim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyBonus {
    pub base: u64,
    pub streak_bonus: u64,
    pub streak: u32,
    pub leveled_up: bool,
}

impl DailyBonus {
    pub fn total(&self) -> u64 {
        self.base.saturating_add(self.streak_bonus)
    }
}

impl<'a> Progression<'a> {
    /// Claims the daily bonus.
    ///
    /// A claim within 24 hours of the previous one is rejected. A claim between 24 and 48
    /// hours after the previous one continues the streak; anything later, or a first claim,
    /// starts a new streak of 1. The reward is the base XP plus the per-day streak bonus for
    /// every streak day beyond the first, counting at most `max_streak_bonus_days` days.
    ///
    /// # Returns
    /// - `Ok(DailyBonus)` - Reward breakdown
    /// - `Err(ProgressError::AlreadyClaimed)` - Cooldown still running, with the time left
    pub fn claim_daily(
        &self,
        progress: &mut UserProgress,
        now: DateTime<Utc>,
        sink: &mut impl NotificationSink,
    ) -> Result<DailyBonus, ProgressError> {
        let cooldown = Duration::hours(24);

        let streak = match progress.last_daily_claim {
            Some(last) => {
                let gap = now - last;
                if gap < cooldown {
                    return Err(ProgressError::AlreadyClaimed {
                        remaining: cooldown - gap,
                    });
                }
                if gap < cooldown * 2 {
                    progress.streak.saturating_add(1)
                } else {
                    1
                }
            }
            None => 1,
        };

        let bonus_days = (streak - 1).min(self.rules.max_streak_bonus_days);
        let base = self.rules.base_daily_xp;
        let streak_bonus = u64::from(bonus_days).saturating_mul(self.rules.streak_bonus_per_day);

        progress.streak = streak;
        progress.last_daily_claim = Some(now);

        sink.notify(ProgressEvent::DailyBonusGranted {
            base,
            streak_bonus,
            streak,
        });
        let leveled_up = self.add_xp(
            progress,
            base.saturating_add(streak_bonus),
            XpSource::Daily,
            sink,
        );

        Ok(DailyBonus {
            base,
            streak_bonus,
            streak,
            leveled_up,
        })
    }
}
