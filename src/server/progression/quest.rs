//! Play-time quests and bonus game unlocks.

use crate::server::model::progress::UserProgress;

use super::{
    event::{NotificationSink, ProgressEvent, XpSource},
    Progression,
};

/// Result of evaluating a game's quests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestOutcome {
    /// Indices of the quests completed by this call, ascending.
    pub completed: Vec<usize>,
    /// Sum of their rewards.
    pub xp_reward: u64,
}

/// Result of an unlock attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnlockOutcome {
    NewlyUnlocked {
        bonus_xp: u64,
        category: String,
        emoji: String,
    },
    AlreadyUnlocked,
}

const FALLBACK_CATEGORY: &str = "Other";
const FALLBACK_EMOJI: &str = "🎮";

impl<'a> Progression<'a> {
    /// Completes every quest of `game_name` whose threshold is within `total_minutes`.
    ///
    /// Already completed quests are skipped, so calling this again with the same or a smaller
    /// total changes nothing. Newly completed quests are announced in threshold order and
    /// their rewards are granted through a single `add_xp` call.
    pub fn check_and_complete_quests(
        &self,
        progress: &mut UserProgress,
        game_name: &str,
        total_minutes: u64,
        sink: &mut impl NotificationSink,
    ) -> QuestOutcome {
        let thresholds = self.catalog.quests_for(game_name);

        let completed: Vec<usize> = thresholds
            .iter()
            .enumerate()
            .filter(|(index, quest)| {
                quest.minutes <= total_minutes && !progress.has_completed_quest(game_name, *index)
            })
            .map(|(index, _)| index)
            .collect();

        if completed.is_empty() {
            return QuestOutcome::default();
        }

        let done = progress
            .completed_quests
            .entry(game_name.to_string())
            .or_default();
        done.extend(completed.iter().copied());

        let mut xp_reward = 0u64;
        for &index in &completed {
            let quest = &thresholds[index];
            xp_reward = xp_reward.saturating_add(quest.xp_reward);

            sink.notify(ProgressEvent::QuestCompleted {
                game: game_name.to_string(),
                quest_name: quest.name.clone(),
                xp_reward: quest.xp_reward,
                total_minutes,
            });
        }

        self.add_xp(progress, xp_reward, XpSource::Quest, sink);

        QuestOutcome {
            completed,
            xp_reward,
        }
    }

    /// Unlocks `game_name` for the member, granting the one-time unlock bonus.
    ///
    /// Unlocking a game twice is a no-op. Games missing from the bonus catalog are unlocked
    /// under a generic category.
    pub fn unlock_game(
        &self,
        progress: &mut UserProgress,
        game_name: &str,
        sink: &mut impl NotificationSink,
    ) -> UnlockOutcome {
        if !progress.unlocked_games.insert(game_name.to_string()) {
            return UnlockOutcome::AlreadyUnlocked;
        }

        let (category, emoji) = match self.catalog.bonus_game(game_name) {
            Some(bonus) => (bonus.category.clone(), bonus.emoji.clone()),
            None => (FALLBACK_CATEGORY.to_string(), FALLBACK_EMOJI.to_string()),
        };
        let bonus_xp = self.rules.unlock_bonus_xp;

        sink.notify(ProgressEvent::GameUnlocked {
            game: game_name.to_string(),
            bonus_xp,
            category: category.clone(),
            emoji: emoji.clone(),
        });
        self.add_xp(progress, bonus_xp, XpSource::Unlock, sink);

        UnlockOutcome::NewlyUnlocked {
            bonus_xp,
            category,
            emoji,
        }
    }
}
