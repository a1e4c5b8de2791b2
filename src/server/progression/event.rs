//! Notifications emitted by the progression engine.
//!
//! The engine never formats messages. It reports what happened through a
//! [`NotificationSink`] and the Discord layer decides how to render it.

/// Something a member achieved that is worth announcing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// The member reached a new level.
    LevelUp {
        new_level: u32,
        /// Total XP at which the level after `new_level` starts.
        next_level_xp: u64,
    },
    /// A play-time quest threshold was crossed for the first time.
    QuestCompleted {
        game: String,
        quest_name: String,
        xp_reward: u64,
        total_minutes: u64,
    },
    /// A bonus game was played for the first time.
    GameUnlocked {
        game: String,
        bonus_xp: u64,
        category: String,
        emoji: String,
    },
    /// The daily bonus was claimed.
    DailyBonusGranted {
        base: u64,
        streak_bonus: u64,
        streak: u32,
    },
}

/// Receiver of progression events.
pub trait NotificationSink {
    fn notify(&mut self, event: ProgressEvent);
}

impl NotificationSink for Vec<ProgressEvent> {
    fn notify(&mut self, event: ProgressEvent) {
        self.push(event);
    }
}

/// Where XP came from. Carried for logging and for callers that track sources separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XpSource {
    Quiz,
    Game,
    Quest,
    Unlock,
    Daily,
    Admin,
}

impl XpSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Quiz => "quiz",
            Self::Game => "game",
            Self::Quest => "quest",
            Self::Unlock => "unlock",
            Self::Daily => "daily",
            Self::Admin => "admin",
        }
    }
}
