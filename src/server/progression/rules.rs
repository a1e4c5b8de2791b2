/// Tunable numbers of the progression engine.
///
/// The process-wide defaults come from configuration; guilds may override the daily cap and
/// the daily bonus amounts through their settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressionRules {
    /// Maximum XP earnable from tracked play time within one rolling 24h window.
    pub daily_game_xp_cap: u64,
    /// XP granted per full bucket of played minutes.
    pub game_xp_per_bucket: u64,
    /// Size of a play-time bucket in minutes. Partial buckets earn nothing.
    pub game_minutes_per_bucket: u64,
    /// Flat XP of every daily claim.
    pub base_daily_xp: u64,
    /// Extra XP per consecutive day beyond the first.
    pub streak_bonus_per_day: u64,
    /// Number of streak days after which the streak bonus stops growing.
    pub max_streak_bonus_days: u32,
    /// One-time XP for playing a bonus game for the first time.
    pub unlock_bonus_xp: u64,
    /// Tracked sessions shorter than this are discarded entirely.
    pub min_session_minutes: u64,
}

impl Default for ProgressionRules {
    fn default() -> Self {
        Self {
            daily_game_xp_cap: 200,
            game_xp_per_bucket: 5,
            game_minutes_per_bucket: 10,
            base_daily_xp: 50,
            streak_bonus_per_day: 10,
            max_streak_bonus_days: 10,
            unlock_bonus_xp: 100,
            min_session_minutes: 10,
        }
    }
}
