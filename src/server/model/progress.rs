//! User progress domain model.
//!
//! A [`UserProgress`] is the typed form of one member's progression record: the scalar columns
//! of `user_progress` plus the `game_time`, `completed_quest` and `unlocked_game` child rows
//! folded into maps and sets. The level is never stored and always derived from `xp`.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use sea_orm::DbErr;

use crate::{
    model::progress::{LeaderboardEntryDto, UserProgressDto},
    server::progression::level::{level_for_xp, xp_to_next_level},
};

/// Progression state of one member in one guild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProgress {
    /// Row id of the `user_progress` record. Zero for records that were never persisted.
    pub id: i32,
    pub guild_id: u64,
    pub user_id: u64,
    pub xp: u64,
    /// Consecutive daily claims.
    pub streak: u32,
    pub last_daily_claim: Option<DateTime<Utc>>,
    /// Play-time XP earned in the current rolling window.
    pub daily_game_xp: u64,
    /// Start of the current rolling window.
    pub last_game_xp_reset: DateTime<Utc>,
    pub unlocked_games: BTreeSet<String>,
    /// Completed quest indices per game.
    pub completed_quests: BTreeMap<String, BTreeSet<usize>>,
    /// Accumulated minutes per game.
    pub game_times: BTreeMap<String, u64>,
    /// Quiz questions answered.
    pub total_games: u64,
    /// Quiz questions answered correctly.
    pub total_correct: u64,
    /// Optimistic concurrency token, bumped on every successful save.
    pub version: i32,
}

impl UserProgress {
    /// Creates an empty record with all counters at zero and the game XP window starting at
    /// `now`.
    pub fn new(guild_id: u64, user_id: u64, now: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            guild_id,
            user_id,
            xp: 0,
            streak: 0,
            last_daily_claim: None,
            daily_game_xp: 0,
            last_game_xp_reset: now,
            unlocked_games: BTreeSet::new(),
            completed_quests: BTreeMap::new(),
            game_times: BTreeMap::new(),
            total_games: 0,
            total_correct: 0,
            version: 0,
        }
    }

    pub fn level(&self) -> u32 {
        level_for_xp(self.xp)
    }

    pub fn xp_to_next_level(&self) -> u64 {
        xp_to_next_level(self.xp)
    }

    /// Minutes accumulated for `game`.
    pub fn game_minutes(&self, game: &str) -> u64 {
        self.game_times.get(game).copied().unwrap_or(0)
    }

    pub fn has_completed_quest(&self, game: &str, index: usize) -> bool {
        self.completed_quests
            .get(game)
            .is_some_and(|done| done.contains(&index))
    }

    /// Share of correctly answered quiz questions in percent.
    pub fn accuracy(&self) -> f64 {
        if self.total_games == 0 {
            return 0.0;
        }
        self.total_correct as f64 / self.total_games as f64 * 100.0
    }

    /// Converts entity models to a domain model at the repository boundary.
    ///
    /// # Arguments
    /// - `entity` - The `user_progress` row
    /// - `game_times` - Its `game_time` rows
    /// - `completed_quests` - Its `completed_quest` rows
    /// - `unlocked_games` - Its `unlocked_game` rows
    ///
    /// # Returns
    /// - `Ok(UserProgress)` - Converted domain model
    /// - `Err(DbErr::Custom)` - Failed to parse a Discord id or a stored counter was negative
    pub fn from_entities(
        entity: entity::user_progress::Model,
        game_times: Vec<entity::game_time::Model>,
        completed_quests: Vec<entity::completed_quest::Model>,
        unlocked_games: Vec<entity::unlocked_game::Model>,
    ) -> Result<Self, DbErr> {
        let guild_id = parse_id(&entity.guild_id, "guild_id")?;
        let user_id = parse_id(&entity.user_id, "user_id")?;

        let mut completed: BTreeMap<String, BTreeSet<usize>> = BTreeMap::new();
        for quest in completed_quests {
            let index = usize::try_from(quest.quest_index).map_err(|e| {
                DbErr::Custom(format!("Invalid quest_index {}: {}", quest.quest_index, e))
            })?;
            completed.entry(quest.game_name).or_default().insert(index);
        }

        Ok(Self {
            id: entity.id,
            guild_id,
            user_id,
            xp: to_unsigned(entity.xp, "xp")?,
            streak: u32::try_from(entity.streak)
                .map_err(|e| DbErr::Custom(format!("Invalid streak {}: {}", entity.streak, e)))?,
            last_daily_claim: entity.last_daily_claim,
            daily_game_xp: to_unsigned(entity.daily_game_xp, "daily_game_xp")?,
            last_game_xp_reset: entity.last_game_xp_reset,
            unlocked_games: unlocked_games.into_iter().map(|u| u.game_name).collect(),
            completed_quests: completed,
            game_times: game_times
                .into_iter()
                .map(|t| Ok((t.game_name, to_unsigned(t.minutes, "minutes")?)))
                .collect::<Result<_, DbErr>>()?,
            total_games: to_unsigned(entity.total_games, "total_games")?,
            total_correct: to_unsigned(entity.total_correct, "total_correct")?,
            version: entity.version,
        })
    }

    /// Converts the domain model to a DTO for API responses.
    pub fn into_dto(self) -> UserProgressDto {
        UserProgressDto {
            guild_id: self.guild_id,
            user_id: self.user_id,
            level: self.level(),
            xp_to_next_level: self.xp_to_next_level(),
            accuracy: self.accuracy(),
            xp: self.xp,
            streak: self.streak,
            last_daily_claim: self.last_daily_claim,
            daily_game_xp: self.daily_game_xp,
            unlocked_games: self.unlocked_games.into_iter().collect(),
            completed_quests: self
                .completed_quests
                .into_iter()
                .map(|(game, done)| (game, done.into_iter().collect()))
                .collect(),
            game_times: self.game_times,
            total_games: self.total_games,
            total_correct: self.total_correct,
        }
    }
}

/// One row of a guild leaderboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    /// 1-based position.
    pub rank: u32,
    pub user_id: u64,
    pub xp: u64,
}

impl LeaderboardEntry {
    pub fn level(&self) -> u32 {
        level_for_xp(self.xp)
    }

    pub fn into_dto(self) -> LeaderboardEntryDto {
        LeaderboardEntryDto {
            rank: self.rank,
            user_id: self.user_id,
            level: self.level(),
            xp: self.xp,
        }
    }
}

fn parse_id(value: &str, column: &str) -> Result<u64, DbErr> {
    value
        .parse::<u64>()
        .map_err(|e| DbErr::Custom(format!("Failed to parse {}: {}", column, e)))
}

fn to_unsigned(value: i64, column: &str) -> Result<u64, DbErr> {
    u64::try_from(value).map_err(|e| DbErr::Custom(format!("Invalid {} {}: {}", column, value, e)))
}
