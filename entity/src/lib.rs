//! SeaORM entities for the questboard database.

pub mod prelude;

pub mod completed_quest;
pub mod game_session;
pub mod game_time;
pub mod guild_settings;
pub mod unlocked_game;
pub mod user_progress;
