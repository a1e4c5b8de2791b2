//! Database repository layer.
//!
//! Repository structs perform all database operations for their domain. They use SeaORM entity
//! models internally and return domain models, so that database structures never leak into
//! the service and controller layers.

pub mod game_session;
pub mod guild_settings;
pub mod user_progress;

#[cfg(test)]
mod test;
