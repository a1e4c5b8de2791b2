//! Factory methods for creating test data.
//!
//! This module provides factory methods for creating test entities with sensible defaults,
//! reducing boilerplate in tests. Each entity has a `Factory` struct for customization and a
//! `create_*` convenience function for quick default creation.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let progress = factory::create_progress(&db).await?;
//! let session = factory::create_game_session(&db, "Minecraft").await?;
//! ```
//!
//! # Customization
//!
//! ```rust,ignore
//! let progress = factory::user_progress::UserProgressFactory::new(&db)
//!     .guild_id("42")
//!     .xp(900)
//!     .game_time("Minecraft", 120)
//!     .build()
//!     .await?;
//! ```
//!
//! # Available Factories
//!
//! - `user_progress` - Create progress records with optional child rows
//! - `game_session` - Create persisted gaming sessions
//! - `guild_settings` - Create per-guild progression settings
//! - `helpers` - Unique id generation

pub mod game_session;
pub mod guild_settings;
pub mod helpers;
pub mod user_progress;

pub use game_session::create_game_session;
pub use guild_settings::create_guild_settings;
pub use user_progress::create_progress;
