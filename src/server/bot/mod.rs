//! Discord bot: slash and prefix commands, minigame buttons and activity tracking.
//!
//! The bot is initialized during startup and runs in a separate tokio task next to the
//! dashboard server. Its HTTP client is shared with the scheduler, which posts announcements
//! for sessions it closes.
//!
//! # Gateway Intents
//!
//! The bot requires the following gateway intents:
//! - `GUILDS` - Guild availability
//! - `GUILD_MESSAGES` and `MESSAGE_CONTENT` - Prefix commands (privileged intent)
//! - `GUILD_PRESENCES` - Game activity tracking (privileged intent)
//!
//! Privileged intents must be explicitly enabled in the Discord Developer Portal for the bot
//! application.

pub mod command;
pub mod component;
pub mod handler;
pub mod notifier;
pub mod start;
