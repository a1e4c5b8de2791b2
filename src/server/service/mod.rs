//! Service layer for business logic and orchestration.
//!
//! Services sit between the callers (Discord handlers, dashboard controllers, scheduled jobs)
//! and the repositories. They resolve the effective rules of a guild, serialize mutations per
//! member and run the progression engine on loaded records.

pub mod activity;
pub mod guild_settings;
pub mod lock;
pub mod progress;

#[cfg(test)]
mod test;
