pub use super::completed_quest::Entity as CompletedQuest;
pub use super::game_session::Entity as GameSession;
pub use super::game_time::Entity as GameTime;
pub use super::guild_settings::Entity as GuildSettings;
pub use super::unlocked_game::Entity as UnlockedGame;
pub use super::user_progress::Entity as UserProgress;
