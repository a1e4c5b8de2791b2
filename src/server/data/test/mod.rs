mod game_session;
mod guild_settings;
mod user_progress;
