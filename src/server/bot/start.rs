use std::sync::Arc;

use serenity::{
    all::{Client, GatewayIntents},
    http::Http,
};

use crate::server::{bot::handler::Handler, config::Config, error::AppError, state::AppState};

/// Builds the Discord client.
///
/// # Arguments
/// - `config` - Application configuration holding the bot token
/// - `state` - Shared state handed to the event handler
///
/// # Returns
/// - `Ok((Client, Arc<Http>))` - Client ready to start and its HTTP client for other services
/// - `Err(AppError)` - Client construction failed
pub async fn init_bot(config: &Config, state: AppState) -> Result<(Client, Arc<Http>), AppError> {
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT
        | GatewayIntents::GUILD_PRESENCES;

    let client = Client::builder(&config.discord_bot_token, intents)
        .event_handler(Handler::new(state))
        .await?;
    let http = client.http.clone();

    Ok((client, http))
}

/// Connects the client and processes events until shutdown.
pub async fn start_bot(mut client: Client) -> Result<(), AppError> {
    tracing::info!("Starting Discord bot...");

    client.start().await?;

    Ok(())
}
