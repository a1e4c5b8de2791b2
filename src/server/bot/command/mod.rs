//! Slash and prefix commands.
//!
//! Every slash command is declared in [`definitions`] and dispatched by name from the
//! interaction handler. Handlers return `AppError`; [`report_error`] turns it into a reply.

pub mod countdown;
pub mod help;
pub mod poll;
pub mod progress;
pub mod quiz;

use serenity::all::{
    CommandInteraction, Context, CreateActionRow, CreateButton, CreateCommand, CreateEmbed,
    CreateInteractionResponse, CreateInteractionResponseMessage, UserId,
};

use crate::server::error::AppError;

/// Reply shown when a command fails for a reason the member cannot fix.
const GENERIC_ERROR: &str = "❌ Něco se pokazilo, zkus to prosím znovu.";

/// Prefix of text commands.
pub const PREFIX: char = '!';

/// All slash commands of the bot.
pub fn definitions() -> Vec<CreateCommand> {
    vec![
        countdown::definition(),
        poll::definition(),
        quiz::definition(),
        progress::level_definition(),
        progress::daily_definition(),
        progress::leaderboard_definition(),
        progress::quests_definition(),
        help::definition(),
    ]
}

/// Runs the slash command named in `command`.
pub async fn dispatch(
    ctx: &Context,
    command: &CommandInteraction,
    state: &crate::server::state::AppState,
) -> Result<(), AppError> {
    match command.data.name.as_str() {
        countdown::NAME => countdown::run(ctx, command, state).await,
        poll::NAME => poll::run(ctx, command, state).await,
        quiz::NAME => quiz::run(ctx, command, state).await,
        progress::LEVEL => progress::run_level(ctx, command, state).await,
        progress::DAILY => progress::run_daily(ctx, command, state).await,
        progress::LEADERBOARD => progress::run_leaderboard(ctx, command, state).await,
        progress::QUESTS => progress::run_quests(ctx, command, state).await,
        help::NAME => help::run(ctx, command).await,
        other => {
            tracing::warn!("Unknown command received: {}", other);
            respond_ephemeral(ctx, command, "❌ Neznámý příkaz.").await
        }
    }
}

/// Text a member should see for `err`, or `None` when it is an internal failure.
pub fn user_message(err: &AppError) -> Option<String> {
    match err {
        AppError::SessionErr(e) => Some(e.to_string()),
        AppError::BadRequest(msg) | AppError::NotFound(msg) => Some(format!("❌ {}", msg)),
        _ => None,
    }
}

/// Replies to a failed command, logging internal failures.
pub async fn report_error(ctx: &Context, command: &CommandInteraction, err: AppError) {
    let content = user_message(&err).unwrap_or_else(|| {
        tracing::error!("Command /{} failed: {}", command.data.name, err);
        GENERIC_ERROR.to_string()
    });

    let message = CreateInteractionResponseMessage::new()
        .content(&content)
        .ephemeral(true);

    // The command may already have responded before failing.
    if command
        .create_response(&ctx.http, CreateInteractionResponse::Message(message))
        .await
        .is_err()
    {
        let followup = serenity::all::CreateInteractionResponseFollowup::new()
            .content(content)
            .ephemeral(true);
        if let Err(e) = command.create_followup(&ctx.http, followup).await {
            tracing::error!("Failed to report error of /{}: {}", command.data.name, e);
        }
    }
}

/// String option `name` of a command.
pub fn string_option<'a>(command: &'a CommandInteraction, name: &str) -> Option<&'a str> {
    command
        .data
        .options
        .iter()
        .find(|option| option.name == name)
        .and_then(|option| option.value.as_str())
}

/// User option `name` of a command.
pub fn user_option(command: &CommandInteraction, name: &str) -> Option<UserId> {
    command
        .data
        .options
        .iter()
        .find(|option| option.name == name)
        .and_then(|option| option.value.as_user_id())
}

/// Guild the command was used in.
///
/// # Returns
/// - `Ok(u64)` - Guild id
/// - `Err(AppError::BadRequest)` - The command was used in a direct message
pub fn require_guild(command: &CommandInteraction) -> Result<u64, AppError> {
    command
        .guild_id
        .map(|id| id.get())
        .ok_or_else(|| AppError::BadRequest("Tento příkaz funguje jen na serveru.".to_string()))
}

pub async fn respond_embed(
    ctx: &Context,
    command: &CommandInteraction,
    embed: CreateEmbed,
    components: Vec<CreateActionRow>,
) -> Result<(), AppError> {
    let message = CreateInteractionResponseMessage::new()
        .embed(embed)
        .components(components);

    command
        .create_response(&ctx.http, CreateInteractionResponse::Message(message))
        .await?;

    Ok(())
}

pub async fn respond_ephemeral(
    ctx: &Context,
    command: &CommandInteraction,
    content: &str,
) -> Result<(), AppError> {
    let message = CreateInteractionResponseMessage::new()
        .content(content)
        .ephemeral(true);

    command
        .create_response(&ctx.http, CreateInteractionResponse::Message(message))
        .await?;

    Ok(())
}

/// Lays buttons out in rows of at most five.
pub fn button_rows(buttons: Vec<CreateButton>) -> Vec<CreateActionRow> {
    buttons
        .chunks(5)
        .map(|row| CreateActionRow::Buttons(row.to_vec()))
        .collect()
}
