//! Prefix commands.
//!
//! `!odpocet`, `!poll` and `!pomoc` with their aliases. Other messages are ignored.

use serenity::all::{Context, CreateMessage, Message};

use crate::server::{
    bot::command::{self, countdown, help, poll, PREFIX},
    error::AppError,
    state::AppState,
};

/// Prefix command a message invokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixCommand {
    Countdown,
    Poll,
    Help,
}

/// Splits `!name args` into the command and its arguments.
pub fn parse_prefix_command(content: &str) -> Option<(PrefixCommand, &str)> {
    let rest = content.trim_start().strip_prefix(PREFIX)?;
    let (name, args) = rest
        .split_once(char::is_whitespace)
        .unwrap_or((rest, ""));
    let name = name.to_lowercase();

    let command = if countdown::ALIASES.contains(&name.as_str()) {
        PrefixCommand::Countdown
    } else if poll::ALIASES.contains(&name.as_str()) {
        PrefixCommand::Poll
    } else if name == help::PREFIX_NAME {
        PrefixCommand::Help
    } else {
        return None;
    };

    Some((command, args.trim()))
}

/// Handle message creation in a channel
pub async fn handle_message(state: &AppState, ctx: Context, message: Message) {
    if message.author.bot {
        return;
    }
    let Some((prefix_command, args)) = parse_prefix_command(&message.content) else {
        return;
    };

    let result = match prefix_command {
        PrefixCommand::Countdown => countdown::run_prefix(&ctx, &message, args, state).await,
        PrefixCommand::Poll => poll::run_prefix(&ctx, &message, args, state).await,
        PrefixCommand::Help => send_help(&ctx, &message).await,
    };

    if let Err(err) = result {
        let content = command::user_message(&err).unwrap_or_else(|| {
            tracing::error!("Prefix command {:?} failed: {}", prefix_command, err);
            "❌ Něco se pokazilo, zkus to prosím znovu.".to_string()
        });
        if let Err(e) = message.reply(&ctx.http, content).await {
            tracing::error!("Failed to reply to prefix command: {}", e);
        }
    }
}

async fn send_help(ctx: &Context, message: &Message) -> Result<(), AppError> {
    message
        .channel_id
        .send_message(&ctx.http, CreateMessage::new().embed(help::embed()))
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_aliases() {
        assert_eq!(
            parse_prefix_command("!timer 5m Pizza"),
            Some((PrefixCommand::Countdown, "5m Pizza"))
        );
        assert_eq!(
            parse_prefix_command("!ANKETA 1h Kam? | A, B"),
            Some((PrefixCommand::Poll, "1h Kam? | A, B"))
        );
        assert_eq!(parse_prefix_command("!pomoc"), Some((PrefixCommand::Help, "")));
    }

    #[test]
    fn ignores_other_messages() {
        assert_eq!(parse_prefix_command("ahoj !poll"), None);
        assert_eq!(parse_prefix_command("!unknown 5m"), None);
        assert_eq!(parse_prefix_command("odpocet 5m"), None);
    }
}
