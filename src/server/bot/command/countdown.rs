//! `/odpocet` and `!odpocet`: countdown timers with a cancel button.

use std::sync::Arc;

use chrono::Utc;
use serenity::{
    all::{
        ButtonStyle, ChannelId, CommandInteraction, CommandOptionType, Context, CreateButton,
        CreateCommand, CreateCommandOption, CreateEmbed, CreateEmbedFooter, CreateMessage,
        EditMessage, Message, MessageId,
    },
    http::Http,
};

use crate::server::{
    bot::{
        command::{button_rows, respond_embed, string_option},
        component::ComponentAction,
    },
    error::AppError,
    session::{
        countdown::{format_duration, parse_bounded, tick_interval, Countdown, MIN_COUNTDOWN_SECS},
        registry::Registry,
    },
    state::AppState,
};

pub const NAME: &str = "odpocet";
/// Prefix command aliases.
pub const ALIASES: [&str; 3] = ["odpocet", "countdown", "timer"];

const COLOR_RUNNING: u32 = 0x3498db;
const COLOR_FINISHED: u32 = 0x2ecc71;
const COLOR_CANCELLED: u32 = 0x95a5a6;

pub fn definition() -> CreateCommand {
    CreateCommand::new(NAME)
        .description("Spustí odpočet")
        .add_option(
            CreateCommandOption::new(CommandOptionType::String, "cas", "Délka, např. 30s, 5m, 1h, 1d")
                .required(true),
        )
        .add_option(CreateCommandOption::new(
            CommandOptionType::String,
            "duvod",
            "Na co se odpočítává",
        ))
}

pub async fn run(ctx: &Context, command: &CommandInteraction, state: &AppState) -> Result<(), AppError> {
    let duration = string_option(command, "cas").unwrap_or_default();
    let seconds = parse_bounded(duration, MIN_COUNTDOWN_SECS)?;
    let reason = string_option(command, "duvod").map(str::to_string);

    let countdown = Countdown::new(
        command.user.id.get(),
        command.channel_id.get(),
        reason,
        Utc::now(),
        seconds,
    );

    respond_embed(ctx, command, running_embed(&countdown), cancel_button()).await?;
    let message = command.get_response(&ctx.http).await?;

    start(ctx.http.clone(), state, &message, countdown);

    Ok(())
}

/// Handles `!odpocet <cas> [duvod]`.
pub async fn run_prefix(
    ctx: &Context,
    message: &Message,
    args: &str,
    state: &AppState,
) -> Result<(), AppError> {
    let (duration, reason) = match args.trim().split_once(char::is_whitespace) {
        Some((duration, reason)) => (duration, Some(reason.trim().to_string())),
        None => (args.trim(), None),
    };
    let seconds = parse_bounded(duration, MIN_COUNTDOWN_SECS)?;

    let countdown = Countdown::new(
        message.author.id.get(),
        message.channel_id.get(),
        reason.filter(|r| !r.is_empty()),
        Utc::now(),
        seconds,
    );

    let sent = message
        .channel_id
        .send_message(
            &ctx.http,
            CreateMessage::new()
                .embed(running_embed(&countdown))
                .components(cancel_button()),
        )
        .await?;

    start(ctx.http.clone(), state, &sent, countdown);

    Ok(())
}

fn start(http: Arc<Http>, state: &AppState, message: &Message, countdown: Countdown) {
    state
        .sessions
        .countdowns
        .create(message.id.get(), countdown.clone());

    tracing::info!(
        "Countdown {} started by user {} for {}",
        message.id,
        countdown.author_id,
        format_duration(countdown.remaining_secs(Utc::now()).max(0) as u64)
    );

    tokio::spawn(run_loop(
        http,
        state.sessions.countdowns.clone(),
        ChannelId::new(countdown.channel_id),
        message.id,
        countdown,
    ));
}

/// Refreshes the countdown embed until the countdown ends or is cancelled.
async fn run_loop(
    http: Arc<Http>,
    countdowns: Registry<u64, Countdown>,
    channel_id: ChannelId,
    message_id: MessageId,
    countdown: Countdown,
) {
    loop {
        let remaining = countdown.remaining_secs(Utc::now());
        if remaining <= 0 {
            break;
        }

        tokio::time::sleep(tick_interval(remaining)).await;
        if countdown.is_cancelled() {
            return;
        }

        let edit = EditMessage::new().embed(running_embed(&countdown));
        if let Err(e) = channel_id.edit_message(&http, message_id, edit).await {
            tracing::warn!("Stopping countdown {}, message update failed: {}", message_id, e);
            countdowns.finalize(&message_id.get());
            return;
        }
    }

    // Cancelled between the last check and now.
    if countdowns.finalize(&message_id.get()).is_none() {
        return;
    }

    let edit = EditMessage::new()
        .embed(finished_embed(&countdown))
        .components(vec![]);
    if let Err(e) = channel_id.edit_message(&http, message_id, edit).await {
        tracing::error!("Failed to finish countdown message {}: {}", message_id, e);
    }

    let ping = match &countdown.reason {
        Some(reason) => format!("⏰ <@{}> Odpočet skončil: **{}**", countdown.author_id, reason),
        None => format!("⏰ <@{}> Odpočet skončil!", countdown.author_id),
    };
    if let Err(e) = channel_id.say(&http, ping).await {
        tracing::error!("Failed to ping author of countdown {}: {}", message_id, e);
    }
}

fn cancel_button() -> Vec<serenity::all::CreateActionRow> {
    button_rows(vec![CreateButton::new(ComponentAction::CancelCountdown.custom_id())
        .label("Zrušit")
        .style(ButtonStyle::Danger)])
}

fn base_embed(countdown: &Countdown) -> CreateEmbed {
    let embed = CreateEmbed::new().footer(CreateEmbedFooter::new(format!(
        "Konec: {} UTC",
        countdown.ends_at.format("%Y-%m-%d %H:%M:%S")
    )));

    match &countdown.reason {
        Some(reason) => embed.field("Důvod", reason, false),
        None => embed,
    }
}

pub fn running_embed(countdown: &Countdown) -> CreateEmbed {
    let remaining = countdown.remaining_secs(Utc::now()).max(0) as u64;

    base_embed(countdown)
        .title("⏰ Odpočet")
        .description(format!(
            "Zbývá **{}** (<t:{}:R>)",
            format_duration(remaining),
            countdown.ends_at.timestamp()
        ))
        .color(COLOR_RUNNING)
}

pub fn finished_embed(countdown: &Countdown) -> CreateEmbed {
    base_embed(countdown)
        .title("✅ Odpočet skončil!")
        .description(format!("Odpočet spuštěný <@{}> doběhl.", countdown.author_id))
        .color(COLOR_FINISHED)
}

pub fn cancelled_embed(countdown: &Countdown, cancelled_by: u64) -> CreateEmbed {
    base_embed(countdown)
        .title("❌ Odpočet zrušen")
        .description(format!("Odpočet zrušil(a) <@{}>.", cancelled_by))
        .color(COLOR_CANCELLED)
}
