//! `/poll` and `!poll`: button polls with live results.

use std::sync::Arc;

use chrono::Utc;
use serenity::{
    all::{
        ButtonStyle, ChannelId, CommandInteraction, CommandOptionType, Context, CreateActionRow,
        CreateButton, CreateCommand, CreateCommandOption, CreateEmbed, CreateEmbedFooter,
        CreateMessage, EditMessage, Message, MessageId,
    },
    http::Http,
};

use crate::server::{
    bot::{
        command::{button_rows, respond_embed, string_option},
        component::ComponentAction,
    },
    error::{session::SessionError, AppError},
    session::{
        countdown::parse_bounded,
        poll::{
            ends_at, parse_options, parse_question_and_options, tick_interval, Poll,
            MIN_POLL_SECS, NUMBER_EMOJIS,
        },
        registry::Registry,
    },
    state::AppState,
};

pub const NAME: &str = "poll";
/// Prefix command aliases.
pub const ALIASES: [&str; 3] = ["poll", "anketa", "hlasovani"];

const DEFAULT_DURATION: &str = "5m";
const COLOR_RUNNING: u32 = 0x3498db;
const COLOR_FINISHED: u32 = 0x2ecc71;

pub fn definition() -> CreateCommand {
    CreateCommand::new(NAME)
        .description("Vytvoří anketu")
        .add_option(
            CreateCommandOption::new(CommandOptionType::String, "otazka", "Otázka ankety")
                .required(true),
        )
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::String,
                "moznosti",
                "Možnosti oddělené čárkou (2-10)",
            )
            .required(true),
        )
        .add_option(CreateCommandOption::new(
            CommandOptionType::String,
            "cas",
            "Délka ankety, např. 30s, 5m, 1h (výchozí 5m)",
        ))
}

pub async fn run(ctx: &Context, command: &CommandInteraction, state: &AppState) -> Result<(), AppError> {
    let question = string_option(command, "otazka").unwrap_or_default().trim().to_string();
    let options = parse_options(string_option(command, "moznosti").unwrap_or_default());
    let seconds = parse_bounded(
        string_option(command, "cas").unwrap_or(DEFAULT_DURATION),
        MIN_POLL_SECS,
    )?;

    let poll = Poll::new(
        question,
        options,
        command.user.id.get(),
        command.channel_id.get(),
        ends_at(Utc::now(), seconds),
    )?;

    respond_embed(ctx, command, running_embed(&poll), vote_buttons(&poll)).await?;
    let message = command.get_response(&ctx.http).await?;

    start(ctx.http.clone(), state, &message, poll);

    Ok(())
}

/// Handles `!poll <cas> Otázka? | A, B, C`.
pub async fn run_prefix(
    ctx: &Context,
    message: &Message,
    args: &str,
    state: &AppState,
) -> Result<(), AppError> {
    let (duration, rest) = args
        .trim()
        .split_once(char::is_whitespace)
        .ok_or(SessionError::MissingPollSeparator)?;
    let seconds = parse_bounded(duration, MIN_POLL_SECS)?;
    let (question, options) = parse_question_and_options(rest)?;

    let poll = Poll::new(
        question,
        options,
        message.author.id.get(),
        message.channel_id.get(),
        ends_at(Utc::now(), seconds),
    )?;

    let sent = message
        .channel_id
        .send_message(
            &ctx.http,
            CreateMessage::new()
                .embed(running_embed(&poll))
                .components(vote_buttons(&poll)),
        )
        .await?;

    start(ctx.http.clone(), state, &sent, poll);

    Ok(())
}

fn start(http: Arc<Http>, state: &AppState, message: &Message, poll: Poll) {
    tracing::info!(
        "Poll {} started by user {} with {} options",
        message.id,
        poll.author_id,
        poll.options.len()
    );

    let channel_id = ChannelId::new(poll.channel_id);
    state.sessions.polls.create(message.id.get(), poll);

    tokio::spawn(run_loop(
        http,
        state.sessions.polls.clone(),
        channel_id,
        message.id,
    ));
}

/// Refreshes the results until the poll closes, then posts the final results.
async fn run_loop(
    http: Arc<Http>,
    polls: Registry<u64, Poll>,
    channel_id: ChannelId,
    message_id: MessageId,
) {
    let key = message_id.get();

    loop {
        let Some(poll) = polls.get(&key) else {
            return;
        };
        let remaining = poll.remaining_secs(Utc::now());
        if remaining <= 0 {
            break;
        }

        tokio::time::sleep(tick_interval(remaining).min(std::time::Duration::from_secs(
            remaining.unsigned_abs(),
        )))
        .await;

        let Some(poll) = polls.get(&key) else {
            return;
        };
        let edit = EditMessage::new().embed(running_embed(&poll));
        if let Err(e) = channel_id.edit_message(&http, message_id, edit).await {
            tracing::warn!("Stopping poll {}, message update failed: {}", message_id, e);
            polls.finalize(&key);
            return;
        }
    }

    let Some(poll) = polls.finalize(&key) else {
        return;
    };

    tracing::info!(
        "Poll {} closed with {} votes",
        message_id,
        poll.total_votes()
    );

    let edit = EditMessage::new()
        .embed(finished_embed(&poll))
        .components(vec![]);
    if let Err(e) = channel_id.edit_message(&http, message_id, edit).await {
        tracing::error!("Failed to close poll message {}: {}", message_id, e);
    }
}

fn vote_buttons(poll: &Poll) -> Vec<CreateActionRow> {
    let buttons = poll
        .options
        .iter()
        .enumerate()
        .map(|(index, option)| {
            CreateButton::new(ComponentAction::Vote(index).custom_id())
                .label(truncate_label(&format!("{} {}", NUMBER_EMOJIS[index], option)))
                .style(ButtonStyle::Secondary)
        })
        .collect();

    button_rows(buttons)
}

/// Discord rejects button labels longer than 80 characters.
fn truncate_label(label: &str) -> String {
    label.chars().take(80).collect()
}

/// Result lines of a poll, one per option.
pub fn results_text(poll: &Poll) -> String {
    poll.results()
        .iter()
        .enumerate()
        .map(|(index, result)| {
            format!(
                "{} **{}**\n{} {} ({:.1}%)",
                NUMBER_EMOJIS[index],
                result.label,
                result.bar(),
                result.votes,
                result.percentage
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn running_embed(poll: &Poll) -> CreateEmbed {
    CreateEmbed::new()
        .title(format!("📊 {}", poll.question))
        .description(results_text(poll))
        .field(
            "Konec",
            format!("<t:{}:R>", poll.ends_at.timestamp()),
            true,
        )
        .field("Hlasů", poll.total_votes().to_string(), true)
        .footer(CreateEmbedFooter::new("Hlasuj kliknutím na tlačítko"))
        .color(COLOR_RUNNING)
}

fn finished_embed(poll: &Poll) -> CreateEmbed {
    let winners = poll.winners();
    let verdict = match winners.as_slice() {
        [] => "Nikdo nehlasoval.".to_string(),
        [winner] => format!("🏆 Vítěz: **{}**", winner.label),
        tied => format!(
            "🤝 Remíza: {}",
            tied.iter()
                .map(|w| format!("**{}**", w.label))
                .collect::<Vec<_>>()
                .join(", ")
        ),
    };

    CreateEmbed::new()
        .title(format!("📊 {} (ukončeno)", poll.question))
        .description(format!("{}\n\n{}", results_text(poll), verdict))
        .field("Celkem hlasů", poll.total_votes().to_string(), true)
        .color(COLOR_FINISHED)
}
