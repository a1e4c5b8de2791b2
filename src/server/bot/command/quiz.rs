//! `/quiz`: one multiple-choice question answered with buttons.

use std::sync::Arc;

use chrono::Utc;
use serenity::{
    all::{
        ButtonStyle, ChannelId, CommandInteraction, CommandOptionType, Context, CreateButton,
        CreateCommand, CreateCommandOption, CreateEmbed, CreateEmbedFooter, EditMessage,
        MessageId,
    },
    http::Http,
};

use crate::server::{
    bot::{
        command::{button_rows, require_guild, respond_embed, string_option},
        component::ComponentAction,
    },
    error::AppError,
    progression::catalog::Difficulty,
    session::{
        quiz::{generate, QuizKind, QuizRound},
        registry::Registry,
    },
    state::AppState,
};

pub const NAME: &str = "quiz";

const OPTION_LETTERS: [&str; 4] = ["A", "B", "C", "D"];
const COLOR_QUESTION: u32 = 0x9b59b6;
const COLOR_CORRECT: u32 = 0x2ecc71;
const COLOR_WRONG: u32 = 0xe74c3c;
const COLOR_EXPIRED: u32 = 0x95a5a6;

pub fn definition() -> CreateCommand {
    CreateCommand::new(NAME)
        .description("Odpověz na otázku a získej XP")
        .add_option(
            CreateCommandOption::new(CommandOptionType::String, "obtiznost", "Obtížnost otázky")
                .add_string_choice("Lehká", "easy")
                .add_string_choice("Střední", "medium")
                .add_string_choice("Těžká", "hard"),
        )
        .add_option(
            CreateCommandOption::new(CommandOptionType::String, "typ", "Druh otázky")
                .add_string_choice("Příklad", "math")
                .add_string_choice("Rovnice", "equation")
                .add_string_choice("Hlavolam", "puzzle")
                .add_string_choice("Vědomostní", "trivia"),
        )
}

fn difficulty_label(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Easy => "Lehká",
        Difficulty::Medium => "Střední",
        Difficulty::Hard => "Těžká",
    }
}

pub async fn run(ctx: &Context, command: &CommandInteraction, state: &AppState) -> Result<(), AppError> {
    let guild_id = require_guild(command)?;
    let difficulty = string_option(command, "obtiznost")
        .and_then(Difficulty::parse)
        .unwrap_or(Difficulty::Easy);
    let kind = string_option(command, "typ")
        .and_then(QuizKind::parse)
        .unwrap_or(QuizKind::Math);

    let tier = state.catalog.trivia_tier(difficulty);
    let question = generate(kind, difficulty, &state.catalog, &mut rand::rng());
    let round = QuizRound::new(
        command.user.id.get(),
        guild_id,
        difficulty,
        question,
        Utc::now(),
        tier.time_limit_secs,
    );

    respond_embed(ctx, command, question_embed(&round, tier.xp_reward), answer_buttons()).await?;
    let message = command.get_response(&ctx.http).await?;

    tracing::debug!(
        "Quiz {} ({} {}) started by user {}",
        message.id,
        difficulty.as_str(),
        round.question.kind.as_str(),
        round.owner_id
    );

    state.sessions.quizzes.create(message.id.get(), round.clone());
    tokio::spawn(expire_later(
        ctx.http.clone(),
        state.sessions.quizzes.clone(),
        message.channel_id,
        message.id,
        round,
    ));

    Ok(())
}

/// Closes the round once its time limit passes without an answer.
async fn expire_later(
    http: Arc<Http>,
    quizzes: Registry<u64, QuizRound>,
    channel_id: ChannelId,
    message_id: MessageId,
    round: QuizRound,
) {
    let wait = (round.expires_at - Utc::now()).to_std().unwrap_or_default();
    tokio::time::sleep(wait).await;

    // Already answered.
    if quizzes.finalize(&message_id.get()).is_none() {
        return;
    }

    let edit = EditMessage::new()
        .embed(expired_embed(&round))
        .components(vec![]);
    if let Err(e) = channel_id.edit_message(&http, message_id, edit).await {
        tracing::warn!("Failed to close expired quiz {}: {}", message_id, e);
    }
}

fn answer_buttons() -> Vec<serenity::all::CreateActionRow> {
    let buttons = OPTION_LETTERS
        .iter()
        .enumerate()
        .map(|(index, letter)| {
            CreateButton::new(ComponentAction::Answer(index).custom_id())
                .label(*letter)
                .style(ButtonStyle::Primary)
        })
        .collect();

    button_rows(buttons)
}

fn options_text(round: &QuizRound) -> String {
    round
        .question
        .options
        .iter()
        .zip(OPTION_LETTERS)
        .map(|(option, letter)| format!("**{}** {}", letter, option))
        .collect::<Vec<_>>()
        .join("\n")
}

fn question_embed(round: &QuizRound, xp_reward: u64) -> CreateEmbed {
    CreateEmbed::new()
        .title(format!("🧠 Kvíz ({})", difficulty_label(round.difficulty)))
        .description(format!("**{}**\n\n{}", round.question.text, options_text(round)))
        .footer(CreateEmbedFooter::new(format!(
            "Odměna {} XP, čas na odpověď do {} UTC",
            xp_reward,
            round.expires_at.format("%H:%M:%S")
        )))
        .color(COLOR_QUESTION)
}

pub fn result_embed(round: &QuizRound, choice: usize, correct: bool, xp: u64) -> CreateEmbed {
    let correct_letter = OPTION_LETTERS
        .get(round.question.answer)
        .copied()
        .unwrap_or("?");
    let chosen_letter = OPTION_LETTERS.get(choice).copied().unwrap_or("?");

    let (title, verdict, color) = if correct {
        (
            "✅ Správně!",
            format!("<@{}> odpověděl(a) správně a získává **+{} XP**!", round.owner_id, xp),
            COLOR_CORRECT,
        )
    } else {
        (
            "❌ Špatně!",
            format!(
                "<@{}> zvolil(a) **{}**, správně bylo **{}: {}**.",
                round.owner_id,
                chosen_letter,
                correct_letter,
                round.question.correct_option()
            ),
            COLOR_WRONG,
        )
    };

    CreateEmbed::new()
        .title(title)
        .description(format!("**{}**\n\n{}", round.question.text, verdict))
        .color(color)
}

fn expired_embed(round: &QuizRound) -> CreateEmbed {
    CreateEmbed::new()
        .title("⌛ Čas vypršel!")
        .description(format!(
            "**{}**\n\nSprávná odpověď: **{}**",
            round.question.text,
            round.question.correct_option()
        ))
        .color(COLOR_EXPIRED)
}
