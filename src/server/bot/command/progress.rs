//! `/level`, `/daily`, `/leaderboard` and `/quests`.

use chrono::Utc;
use serenity::all::{
    CommandInteraction, CommandOptionType, Context, CreateCommand, CreateCommandOption,
    CreateEmbed, CreateEmbedFooter,
};

use crate::server::{
    bot::{
        command::{require_guild, respond_embed, respond_ephemeral, string_option, user_option},
        notifier,
    },
    error::{
        progress::{format_remaining, ProgressError},
        AppError,
    },
    model::progress::{LeaderboardEntry, UserProgress},
    progression::{catalog::GameCatalog, event::ProgressEvent},
    service::progress::ProgressService,
    state::AppState,
};

pub const LEVEL: &str = "level";
pub const DAILY: &str = "daily";
pub const LEADERBOARD: &str = "leaderboard";
pub const QUESTS: &str = "quests";

const LEADERBOARD_SIZE: u64 = 10;
/// Games listed by `/quests` without a game argument.
const TOP_GAMES: usize = 10;
const COLOR: u32 = 0x3498db;

pub fn level_definition() -> CreateCommand {
    CreateCommand::new(LEVEL)
        .description("Zobrazí level a XP")
        .add_option(CreateCommandOption::new(
            CommandOptionType::User,
            "uzivatel",
            "Čí level zobrazit",
        ))
}

pub fn daily_definition() -> CreateCommand {
    CreateCommand::new(DAILY).description("Vyzvedne denní odměnu")
}

pub fn leaderboard_definition() -> CreateCommand {
    CreateCommand::new(LEADERBOARD).description("Žebříček serveru podle XP")
}

pub fn quests_definition() -> CreateCommand {
    CreateCommand::new(QUESTS)
        .description("Herní questy a odehraný čas")
        .add_option(CreateCommandOption::new(
            CommandOptionType::String,
            "hra",
            "Název hry",
        ))
}

fn service(state: &AppState) -> ProgressService<'_> {
    ProgressService::new(&state.db, &state.catalog, &state.locks, &state.defaults)
}

pub async fn run_level(
    ctx: &Context,
    command: &CommandInteraction,
    state: &AppState,
) -> Result<(), AppError> {
    let guild_id = require_guild(command)?;
    let user_id = user_option(command, "uzivatel")
        .unwrap_or(command.user.id)
        .get();

    let progress = service(state)
        .get(guild_id, user_id)
        .await?
        .unwrap_or_else(|| UserProgress::new(guild_id, user_id, Utc::now()));

    respond_embed(ctx, command, level_embed(&progress), vec![]).await
}

pub fn level_embed(progress: &UserProgress) -> CreateEmbed {
    CreateEmbed::new()
        .title("📊 Level")
        .description(format!("<@{}>", progress.user_id))
        .field("Level", progress.level().to_string(), true)
        .field("XP", progress.xp.to_string(), true)
        .field(
            "Do dalšího levelu",
            format!("{} XP", progress.xp_to_next_level()),
            true,
        )
        .field("🔥 Streak", progress.streak.to_string(), true)
        .field(
            "🧠 Kvízy",
            format!(
                "{}/{} ({:.1}%)",
                progress.total_correct,
                progress.total_games,
                progress.accuracy()
            ),
            true,
        )
        .field(
            "🎮 Odemčené hry",
            progress.unlocked_games.len().to_string(),
            true,
        )
        .color(COLOR)
}

pub async fn run_daily(
    ctx: &Context,
    command: &CommandInteraction,
    state: &AppState,
) -> Result<(), AppError> {
    let guild_id = require_guild(command)?;
    let user_id = command.user.id.get();

    let update = match service(state).claim_daily(guild_id, user_id, Utc::now()).await {
        Ok(update) => update,
        Err(AppError::ProgressErr(ProgressError::AlreadyClaimed { remaining })) => {
            let content = format!(
                "⏰ Denní odměnu už jsi vyzvedl(a)! Další za **{}**.",
                format_remaining(&remaining)
            );
            return respond_ephemeral(ctx, command, &content).await;
        }
        Err(err) => return Err(err),
    };

    let bonus = ProgressEvent::DailyBonusGranted {
        base: update.value.base,
        streak_bonus: update.value.streak_bonus,
        streak: update.value.streak,
    };
    let embed = notifier::embed(&bonus, user_id).footer(CreateEmbedFooter::new(format!(
        "Celkem {} XP, level {}",
        update.progress.xp,
        update.progress.level()
    )));
    respond_embed(ctx, command, embed, vec![]).await?;

    notifier::announce(&ctx.http, command.channel_id, user_id, &update.events).await;

    Ok(())
}

pub async fn run_leaderboard(
    ctx: &Context,
    command: &CommandInteraction,
    state: &AppState,
) -> Result<(), AppError> {
    let guild_id = require_guild(command)?;
    let entries = service(state)
        .leaderboard(guild_id, LEADERBOARD_SIZE)
        .await?;

    respond_embed(ctx, command, leaderboard_embed(&entries), vec![]).await
}

fn medal(rank: u32) -> String {
    match rank {
        1 => "🥇".to_string(),
        2 => "🥈".to_string(),
        3 => "🥉".to_string(),
        rank => format!("**{}.**", rank),
    }
}

pub fn leaderboard_text(entries: &[LeaderboardEntry]) -> String {
    if entries.is_empty() {
        return "Zatím nikdo nemá žádné XP.".to_string();
    }

    entries
        .iter()
        .map(|entry| {
            format!(
                "{} <@{}> level {} ({} XP)",
                medal(entry.rank),
                entry.user_id,
                entry.level(),
                entry.xp
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn leaderboard_embed(entries: &[LeaderboardEntry]) -> CreateEmbed {
    CreateEmbed::new()
        .title("🏆 Žebříček")
        .description(leaderboard_text(entries))
        .color(COLOR)
}

pub async fn run_quests(
    ctx: &Context,
    command: &CommandInteraction,
    state: &AppState,
) -> Result<(), AppError> {
    let guild_id = require_guild(command)?;
    let user_id = command.user.id.get();

    let progress = service(state)
        .get(guild_id, user_id)
        .await?
        .unwrap_or_else(|| UserProgress::new(guild_id, user_id, Utc::now()));

    let embed = match string_option(command, "hra").map(str::trim) {
        Some(game) if !game.is_empty() => CreateEmbed::new()
            .title(format!("🎯 Questy: {}", game))
            .description(quest_text(&progress, &state.catalog, game)),
        _ => CreateEmbed::new()
            .title("🎮 Odehraný čas")
            .description(played_games_text(&progress))
            .footer(CreateEmbedFooter::new("Questy konkrétní hry: /quests hra:<název>")),
    };

    respond_embed(ctx, command, embed.color(COLOR), vec![]).await
}

/// Quest checklist of `game`.
pub fn quest_text(progress: &UserProgress, catalog: &GameCatalog, game: &str) -> String {
    let minutes = progress.game_minutes(game);

    let lines: Vec<String> = catalog
        .quests_for(game)
        .iter()
        .enumerate()
        .map(|(index, quest)| {
            let mark = if progress.has_completed_quest(game, index) {
                "✅"
            } else {
                "⬜"
            };
            format!(
                "{} **{}** ({} h, +{} XP)",
                mark,
                quest.name,
                quest.minutes / 60,
                quest.xp_reward
            )
        })
        .collect();

    format!(
        "Odehráno: **{} h {} min**\n\n{}",
        minutes / 60,
        minutes % 60,
        lines.join("\n")
    )
}

/// Games by play time, longest first.
pub fn played_games_text(progress: &UserProgress) -> String {
    if progress.game_times.is_empty() {
        return "Zatím žádné odehrané hry.".to_string();
    }

    let mut games: Vec<(&String, &u64)> = progress.game_times.iter().collect();
    games.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

    games
        .into_iter()
        .take(TOP_GAMES)
        .map(|(game, minutes)| format!("**{}**: {} h {} min", game, minutes / 60, minutes % 60))
        .collect::<Vec<_>>()
        .join("\n")
}
