use std::sync::Arc;

use chrono::{Duration, Utc};
use serenity::{all::ChannelId, http::Http};
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{
    bot::notifier,
    error::AppError,
    service::{activity::ActivityService, guild_settings::GuildSettingsService},
    state::AppState,
};

/// Longest play session credited when its end was never observed.
pub const MAX_SESSION_HOURS: i64 = 12;

/// Starts the session sweep scheduler
///
/// This scheduler runs every five minutes and:
/// - Closes gaming sessions older than 12 hours, crediting at most 12 hours of play
/// - Expires quiz rounds whose time limit passed
/// - Drops idle per-member locks
///
/// # Arguments
/// - `state`: Shared application state
/// - `discord_http`: Discord HTTP client for announcements
pub async fn start_scheduler(state: AppState, discord_http: Arc<Http>) -> Result<(), AppError> {
    let scheduler = JobScheduler::new().await?;

    let job_state = state.clone();
    let job_http = discord_http.clone();

    let job = Job::new_async("0 */5 * * * *", move |_uuid, _lock| {
        let state = job_state.clone();
        let http = job_http.clone();

        Box::pin(async move {
            if let Err(e) = sweep(&state, http).await {
                tracing::error!("Error sweeping sessions: {}", e);
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Session sweep scheduler started");

    Ok(())
}

/// Runs one sweep.
async fn sweep(state: &AppState, discord_http: Arc<Http>) -> Result<(), AppError> {
    let now = Utc::now();

    let expired = state.sessions.quizzes.expire(|_, round| round.is_expired(now));
    if !expired.is_empty() {
        tracing::debug!("Expired {} quiz rounds", expired.len());
    }

    let live = &state.sessions;
    if !(live.countdowns.is_empty() && live.polls.is_empty() && live.quizzes.is_empty()) {
        tracing::debug!(
            "Live sessions: {} countdowns, {} polls, {} quizzes",
            live.countdowns.len(),
            live.polls.len(),
            live.quizzes.len()
        );
    }

    let pruned = state.locks.prune();
    if pruned > 0 {
        tracing::debug!("Pruned {} idle member locks", pruned);
    }

    let service = ActivityService::new(&state.db, &state.catalog, &state.locks, &state.defaults);
    let swept = service
        .sweep_stale(now, Duration::hours(MAX_SESSION_HOURS))
        .await?;

    let settings = GuildSettingsService::new(&state.db, &state.defaults);
    for closed in swept {
        if closed.update.events.is_empty() {
            continue;
        }

        let guild_id = closed.session.guild_id;
        let channel = match settings.get(guild_id).await {
            Ok(settings) => settings.announce_channel_id,
            Err(e) => {
                tracing::error!("Failed to load settings of guild {}: {}", guild_id, e);
                continue;
            }
        };

        if let Some(channel_id) = channel {
            notifier::announce(
                &discord_http,
                ChannelId::new(channel_id),
                closed.session.user_id,
                &closed.update.events,
            )
            .await;
        }
    }

    Ok(())
}
