//! Presence handler feeding the game activity tracker.
//!
//! The first `Playing` activity of a member counts as the game being played; a presence
//! without one means the member stopped. Bots are ignored.

use chrono::Utc;
use serenity::all::{ActivityType, ChannelId, Context, Presence};

use crate::server::{
    bot::notifier,
    progression::activity::ActivitySignal,
    service::{activity::ActivityService, guild_settings::GuildSettingsService},
    state::AppState,
};

/// Activity signal carried by a presence.
pub fn signal_from_presence(presence: &Presence) -> ActivitySignal {
    presence
        .activities
        .iter()
        .find(|activity| activity.kind == ActivityType::Playing)
        .map(|activity| ActivitySignal::Playing(activity.name.clone()))
        .unwrap_or(ActivitySignal::Idle)
}

pub async fn handle_presence_update(state: &AppState, ctx: Context, presence: Presence) {
    let Some(guild_id) = presence.guild_id else {
        return;
    };
    if presence.user.bot == Some(true) {
        return;
    }

    let guild_id = guild_id.get();
    let user_id = presence.user.id.get();
    let signal = signal_from_presence(&presence);

    let service = ActivityService::new(&state.db, &state.catalog, &state.locks, &state.defaults);
    let update = match service
        .handle_signal(guild_id, user_id, signal, Utc::now())
        .await
    {
        Ok(Some(update)) => update,
        Ok(None) => return,
        Err(e) => {
            tracing::error!(
                "Failed to track activity of user {} in guild {}: {}",
                user_id,
                guild_id,
                e
            );
            return;
        }
    };

    if update.events.is_empty() {
        return;
    }

    let settings = GuildSettingsService::new(&state.db, &state.defaults);
    match settings.get(guild_id).await {
        Ok(settings) => match settings.announce_channel_id {
            Some(channel_id) => {
                notifier::announce(&ctx.http, ChannelId::new(channel_id), user_id, &update.events)
                    .await;
            }
            None => tracing::debug!(
                "Guild {} has no announcement channel, dropping {} events",
                guild_id,
                update.events.len()
            ),
        },
        Err(e) => tracing::error!("Failed to load settings of guild {}: {}", guild_id, e),
    }
}
