//! Announcements of progression events.

use std::sync::Arc;

use serenity::{
    all::{ChannelId, CreateEmbed, CreateMessage},
    http::Http,
};

use crate::server::progression::event::ProgressEvent;

const COLOR_LEVEL_UP: u32 = 0xf1c40f;
const COLOR_QUEST: u32 = 0x2ecc71;
const COLOR_UNLOCK: u32 = 0x9b59b6;
const COLOR_DAILY: u32 = 0x3498db;

/// Title, description and color of the announcement for `event`.
pub fn describe(event: &ProgressEvent, user_id: u64) -> (String, String, u32) {
    match event {
        ProgressEvent::LevelUp {
            new_level,
            next_level_xp,
        } => (
            "🎉 Level Up!".to_string(),
            format!(
                "<@{}> dosáhl levelu **{}**!\nDalší level při **{} XP**.",
                user_id, new_level, next_level_xp
            ),
            COLOR_LEVEL_UP,
        ),
        ProgressEvent::QuestCompleted {
            game,
            quest_name,
            xp_reward,
            total_minutes,
        } => (
            "🏆 Quest splněn!".to_string(),
            format!(
                "<@{}> splnil quest **{}** ve hře **{}** ({} h odehráno) a získává **+{} XP**!",
                user_id,
                quest_name,
                game,
                total_minutes / 60,
                xp_reward
            ),
            COLOR_QUEST,
        ),
        ProgressEvent::GameUnlocked {
            game,
            bonus_xp,
            category,
            emoji,
        } => (
            format!("{} Nová hra odemčena!", emoji),
            format!(
                "<@{}> poprvé hraje **{}** ({}) a získává bonus **+{} XP**!",
                user_id, game, category, bonus_xp
            ),
            COLOR_UNLOCK,
        ),
        ProgressEvent::DailyBonusGranted {
            base,
            streak_bonus,
            streak,
        } => (
            "🎁 Denní odměna".to_string(),
            format!(
                "<@{}> získal **{} XP** (základ {} + streak bonus {}).\n🔥 Streak: **{}** {}",
                user_id,
                base + streak_bonus,
                base,
                streak_bonus,
                streak,
                if *streak == 1 { "den" } else { "dní" }
            ),
            COLOR_DAILY,
        ),
    }
}

pub fn embed(event: &ProgressEvent, user_id: u64) -> CreateEmbed {
    let (title, description, color) = describe(event, user_id);

    CreateEmbed::new()
        .title(title)
        .description(description)
        .color(color)
}

/// Posts one embed per event to `channel_id`.
///
/// Daily bonus events are skipped; the `/daily` reply already shows them. Delivery failures
/// are logged and do not stop the remaining announcements.
pub async fn announce(http: &Arc<Http>, channel_id: ChannelId, user_id: u64, events: &[ProgressEvent]) {
    for event in events {
        if matches!(event, ProgressEvent::DailyBonusGranted { .. }) {
            continue;
        }

        let message = CreateMessage::new().embed(embed(event, user_id));
        if let Err(e) = channel_id.send_message(http, message).await {
            tracing::error!(
                "Failed to announce {:?} for user {} in channel {}: {}",
                event,
                user_id,
                channel_id,
                e
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_up_mentions_member_and_next_threshold() {
        let event = ProgressEvent::LevelUp {
            new_level: 3,
            next_level_xp: 900,
        };

        let (_, description, color) = describe(&event, 42);

        assert!(description.contains("<@42>"));
        assert!(description.contains("**3**"));
        assert!(description.contains("900 XP"));
        assert_eq!(color, COLOR_LEVEL_UP);
    }

    #[test]
    fn unlock_uses_game_emoji() {
        let event = ProgressEvent::GameUnlocked {
            game: "Terraria".to_string(),
            bonus_xp: 100,
            category: "Sandbox".to_string(),
            emoji: "🌳".to_string(),
        };

        let (title, description, _) = describe(&event, 1);

        assert!(title.starts_with("🌳"));
        assert!(description.contains("+100 XP"));
    }

    #[test]
    fn daily_bonus_pluralizes_streak() {
        let one = ProgressEvent::DailyBonusGranted {
            base: 50,
            streak_bonus: 0,
            streak: 1,
        };
        let many = ProgressEvent::DailyBonusGranted {
            base: 50,
            streak_bonus: 20,
            streak: 3,
        };

        assert!(describe(&one, 1).1.ends_with("**1** den"));
        assert!(describe(&many, 1).1.contains("**70 XP**"));
        assert!(describe(&many, 1).1.ends_with("**3** dní"));
    }
}
