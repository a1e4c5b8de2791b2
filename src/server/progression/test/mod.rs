use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::server::{
    model::progress::UserProgress,
    progression::{
        catalog::GameCatalog,
        event::{ProgressEvent, XpSource},
        rules::ProgressionRules,
        Progression,
    },
};

mod daily;
mod unlock;

/// Fixed reference time so that tests never depend on the wall clock.
fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 10, 12, 0, 0).unwrap()
}

fn progress() -> UserProgress {
    UserProgress::new(1, 100, now())
}

fn level_ups(events: &[ProgressEvent]) -> Vec<u32> {
    events
        .iter()
        .filter_map(|e| match e {
            ProgressEvent::LevelUp { new_level, .. } => Some(*new_level),
            _ => None,
        })
        .collect()
}

fn quest_names(events: &[ProgressEvent]) -> Vec<String> {
    events
        .iter()
        .filter_map(|e| match e {
            ProgressEvent::QuestCompleted { quest_name, .. } => Some(quest_name.clone()),
            _ => None,
        })
        .collect()
}
