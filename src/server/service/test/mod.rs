use chrono::{Duration, SubsecRound, Utc};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

use crate::server::{
    error::{progress::ProgressError, AppError},
    progression::{catalog::GameCatalog, event::ProgressEvent, rules::ProgressionRules},
    service::lock::UserLocks,
};

mod guild_settings;
mod progress;

fn engine_parts() -> (GameCatalog, UserLocks, ProgressionRules) {
    (
        GameCatalog::default(),
        UserLocks::new(),
        ProgressionRules::default(),
    )
}
