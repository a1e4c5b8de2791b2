use crate::server::data::user_progress::{SaveOutcome, UserProgressRepository};
use chrono::{Duration, TimeZone, Utc};
use sea_orm::{ColumnTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter};
use test_utils::{builder::TestBuilder, factory};

mod find;
mod get_or_create;
mod leaderboard;
mod save;
