use crate::server::data::game_session::GameSessionRepository;
use chrono::{Duration, SubsecRound, Utc};
use entity::prelude::GameSession;
use sea_orm::{DbErr, EntityTrait, PaginatorTrait};
use test_utils::{builder::TestBuilder, factory};

mod delete;
mod find_started_before;
mod upsert;
