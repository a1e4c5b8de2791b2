use crate::server::{
    data::guild_settings::GuildSettingsRepository, model::settings::UpdateGuildSettingsParam,
};
use entity::prelude::GuildSettings;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod get;
mod upsert;
