pub use sea_orm_migration::prelude::*;

mod m20260105_000001_create_user_progress_table;
mod m20260105_000002_create_game_time_table;
mod m20260105_000003_create_completed_quest_table;
mod m20260105_000004_create_unlocked_game_table;
mod m20260106_000005_create_game_session_table;
mod m20260106_000006_create_guild_settings_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260105_000001_create_user_progress_table::Migration),
            Box::new(m20260105_000002_create_game_time_table::Migration),
            Box::new(m20260105_000003_create_completed_quest_table::Migration),
            Box::new(m20260105_000004_create_unlocked_game_table::Migration),
            Box::new(m20260106_000005_create_game_session_table::Migration),
            Box::new(m20260106_000006_create_guild_settings_table::Migration),
        ]
    }
}
