use sea_orm_migration::{prelude::*, schema::*};

use super::m20260105_000001_create_user_progress_table::UserProgress;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GameTime::Table)
                    .if_not_exists()
                    .col(integer(GameTime::ProgressId))
                    .col(string(GameTime::GameName))
                    .col(big_integer(GameTime::Minutes).default(0))
                    .primary_key(
                        Index::create()
                            .col(GameTime::ProgressId)
                            .col(GameTime::GameName),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_game_time_progress_id")
                            .from(GameTime::Table, GameTime::ProgressId)
                            .to(UserProgress::Table, UserProgress::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GameTime::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum GameTime {
    Table,
    ProgressId,
    GameName,
    Minutes,
}
