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
                    .table(UnlockedGame::Table)
                    .if_not_exists()
                    .col(integer(UnlockedGame::ProgressId))
                    .col(string(UnlockedGame::GameName))
                    .col(
                        timestamp_with_time_zone(UnlockedGame::UnlockedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .primary_key(
                        Index::create()
                            .col(UnlockedGame::ProgressId)
                            .col(UnlockedGame::GameName),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_unlocked_game_progress_id")
                            .from(UnlockedGame::Table, UnlockedGame::ProgressId)
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
            .drop_table(Table::drop().table(UnlockedGame::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum UnlockedGame {
    Table,
    ProgressId,
    GameName,
    UnlockedAt,
}
