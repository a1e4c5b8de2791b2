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
                    .table(CompletedQuest::Table)
                    .if_not_exists()
                    .col(integer(CompletedQuest::ProgressId))
                    .col(string(CompletedQuest::GameName))
                    .col(integer(CompletedQuest::QuestIndex))
                    .col(
                        timestamp_with_time_zone(CompletedQuest::CompletedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .primary_key(
                        Index::create()
                            .col(CompletedQuest::ProgressId)
                            .col(CompletedQuest::GameName)
                            .col(CompletedQuest::QuestIndex),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_completed_quest_progress_id")
                            .from(CompletedQuest::Table, CompletedQuest::ProgressId)
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
            .drop_table(Table::drop().table(CompletedQuest::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum CompletedQuest {
    Table,
    ProgressId,
    GameName,
    QuestIndex,
    CompletedAt,
}
