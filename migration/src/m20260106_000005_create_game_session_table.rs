use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GameSession::Table)
                    .if_not_exists()
                    .col(string(GameSession::GuildId))
                    .col(string(GameSession::UserId))
                    .col(string(GameSession::GameName))
                    .col(timestamp_with_time_zone(GameSession::StartedAt))
                    .primary_key(
                        Index::create()
                            .col(GameSession::GuildId)
                            .col(GameSession::UserId),
                    )
                    .to_owned(),
            )
            .await?;

        // Stale session sweep scans by start time
        manager
            .create_index(
                Index::create()
                    .name("idx_game_session_started_at")
                    .table(GameSession::Table)
                    .col(GameSession::StartedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_game_session_started_at")
                    .table(GameSession::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(GameSession::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum GameSession {
    Table,
    GuildId,
    UserId,
    GameName,
    StartedAt,
}
