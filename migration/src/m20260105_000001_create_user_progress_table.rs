use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserProgress::Table)
                    .if_not_exists()
                    .col(pk_auto(UserProgress::Id))
                    .col(string(UserProgress::GuildId))
                    .col(string(UserProgress::UserId))
                    .col(big_integer(UserProgress::Xp).default(0))
                    .col(integer(UserProgress::Streak).default(0))
                    .col(timestamp_with_time_zone_null(UserProgress::LastDailyClaim))
                    .col(big_integer(UserProgress::DailyGameXp).default(0))
                    .col(
                        timestamp_with_time_zone(UserProgress::LastGameXpReset)
                            .default(Expr::current_timestamp()),
                    )
                    .col(big_integer(UserProgress::TotalGames).default(0))
                    .col(big_integer(UserProgress::TotalCorrect).default(0))
                    .col(integer(UserProgress::Version).default(0))
                    .col(
                        timestamp_with_time_zone(UserProgress::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // One progress record per member of a guild
        manager
            .create_index(
                Index::create()
                    .name("idx_user_progress_guild_user")
                    .table(UserProgress::Table)
                    .col(UserProgress::GuildId)
                    .col(UserProgress::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Leaderboard ordering
        manager
            .create_index(
                Index::create()
                    .name("idx_user_progress_guild_xp")
                    .table(UserProgress::Table)
                    .col(UserProgress::GuildId)
                    .col(UserProgress::Xp)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_user_progress_guild_xp")
                    .table(UserProgress::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_user_progress_guild_user")
                    .table(UserProgress::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(UserProgress::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum UserProgress {
    Table,
    Id,
    GuildId,
    UserId,
    Xp,
    Streak,
    LastDailyClaim,
    DailyGameXp,
    LastGameXpReset,
    TotalGames,
    TotalCorrect,
    Version,
    CreatedAt,
}
