use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user_progress")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub guild_id: String,
    pub user_id: String,
    pub xp: i64,
    pub streak: i32,
    pub last_daily_claim: Option<DateTimeUtc>,
    pub daily_game_xp: i64,
    pub last_game_xp_reset: DateTimeUtc,
    pub total_games: i64,
    pub total_correct: i64,
    pub version: i32,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::game_time::Entity")]
    GameTime,
    #[sea_orm(has_many = "super::completed_quest::Entity")]
    CompletedQuest,
    #[sea_orm(has_many = "super::unlocked_game::Entity")]
    UnlockedGame,
}

impl Related<super::game_time::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GameTime.def()
    }
}

impl Related<super::completed_quest::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CompletedQuest.def()
    }
}

impl Related<super::unlocked_game::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UnlockedGame.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
