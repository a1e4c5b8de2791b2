use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "completed_quest")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub progress_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub game_name: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub quest_index: i32,
    pub completed_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user_progress::Entity",
        from = "Column::ProgressId",
        to = "super::user_progress::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    UserProgress,
}

impl Related<super::user_progress::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserProgress.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
