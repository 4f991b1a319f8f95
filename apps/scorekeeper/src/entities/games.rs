use sea_orm::entity::prelude::*;
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "games")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
    /// `in-progress` or `completed`
    pub status: String,
    /// Seating-ordered player list
    #[sea_orm(column_type = "Json")]
    pub players: Json,
    #[sea_orm(column_name = "total_rounds", column_type = "SmallInteger")]
    pub total_rounds: i16,
    #[sea_orm(column_name = "current_round", column_type = "SmallInteger")]
    pub current_round: i16,
    #[sea_orm(column_name = "scoring_preset_id")]
    pub scoring_preset_id: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    pub date: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::rounds::Entity")]
    Rounds,
}

impl Related<super::rounds::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Rounds.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
