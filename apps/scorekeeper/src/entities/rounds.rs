use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "rounds")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(column_name = "game_id")]
    pub game_id: String,
    #[sea_orm(column_name = "round_no", column_type = "SmallInteger")]
    pub round_no: i16,
    pub locked: bool,
    /// 1 = bare special counts, 2 = paired counts
    #[sea_orm(column_name = "schema_version", column_type = "SmallInteger")]
    pub schema_version: i16,
    #[sea_orm(column_type = "Json")]
    pub bids: Json,
    #[sea_orm(column_type = "Json")]
    pub results: Json,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::games::Entity",
        from = "Column::GameId",
        to = "super::games::Column::Id",
        on_delete = "Cascade"
    )]
    Game,
}

impl Related<super::games::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Game.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
