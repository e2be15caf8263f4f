use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "player_reply")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub stable_id: String,
    #[sea_orm(column_type = "Text")]
    pub data: String,
    pub created_at: DateTime,
    pub retrieved_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
