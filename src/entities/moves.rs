use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "moves")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::poke_move::Entity")]
    PokeMoves,
}

impl Related<super::poke_move::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PokeMoves.def()
    }
}

impl Related<super::pokemon::Entity> for Entity {
    fn to() -> RelationDef {
        super::poke_move::Relation::Pokemon.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::poke_move::Relation::Move.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
