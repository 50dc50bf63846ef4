use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pokemons")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub number: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub attack: i32,
    pub defense: i32,
    pub poke_type: String,
    pub image_url: String,
    pub captured: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::item::Entity")]
    Items,
    #[sea_orm(has_many = "super::poke_move::Entity")]
    PokeMoves,
}

impl Related<super::item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Items.def()
    }
}

impl Related<super::poke_move::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PokeMoves.def()
    }
}

impl Related<super::moves::Entity> for Entity {
    fn to() -> RelationDef {
        super::poke_move::Relation::Move.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::poke_move::Relation::Pokemon.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
