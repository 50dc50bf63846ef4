use serde::Serialize;

use crate::entities::item;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemResponse {
    pub id: i32,
    pub pokemon_id: i32,
    pub name: String,
    pub price: i32,
    pub happiness: i32,
    pub image_url: String,
}

impl From<&item::Model> for ItemResponse {
    fn from(i: &item::Model) -> Self {
        Self {
            id: i.id,
            pokemon_id: i.pokemon_id,
            name: i.name.clone(),
            price: i.price,
            happiness: i.happiness,
            image_url: i.image_url.clone(),
        }
    }
}

/// Body returned by delete endpoints.
#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub id: i32,
}
