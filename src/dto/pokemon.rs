use serde::Serialize;

use super::ItemResponse;
use crate::entities::{item, moves, pokemon};

/// Image shown for pokemon that have not been captured yet.
pub const UNKNOWN_IMAGE: &str = "/images/unknown.png";

/// The image a client may see: the stored one only once captured.
pub fn visible_image(pokemon: &pokemon::Model) -> String {
    if pokemon.captured {
        pokemon.image_url.clone()
    } else {
        UNKNOWN_IMAGE.to_string()
    }
}

/// Entry of the pokemon index.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PokemonSummary {
    pub id: i32,
    pub number: i32,
    pub name: String,
    pub image_url: String,
    pub captured: bool,
}

impl From<&pokemon::Model> for PokemonSummary {
    fn from(p: &pokemon::Model) -> Self {
        Self {
            id: p.id,
            number: p.number,
            name: p.name.clone(),
            image_url: visible_image(p),
            captured: p.captured,
        }
    }
}

/// Full pokemon view with its move names and items.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PokemonDetail {
    pub id: i32,
    pub number: i32,
    pub name: String,
    pub attack: i32,
    pub defense: i32,
    #[serde(rename = "type")]
    pub poke_type: String,
    pub image_url: String,
    pub captured: bool,
    pub created_at: String,
    pub updated_at: String,
    pub moves: Vec<String>,
    pub items: Vec<ItemResponse>,
}

impl PokemonDetail {
    pub fn new(pokemon: pokemon::Model, moves: &[moves::Model], items: &[item::Model]) -> Self {
        Self {
            image_url: visible_image(&pokemon),
            id: pokemon.id,
            number: pokemon.number,
            name: pokemon.name,
            attack: pokemon.attack,
            defense: pokemon.defense,
            poke_type: pokemon.poke_type,
            captured: pokemon.captured,
            created_at: pokemon.created_at.to_rfc3339(),
            updated_at: pokemon.updated_at.to_rfc3339(),
            moves: moves.iter().map(|m| m.name.clone()).collect(),
            items: items.iter().map(ItemResponse::from).collect(),
        }
    }
}
