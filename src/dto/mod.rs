pub mod item;
pub mod pokemon;

pub use item::{DeletedResponse, ItemResponse};
pub use pokemon::{PokemonDetail, PokemonSummary, UNKNOWN_IMAGE, visible_image};
