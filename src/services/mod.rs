pub mod item_service;
pub mod move_service;
pub mod pokemon_service;

pub use item_service::ItemService;
pub use move_service::MoveService;
pub use pokemon_service::PokemonService;
