pub mod item;
pub mod moves;
pub mod poke_move;
pub mod poke_type;
pub mod pokemon;

pub use poke_type::PokeType;
