pub use sea_orm_migration::prelude::*;

mod m20240301_000001_create_pokemon_table;
mod m20240301_000002_create_item_table;
mod m20240301_000003_create_move_table;
mod m20240301_000004_create_poke_move_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240301_000001_create_pokemon_table::Migration),
            Box::new(m20240301_000002_create_item_table::Migration),
            Box::new(m20240301_000003_create_move_table::Migration),
            Box::new(m20240301_000004_create_poke_move_table::Migration),
        ]
    }
}
