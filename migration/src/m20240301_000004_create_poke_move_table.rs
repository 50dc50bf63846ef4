use sea_orm_migration::prelude::*;

/// Creates the `poke_moves` join table between pokemons and moves.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PokeMoves::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PokeMoves::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PokeMoves::PokemonId).integer().not_null())
                    .col(ColumnDef::new(PokeMoves::MoveId).integer().not_null())
                    .col(
                        ColumnDef::new(PokeMoves::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PokeMoves::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_poke_moves_pokemon_id")
                            .from(PokeMoves::Table, PokeMoves::PokemonId)
                            .to(Pokemons::Table, Pokemons::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_poke_moves_move_id")
                            .from(PokeMoves::Table, PokeMoves::MoveId)
                            .to(Moves::Table, Moves::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // A pokemon knows each move at most once
        manager
            .create_index(
                Index::create()
                    .name("idx_poke_moves_pokemon_id_move_id")
                    .table(PokeMoves::Table)
                    .col(PokeMoves::PokemonId)
                    .col(PokeMoves::MoveId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Reverse lookup from a move to the pokemon that know it
        manager
            .create_index(
                Index::create()
                    .name("idx_poke_moves_move_id")
                    .table(PokeMoves::Table)
                    .col(PokeMoves::MoveId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PokeMoves::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum PokeMoves {
    Table,
    Id,
    PokemonId,
    MoveId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Pokemons {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Moves {
    Table,
    Id,
}
