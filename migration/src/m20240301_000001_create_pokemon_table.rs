use sea_orm_migration::prelude::*;

/// Creates the `pokemons` table with unique `number` and `name`.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Pokemons {
    Table,
    Id,
    Number,
    Name,
    Attack,
    Defense,
    PokeType,
    ImageUrl,
    Captured,
    CreatedAt,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Pokemons::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Pokemons::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Pokemons::Number).integer().not_null())
                    .col(ColumnDef::new(Pokemons::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Pokemons::Attack).integer().not_null())
                    .col(ColumnDef::new(Pokemons::Defense).integer().not_null())
                    .col(ColumnDef::new(Pokemons::PokeType).string().not_null())
                    .col(ColumnDef::new(Pokemons::ImageUrl).string().not_null())
                    .col(
                        ColumnDef::new(Pokemons::Captured)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Pokemons::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Pokemons::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_pokemons_number")
                    .table(Pokemons::Table)
                    .col(Pokemons::Number)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_pokemons_name")
                    .table(Pokemons::Table)
                    .col(Pokemons::Name)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Pokemons::Table).to_owned())
            .await
    }
}
