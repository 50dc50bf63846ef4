use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, SqlErr, TransactionTrait,
};

use crate::dto::PokemonDetail;
use crate::entities::{item, poke_move, pokemon};
use crate::error::AppError;
use crate::services::{ItemService, MoveService};
use crate::validation::{PokemonDraft, PokemonForm, ValidPokemon, ValidationErrors, rules};

pub struct PokemonService;

impl PokemonService {
    /// All pokemon, ordered by pokedex number.
    pub async fn list(db: &DatabaseConnection) -> Result<Vec<pokemon::Model>, AppError> {
        let all = pokemon::Entity::find()
            .order_by_asc(pokemon::Column::Number)
            .all(db)
            .await?;
        Ok(all)
    }

    pub async fn find<C: ConnectionTrait>(db: &C, id: i32) -> Result<pokemon::Model, AppError> {
        pokemon::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Pokemon not found".to_string()))
    }

    /// Load the moves and items of a pokemon into its detail view.
    pub async fn detail<C: ConnectionTrait>(
        db: &C,
        pokemon: pokemon::Model,
    ) -> Result<PokemonDetail, AppError> {
        let moves = MoveService::for_pokemon(db, pokemon.id).await?;
        let items = ItemService::for_pokemon(db, pokemon.id).await?;
        Ok(PokemonDetail::new(pokemon, &moves, &items))
    }

    /// Create a pokemon together with its move set in one transaction.
    pub async fn create(
        db: &DatabaseConnection,
        form: &PokemonForm,
    ) -> Result<pokemon::Model, AppError> {
        let (draft, mut errors) = form.validate(None);

        let txn = db.begin().await?;
        Self::check_uniqueness(&txn, &draft, None, &mut errors).await?;
        let (fields, moves) = errors.finish(draft.into_valid())?;

        let created = Self::insert(&txn, &fields).await?;
        MoveService::assign(&txn, created.id, &moves.unwrap_or_default()).await?;
        txn.commit().await?;

        tracing::info!(pokemon_id = created.id, number = created.number, "Pokemon created");
        Ok(created)
    }

    /// Update a pokemon's attributes and, when given, reconcile its move set.
    /// Both happen in one transaction.
    pub async fn update(
        db: &DatabaseConnection,
        id: i32,
        form: &PokemonForm,
    ) -> Result<pokemon::Model, AppError> {
        let txn = db.begin().await?;
        let current = Self::find(&txn, id).await?;

        let (draft, mut errors) = form.validate(Some(&current));
        Self::check_uniqueness(&txn, &draft, Some(id), &mut errors).await?;
        let (fields, moves) = errors.finish(draft.into_valid())?;

        let mut active: pokemon::ActiveModel = current.into();
        active.number = ActiveValue::Set(fields.number);
        active.name = ActiveValue::Set(fields.name.clone());
        active.attack = ActiveValue::Set(fields.attack);
        active.defense = ActiveValue::Set(fields.defense);
        active.poke_type = ActiveValue::Set(fields.poke_type.as_str().to_string());
        active.image_url = ActiveValue::Set(fields.image_url.clone());
        active.captured = ActiveValue::Set(fields.captured);
        active.updated_at = ActiveValue::Set(chrono::Utc::now().fixed_offset());

        let updated = active
            .update(&txn)
            .await
            .map_err(|e| duplicate_pokemon(e, &fields))?;

        if let Some(names) = moves {
            MoveService::assign(&txn, id, &names).await?;
        }
        txn.commit().await?;

        tracing::info!(pokemon_id = id, "Pokemon updated");
        Ok(updated)
    }

    /// Delete a pokemon after its move links and items, in one transaction.
    pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<i32, AppError> {
        let txn = db.begin().await?;
        Self::find(&txn, id).await?;

        poke_move::Entity::delete_many()
            .filter(poke_move::Column::PokemonId.eq(id))
            .exec(&txn)
            .await?;
        let items = item::Entity::delete_many()
            .filter(item::Column::PokemonId.eq(id))
            .exec(&txn)
            .await?;
        pokemon::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;

        tracing::info!(pokemon_id = id, items = items.rows_affected, "Pokemon deleted");
        Ok(id)
    }

    /// Insert validated attributes. A unique-index violation from a write
    /// that raced past the uniqueness check becomes the same 422 error.
    async fn insert<C: ConnectionTrait>(
        db: &C,
        fields: &ValidPokemon,
    ) -> Result<pokemon::Model, AppError> {
        let now = chrono::Utc::now().fixed_offset();
        pokemon::ActiveModel {
            number: ActiveValue::Set(fields.number),
            name: ActiveValue::Set(fields.name.clone()),
            attack: ActiveValue::Set(fields.attack),
            defense: ActiveValue::Set(fields.defense),
            poke_type: ActiveValue::Set(fields.poke_type.as_str().to_string()),
            image_url: ActiveValue::Set(fields.image_url.clone()),
            captured: ActiveValue::Set(fields.captured),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
        .map_err(|e| duplicate_pokemon(e, fields))
    }

    /// Record a uniqueness error for every valid `number`/`name` already used
    /// by another pokemon.
    async fn check_uniqueness<C: ConnectionTrait>(
        db: &C,
        draft: &PokemonDraft,
        except: Option<i32>,
        errors: &mut ValidationErrors,
    ) -> Result<(), AppError> {
        let others = || {
            let query = pokemon::Entity::find();
            match except {
                Some(id) => query.filter(pokemon::Column::Id.ne(id)),
                None => query,
            }
        };

        if let Some(number) = draft.number {
            let taken = others()
                .filter(pokemon::Column::Number.eq(number))
                .count(db)
                .await?;
            if taken > 0 {
                errors.add("number", rules::already_in_use(number));
            }
        }

        if let Some(name) = &draft.name {
            let taken = others()
                .filter(pokemon::Column::Name.eq(name.as_str()))
                .count(db)
                .await?;
            if taken > 0 {
                errors.add("name", rules::already_in_use(name));
            }
        }

        Ok(())
    }
}

/// Map a unique-index violation on insert/update to the uniqueness message,
/// for writes that raced past [`PokemonService::check_uniqueness`].
fn duplicate_pokemon(err: DbErr, fields: &ValidPokemon) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            if detail.contains("number") {
                ValidationErrors::single("number", rules::already_in_use(fields.number)).into()
            } else {
                ValidationErrors::single("name", rules::already_in_use(&fields.name)).into()
            }
        }
        _ => err.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::PokeType;
    use migration::{Migrator, MigratorTrait};

    async fn test_db() -> DatabaseConnection {
        let db = sea_orm::Database::connect("sqlite::memory:")
            .await
            .unwrap_or_default();
        Migrator::up(&db, None).await.unwrap_or_default();
        db
    }

    fn fields(number: i32, name: &str) -> ValidPokemon {
        ValidPokemon {
            number,
            name: name.to_string(),
            attack: 100,
            defense: 90,
            poke_type: PokeType::Psychic,
            image_url: format!("/images/pokemon_snaps/{number}.svg"),
            captured: false,
        }
    }

    #[tokio::test]
    async fn test_insert_maps_number_index_violation() {
        let db = test_db().await;
        assert!(PokemonService::insert(&db, &fields(150, "Mewtwo")).await.is_ok());

        let result = PokemonService::insert(&db, &fields(150, "Mew")).await;

        assert!(matches!(
            result,
            Err(AppError::Validation(errors))
                if errors.get("number") == ["'150' is already in use"]
                    && errors.get("name").is_empty()
        ));
    }

    #[tokio::test]
    async fn test_insert_maps_name_index_violation() {
        let db = test_db().await;
        assert!(PokemonService::insert(&db, &fields(150, "Mewtwo")).await.is_ok());

        let result = PokemonService::insert(&db, &fields(151, "Mewtwo")).await;

        assert!(matches!(
            result,
            Err(AppError::Validation(errors))
                if errors.get("name") == ["'Mewtwo' is already in use"]
                    && errors.get("number").is_empty()
        ));
    }

    #[test]
    fn test_other_storage_errors_stay_internal() {
        let err = DbErr::Custom("disk full".to_string());
        assert!(matches!(
            duplicate_pokemon(err, &fields(1, "Bulbasaur")),
            AppError::Internal(_)
        ));
    }
}
