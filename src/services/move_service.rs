use std::collections::BTreeSet;

use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, SqlErr,
};

use crate::entities::{moves, poke_move, pokemon};
use crate::error::AppError;
use crate::validation::{ValidationErrors, moves::name_violations};

pub const DUPLICATE_MOVE: &str = "pokemon cannot have the same move more than once";

/// Moves and the pokemon/move join rows.
pub struct MoveService;

impl MoveService {
    /// Moves known by a pokemon, by name.
    pub async fn for_pokemon<C: ConnectionTrait>(
        db: &C,
        pokemon_id: i32,
    ) -> Result<Vec<moves::Model>, AppError> {
        let known = moves::Entity::find()
            .inner_join(poke_move::Entity)
            .filter(poke_move::Column::PokemonId.eq(pokemon_id))
            .order_by_asc(moves::Column::Name)
            .all(db)
            .await?;
        Ok(known)
    }

    /// Pokemon that know a move, by number.
    pub async fn pokemon_for_move<C: ConnectionTrait>(
        db: &C,
        move_id: i32,
    ) -> Result<Vec<pokemon::Model>, AppError> {
        let mv = Self::find(db, move_id).await?;
        let known_by = mv
            .find_related(pokemon::Entity)
            .order_by_asc(pokemon::Column::Number)
            .all(db)
            .await?;
        Ok(known_by)
    }

    pub async fn find<C: ConnectionTrait>(db: &C, id: i32) -> Result<moves::Model, AppError> {
        moves::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Move not found".to_string()))
    }

    /// Look a move up by name, creating it when it does not exist yet.
    pub async fn find_or_create<C: ConnectionTrait>(
        db: &C,
        name: &str,
    ) -> Result<moves::Model, AppError> {
        let name = name.trim();
        if let Some(existing) = Self::find_by_name(db, name).await? {
            return Ok(existing);
        }

        let mut errors = ValidationErrors::new();
        errors.add_all("moves", name_violations(name));
        errors.finish(Some(()))?;

        Self::insert_by_name(db, name).await
    }

    async fn find_by_name<C: ConnectionTrait>(
        db: &C,
        name: &str,
    ) -> Result<Option<moves::Model>, AppError> {
        let found = moves::Entity::find()
            .filter(moves::Column::Name.eq(name))
            .one(db)
            .await?;
        Ok(found)
    }

    /// Insert a move and return the stored row.
    ///
    /// A concurrent writer may create the same name between the lookup and
    /// the insert. The insert then does nothing instead of failing, so the
    /// surrounding transaction stays usable, and the other writer's row is
    /// returned.
    async fn insert_by_name<C: ConnectionTrait>(
        db: &C,
        name: &str,
    ) -> Result<moves::Model, AppError> {
        let now = chrono::Utc::now().fixed_offset();
        let row = moves::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        let inserted = moves::Entity::insert(row)
            .on_conflict(OnConflict::column(moves::Column::Name).do_nothing().to_owned())
            .exec_without_returning(db)
            .await?;

        let stored = Self::find_by_name(db, name)
            .await?
            .ok_or_else(|| anyhow::anyhow!("move '{name}' missing after insert"))?;
        if inserted > 0 {
            tracing::info!(move_id = stored.id, name = %stored.name, "Move created");
        }
        Ok(stored)
    }

    /// Link a move to a pokemon. A pair can only be linked once.
    pub async fn attach<C: ConnectionTrait>(
        db: &C,
        pokemon_id: i32,
        move_id: i32,
    ) -> Result<poke_move::Model, AppError> {
        let existing = poke_move::Entity::find()
            .filter(poke_move::Column::PokemonId.eq(pokemon_id))
            .filter(poke_move::Column::MoveId.eq(move_id))
            .count(db)
            .await?;
        if existing > 0 {
            return Err(ValidationErrors::single("pokemon", DUPLICATE_MOVE).into());
        }

        let now = chrono::Utc::now().fixed_offset();
        let link = poke_move::ActiveModel {
            pokemon_id: ActiveValue::Set(pokemon_id),
            move_id: ActiveValue::Set(move_id),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
        .map_err(|e| unique_violation(e, "pokemon", DUPLICATE_MOVE))?;

        Ok(link)
    }

    pub async fn detach<C: ConnectionTrait>(
        db: &C,
        pokemon_id: i32,
        move_id: i32,
    ) -> Result<(), AppError> {
        poke_move::Entity::delete_many()
            .filter(poke_move::Column::PokemonId.eq(pokemon_id))
            .filter(poke_move::Column::MoveId.eq(move_id))
            .exec(db)
            .await?;
        Ok(())
    }

    /// Replace a pokemon's move set with `names`.
    ///
    /// Only the difference is written: links to moves no longer listed are
    /// removed, missing ones are added (creating the move if needed) and links
    /// that stay are not touched. Run it inside the caller's transaction.
    pub async fn assign<C: ConnectionTrait>(
        db: &C,
        pokemon_id: i32,
        names: &[String],
    ) -> Result<(), AppError> {
        let wanted: BTreeSet<&str> = names.iter().map(|n| n.trim()).collect();
        let current = Self::for_pokemon(db, pokemon_id).await?;

        for mv in &current {
            if !wanted.contains(mv.name.as_str()) {
                Self::detach(db, pokemon_id, mv.id).await?;
            }
        }

        let mut errors = ValidationErrors::new();
        for name in wanted {
            if current.iter().any(|mv| mv.name == name) {
                continue;
            }
            match Self::find_or_create(db, name).await {
                Ok(mv) => {
                    Self::attach(db, pokemon_id, mv.id).await?;
                }
                Err(AppError::Validation(e)) => errors.merge(e),
                Err(other) => return Err(other),
            }
        }
        errors.finish(Some(()))?;

        tracing::debug!(pokemon_id, "Move set reconciled");
        Ok(())
    }

    /// Delete a move that no pokemon knows anymore.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::IntegrityViolation`] while join rows still
    /// reference the move.
    pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<i32, AppError> {
        let mv = Self::find(db, id).await?;

        let references = poke_move::Entity::find()
            .filter(poke_move::Column::MoveId.eq(id))
            .count(db)
            .await?;
        if references > 0 {
            return Err(AppError::IntegrityViolation(format!(
                "Move '{}' is still known by {references} pokemon",
                mv.name
            )));
        }

        mv.delete(db).await?;
        tracing::info!(move_id = id, "Move deleted");
        Ok(id)
    }
}

/// Turn a unique-index violation into the validation error the pre-check
/// would have produced. Other storage errors pass through.
pub fn unique_violation(err: DbErr, field: &str, message: &str) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            ValidationErrors::single(field, message).into()
        }
        _ => err.into(),
    }
}
