use rand::seq::SliceRandom;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    ModelTrait, QueryFilter, QueryOrder,
};
use serde_json::Value;

use crate::entities::{item, pokemon};
use crate::error::AppError;
use crate::services::PokemonService;
use crate::validation::{ItemDraft, ItemForm, ValidationErrors};

/// Sprites handed out to items created without an image.
pub const DEFAULT_ITEM_IMAGES: [&str; 4] = [
    "pokemon_berry.svg",
    "pokemon_egg.svg",
    "pokemon_potion.svg",
    "pokemon_super_potion.svg",
];

/// Pick one of [`DEFAULT_ITEM_IMAGES`] at random.
pub fn random_item_image() -> &'static str {
    DEFAULT_ITEM_IMAGES
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(DEFAULT_ITEM_IMAGES[0])
}

pub struct ItemService;

impl ItemService {
    /// Items of a pokemon in insertion order.
    pub async fn for_pokemon<C: ConnectionTrait>(
        db: &C,
        pokemon_id: i32,
    ) -> Result<Vec<item::Model>, AppError> {
        let items = item::Entity::find()
            .filter(item::Column::PokemonId.eq(pokemon_id))
            .order_by_asc(item::Column::Id)
            .all(db)
            .await?;
        Ok(items)
    }

    /// Items of an existing pokemon.
    pub async fn list(db: &DatabaseConnection, pokemon_id: i32) -> Result<Vec<item::Model>, AppError> {
        let owner = PokemonService::find(db, pokemon_id).await?;
        let items = owner
            .find_related(item::Entity)
            .order_by_asc(item::Column::Id)
            .all(db)
            .await?;
        Ok(items)
    }

    pub async fn find<C: ConnectionTrait>(db: &C, id: i32) -> Result<item::Model, AppError> {
        item::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Item not found".to_string()))
    }

    /// Create an item for an existing pokemon. Without an image the item gets
    /// a random default sprite.
    pub async fn create(
        db: &DatabaseConnection,
        pokemon_id: i32,
        form: ItemForm,
    ) -> Result<item::Model, AppError> {
        PokemonService::find(db, pokemon_id).await?;

        let form = ItemForm {
            pokemon_id: Some(pokemon_id.into()),
            image_url: form
                .image_url
                .filter(|v| !v.is_null())
                .or_else(|| Some(Value::from(random_item_image()))),
            ..form
        };

        let (draft, errors) = form.validate(None);
        let fields = errors.finish(draft.into_valid())?;

        let now = chrono::Utc::now().fixed_offset();
        let created = item::ActiveModel {
            pokemon_id: ActiveValue::Set(fields.pokemon_id),
            name: ActiveValue::Set(fields.name),
            price: ActiveValue::Set(fields.price),
            happiness: ActiveValue::Set(fields.happiness),
            image_url: ActiveValue::Set(fields.image_url),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(db)
        .await?;

        tracing::info!(item_id = created.id, pokemon_id, "Item created");
        Ok(created)
    }

    /// Apply a partial update to an item.
    pub async fn update(
        db: &DatabaseConnection,
        id: i32,
        form: &ItemForm,
    ) -> Result<item::Model, AppError> {
        let current = Self::find(db, id).await?;

        let (draft, mut errors) = form.validate(Some(&current));
        Self::check_owner(db, &draft, &mut errors).await?;
        let fields = errors.finish(draft.into_valid())?;

        let mut active: item::ActiveModel = current.into();
        active.pokemon_id = ActiveValue::Set(fields.pokemon_id);
        active.name = ActiveValue::Set(fields.name);
        active.price = ActiveValue::Set(fields.price);
        active.happiness = ActiveValue::Set(fields.happiness);
        active.image_url = ActiveValue::Set(fields.image_url);
        active.updated_at = ActiveValue::Set(chrono::Utc::now().fixed_offset());

        let updated = active.update(db).await?;
        tracing::info!(item_id = id, "Item updated");
        Ok(updated)
    }

    pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<i32, AppError> {
        let existing = Self::find(db, id).await?;
        existing.delete(db).await?;
        tracing::info!(item_id = id, "Item deleted");
        Ok(id)
    }

    /// An item must point at a live pokemon.
    async fn check_owner<C: ConnectionTrait>(
        db: &C,
        draft: &ItemDraft,
        errors: &mut ValidationErrors,
    ) -> Result<(), AppError> {
        let Some(pokemon_id) = draft.pokemon_id else {
            return Ok(());
        };
        let owner = pokemon::Entity::find_by_id(pokemon_id).one(db).await?;
        if owner.is_none() {
            errors.add("pokemon", "must exist");
        }
        Ok(())
    }
}
