use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::patch,
};

use crate::{
    dto::{DeletedResponse, ItemResponse},
    error::AppError,
    extract::{JsonBody, RecordId},
    params,
    services::ItemService,
    state::AppState,
    validation::ItemForm,
};

/// Item router, nested under `/api/items`. Creation lives under the owning
/// pokemon's path.
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{id}",
        patch(update_item).put(update_item).delete(delete_item),
    )
}

/// `POST /pokemon/:pokemon_id/items` — Create an item for a pokemon.
pub async fn create_item(
    State(state): State<AppState>,
    RecordId(pokemon_id): RecordId,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let params = params::translate_request(body, &params::ITEM);
    let form = ItemForm::from_params(&params::permit(&params, &params::ITEM)?);

    let item = ItemService::create(&state.db, pokemon_id, form).await?;
    Ok((StatusCode::CREATED, Json(ItemResponse::from(&item))))
}

/// `PATCH /items/:id` — Partially update an item.
async fn update_item(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let params = params::translate_request(body, &params::ITEM);
    let form = ItemForm::from_params(&params::permit(&params, &params::ITEM)?);

    let item = ItemService::update(&state.db, id, &form).await?;
    Ok(Json(ItemResponse::from(&item)))
}

/// `DELETE /items/:id` — Delete an item and return its id.
async fn delete_item(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> Result<impl IntoResponse, AppError> {
    let id = ItemService::delete(&state.db, id).await?;
    Ok(Json(DeletedResponse { id }))
}
