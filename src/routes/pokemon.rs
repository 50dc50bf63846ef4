use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use crate::{
    dto::{DeletedResponse, ItemResponse, PokemonSummary},
    entities::PokeType,
    error::AppError,
    extract::{JsonBody, RecordId},
    params,
    routes::items,
    services::{ItemService, PokemonService},
    state::AppState,
    validation::PokemonForm,
};

/// Pokemon router, nested under `/api/pokemon`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_pokemon).post(create_pokemon))
        .route("/types", get(list_types))
        .route(
            "/{id}",
            get(get_pokemon)
                .patch(update_pokemon)
                .put(update_pokemon)
                .delete(delete_pokemon),
        )
        .route(
            "/{id}/items",
            get(list_items).post(items::create_item),
        )
}

/// `GET /pokemon/types` — The valid pokemon types, sorted.
async fn list_types() -> impl IntoResponse {
    Json(PokeType::names())
}

/// `GET /pokemon` — Index of all pokemon.
async fn list_pokemon(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let all = PokemonService::list(&state.db).await?;
    Ok(Json(
        all.iter().map(PokemonSummary::from).collect::<Vec<_>>(),
    ))
}

/// `GET /pokemon/:id` — A pokemon with its moves and items.
async fn get_pokemon(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> Result<impl IntoResponse, AppError> {
    let pokemon = PokemonService::find(&state.db, id).await?;
    Ok(Json(PokemonService::detail(&state.db, pokemon).await?))
}

/// `POST /pokemon` — Create a pokemon and its move set.
async fn create_pokemon(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let params = params::translate_request(body, &params::POKEMON);
    let form = PokemonForm::from_params(&params::permit(&params, &params::POKEMON)?);

    let pokemon = PokemonService::create(&state.db, &form).await?;
    let detail = PokemonService::detail(&state.db, pokemon).await?;

    Ok((StatusCode::CREATED, Json(detail)))
}

/// `PATCH /pokemon/:id` — Update a pokemon; a `moves` list replaces its move set.
async fn update_pokemon(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let params = params::translate_request(body, &params::POKEMON);
    let form = PokemonForm::from_params(&params::permit(&params, &params::POKEMON)?);

    let pokemon = PokemonService::update(&state.db, id, &form).await?;
    Ok(Json(PokemonService::detail(&state.db, pokemon).await?))
}

/// `DELETE /pokemon/:id` — Delete a pokemon with its items and move links.
async fn delete_pokemon(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> Result<impl IntoResponse, AppError> {
    let id = PokemonService::delete(&state.db, id).await?;
    Ok(Json(DeletedResponse { id }))
}

/// `GET /pokemon/:pokemon_id/items` — Items belonging to one pokemon.
async fn list_items(
    State(state): State<AppState>,
    RecordId(pokemon_id): RecordId,
) -> Result<impl IntoResponse, AppError> {
    let items = ItemService::list(&state.db, pokemon_id).await?;
    Ok(Json(
        items.iter().map(ItemResponse::from).collect::<Vec<_>>(),
    ))
}
