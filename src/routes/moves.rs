use axum::{
    Json, Router,
    extract::State,
    response::IntoResponse,
    routing::{delete, get},
};

use crate::{
    dto::{DeletedResponse, PokemonSummary},
    error::AppError,
    extract::RecordId,
    services::MoveService,
    state::AppState,
};

/// Move router, nested under `/api/moves`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}", delete(delete_move))
        .route("/{id}/pokemon", get(list_pokemon_for_move))
}

/// `GET /moves/:id/pokemon` — Pokemon that know a move.
async fn list_pokemon_for_move(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> Result<impl IntoResponse, AppError> {
    let known_by = MoveService::pokemon_for_move(&state.db, id).await?;
    Ok(Json(
        known_by.iter().map(PokemonSummary::from).collect::<Vec<_>>(),
    ))
}

/// `DELETE /moves/:id` — Delete a move no pokemon knows anymore.
async fn delete_move(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> Result<impl IntoResponse, AppError> {
    let id = MoveService::delete(&state.db, id).await?;
    Ok(Json(DeletedResponse { id }))
}
