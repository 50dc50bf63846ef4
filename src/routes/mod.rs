mod health;
mod items;
mod moves;
mod pokemon;

use axum::Router;

use crate::state::AppState;

/// Build the complete application router.
///
/// Structure:
/// - `GET /health` — health check with database connectivity
/// - `/api/pokemon` — pokemon, their types and their items
/// - `/api/items` — item updates and deletion
/// - `/api/moves` — move lookups and deletion
pub fn router() -> Router<AppState> {
    let api = Router::new()
        .nest("/pokemon", pokemon::router())
        .nest("/items", items::router())
        .nest("/moves", moves::router());

    Router::new().merge(health::router()).nest("/api", api)
}
