use axum::{extract::State, Json};
use std::collections::HashSet;

use crate::{
    error::AppResult,
    models::{WatchlistUpdate, WatchlistView},
    services::related,
    state::AppState,
};

/// Handler returning the stored watchlist and its related-game sample
pub async fn current(State(state): State<AppState>) -> Json<WatchlistView> {
    Json(state.watchlist.read().await.clone())
}

/// Handler replacing the watchlist.
///
/// A non-empty id set triggers a fresh related-game draw; an empty set
/// clears the stored sample without touching the catalog.
pub async fn update(
    State(state): State<AppState>,
    Json(update): Json<WatchlistUpdate>,
) -> AppResult<Json<WatchlistView>> {
    let mut seen = HashSet::new();
    let game_ids: Vec<u64> = update
        .game_ids
        .into_iter()
        .filter(|id| seen.insert(*id))
        .collect();

    let related_ids = if game_ids.is_empty() {
        Vec::new()
    } else {
        related::sample_related(state.catalog.as_ref(), &game_ids).await?
    };

    let view = WatchlistView {
        game_ids,
        related_ids,
    };

    *state.watchlist.write().await = view.clone();

    Ok(Json(view))
}
