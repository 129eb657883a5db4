use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::{
    db::CacheKey,
    error::{AppError, AppResult},
    models::{CatalogCandidate, GameDetail},
    services::catalog,
    state::AppState,
};

/// Search responses change slowly; mirror the upstream's three-minute
/// freshness horizon.
const SEARCH_CACHE_TTL: u64 = 180;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    q: String,
}

/// Handler for catalog title search
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<Vec<CatalogCandidate>>> {
    if params.q.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "Search query cannot be empty".to_string(),
        ));
    }

    let cache_key = CacheKey::GameSearch(params.q.clone());
    if let Some(cached) = state.cache.get::<Vec<CatalogCandidate>>(&cache_key).await {
        return Ok(Json(cached));
    }

    let candidates = catalog::resolve_candidates(state.catalog.as_ref(), &params.q).await?;
    state
        .cache
        .put_in_background(&cache_key, &candidates, SEARCH_CACHE_TTL);

    Ok(Json(candidates))
}

/// Handler for single-game detail
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> AppResult<Json<GameDetail>> {
    let detail = catalog::game_detail(state.catalog.as_ref(), id).await?;
    Ok(Json(detail))
}
