use axum::{extract::State, Json};

use crate::{error::AppResult, models::NewsArticle, state::AppState};

const NEWS_PAGE_SIZE: u32 = 10;

/// Handler for the latest catalog news feed
pub async fn latest(State(state): State<AppState>) -> AppResult<Json<Vec<NewsArticle>>> {
    let articles = state.catalog.fetch_news(NEWS_PAGE_SIZE).await?;
    Ok(Json(articles))
}
