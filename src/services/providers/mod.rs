/// External service client abstractions
///
/// The pipelines consume three remote collaborators: the game catalog, the
/// primary marketplace's keyword search, and the secondary marketplace's
/// product-code lookup. Each is behind a trait so the pipelines can be
/// exercised against canned responses without a network.
use crate::{
    error::AppResult,
    models::{CatalogGame, FindingResponse, ItemSearchResponse, NewsArticle, Platform},
};

pub mod amazon;
pub mod ebay;
pub mod igdb;

/// Game catalog service: canonical metadata, search, and related titles.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Search the catalog for loosely-matching games.
    async fn search_games(&self, query: &str) -> AppResult<Vec<CatalogGame>>;

    /// Batched detail fetch by identifier set, restricted to `fields`
    /// (comma-separated field names).
    async fn fetch_games(&self, ids: &[u64], fields: &str) -> AppResult<Vec<CatalogGame>>;

    /// The catalog's related-game identifiers for one entry. An unknown id
    /// yields an empty list.
    async fn fetch_related(&self, id: u64) -> AppResult<Vec<u64>>;

    /// Resolve platform identifiers to display names.
    async fn fetch_platforms(&self, ids: &[u64]) -> AppResult<Vec<Platform>>;

    /// Most recent news articles, newest first.
    async fn fetch_news(&self, limit: u32) -> AppResult<Vec<NewsArticle>>;
}

/// Primary marketplace keyword search over the video-games category.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MarketplaceSearch: Send + Sync {
    async fn search_listings(&self, keywords: &str) -> AppResult<ItemSearchResponse>;
}

/// Secondary marketplace product-code-keyed search.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ProductFinder: Send + Sync {
    async fn find_by_product_code(&self, upc: &str) -> AppResult<FindingResponse>;
}
