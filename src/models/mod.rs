pub mod catalog;
pub mod marketplace;
pub mod watchlist;

pub use catalog::{CatalogCandidate, CatalogGame, CoverImage, GameDetail, NewsArticle, Platform};
pub use marketplace::{
    CrossReferenceResult, FindingItem, FindingResponse, ItemAttributes, ItemSearchResponse,
    MarketplaceItem, MarketplaceListing, OfferSummary, ReconciliationResult, SearchQuery,
};
pub use watchlist::{WatchlistUpdate, WatchlistView};
