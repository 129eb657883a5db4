use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

use crate::config::Config;
use crate::db::{create_redis_client, Cache};
use crate::models::WatchlistView;
use crate::services::providers::{
    amazon::AmazonProvider, ebay::EbayProvider, igdb::IgdbProvider, CatalogProvider,
    MarketplaceSearch, ProductFinder,
};

/// Shared application state
///
/// Providers are read-only after construction; the watchlist is the only
/// mutable piece and sits behind its own lock. Pipeline state never lands
/// here, so concurrent requests stay isolated.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogProvider>,
    pub marketplace: Arc<dyn MarketplaceSearch>,
    pub finder: Arc<dyn ProductFinder>,
    pub cache: Cache,
    pub watchlist: Arc<RwLock<WatchlistView>>,
}

impl AppState {
    /// Builds production state from configuration: one timed HTTP client
    /// shared across all providers, plus the Redis-backed search cache.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()?;

        let catalog = IgdbProvider::new(
            http_client.clone(),
            config.catalog_api_key.clone(),
            config.catalog_api_url.clone(),
        );
        let marketplace = AmazonProvider::new(
            http_client.clone(),
            config.marketplace_access_key.clone(),
            config.marketplace_associate_tag.clone(),
            config.marketplace_api_url.clone(),
        );
        let finder = EbayProvider::new(
            http_client,
            config.finding_app_id.clone(),
            config.finding_api_url.clone(),
        );

        let cache = Cache::new(create_redis_client(&config.redis_url)?);

        Ok(Self::with_providers(
            Arc::new(catalog),
            Arc::new(marketplace),
            Arc::new(finder),
            cache,
        ))
    }

    /// Assembles state from pre-built providers. Tests use this to wire in
    /// stubs.
    pub fn with_providers(
        catalog: Arc<dyn CatalogProvider>,
        marketplace: Arc<dyn MarketplaceSearch>,
        finder: Arc<dyn ProductFinder>,
        cache: Cache,
    ) -> Self {
        Self {
            catalog,
            marketplace,
            finder,
            cache,
            watchlist: Arc::new(RwLock::new(WatchlistView::default())),
        }
    }
}
