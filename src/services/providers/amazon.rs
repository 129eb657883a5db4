/// Primary marketplace provider (Product Advertising ItemSearch)
///
/// Keyword search restricted to the VideoGames index. The Medium response
/// group includes the attribute bag and offer summary the matcher needs.
use crate::{
    error::{AppError, AppResult},
    models::{marketplace::ItemSearchEnvelope, ItemSearchResponse},
    services::providers::MarketplaceSearch,
};
use reqwest::Client as HttpClient;

const SEARCH_INDEX: &str = "VideoGames";
const RESPONSE_GROUP: &str = "ItemAttributes,Medium";

#[derive(Clone)]
pub struct AmazonProvider {
    http_client: HttpClient,
    access_key: String,
    associate_tag: String,
    api_url: String,
}

impl AmazonProvider {
    pub fn new(
        http_client: HttpClient,
        access_key: String,
        associate_tag: String,
        api_url: String,
    ) -> Self {
        Self {
            http_client,
            access_key,
            associate_tag,
            api_url,
        }
    }
}

#[async_trait::async_trait]
impl MarketplaceSearch for AmazonProvider {
    async fn search_listings(&self, keywords: &str) -> AppResult<ItemSearchResponse> {
        let response = self
            .http_client
            .get(&self.api_url)
            .query(&[
                ("Service", "AWSECommerceService"),
                ("Operation", "ItemSearch"),
                ("SearchIndex", SEARCH_INDEX),
                ("ResponseGroup", RESPONSE_GROUP),
                ("Keywords", keywords),
                ("AWSAccessKeyId", &self.access_key),
                ("AssociateTag", &self.associate_tag),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                keywords = %keywords,
                status = %status,
                body = %body,
                "Marketplace search request failed"
            );
            return Err(AppError::ExternalApi(format!(
                "Marketplace API returned status {}: {}",
                status, body
            )));
        }

        let envelope: ItemSearchEnvelope = response.json().await?;
        let page = envelope.response.items;

        tracing::info!(
            keywords = %keywords,
            total_results = page.total_results,
            "Marketplace search completed"
        );

        Ok(page)
    }
}
