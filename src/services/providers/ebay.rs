/// Secondary marketplace provider (Finding API, findItemsByProduct)
///
/// Product-code-keyed lookup. A failure acknowledgement in the response body
/// still arrives as HTTP 200; interpreting it is the pipeline's job, not the
/// client's.
use crate::{
    error::{AppError, AppResult},
    models::FindingResponse,
    services::providers::ProductFinder,
};
use reqwest::Client as HttpClient;

const OPERATION_NAME: &str = "findItemsByProduct";
const SERVICE_VERSION: &str = "1.0.0";

#[derive(Clone)]
pub struct EbayProvider {
    http_client: HttpClient,
    app_id: String,
    api_url: String,
}

impl EbayProvider {
    pub fn new(http_client: HttpClient, app_id: String, api_url: String) -> Self {
        Self {
            http_client,
            app_id,
            api_url,
        }
    }
}

#[async_trait::async_trait]
impl ProductFinder for EbayProvider {
    async fn find_by_product_code(&self, upc: &str) -> AppResult<FindingResponse> {
        let response = self
            .http_client
            .get(&self.api_url)
            .query(&[
                ("OPERATION-NAME", OPERATION_NAME),
                ("SERVICE-VERSION", SERVICE_VERSION),
                ("SECURITY-APPNAME", &self.app_id),
                ("RESPONSE-DATA-FORMAT", "JSON"),
                ("REST-PAYLOAD", ""),
                ("productId.@type", "UPC"),
                ("productId", upc),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                upc = %upc,
                status = %status,
                body = %body,
                "Product lookup request failed"
            );
            return Err(AppError::ExternalApi(format!(
                "Finding API returned status {}: {}",
                status, body
            )));
        }

        Ok(response.json().await?)
    }
}
