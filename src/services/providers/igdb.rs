/// IGDB catalog provider
///
/// All endpoints are id-path GETs with a `fields` query parameter, keyed by
/// the `user-key` header. Search is two-phase upstream of this client: the
/// resolver first asks for loose matches, then re-fetches by id set for
/// display fields.
use crate::{
    error::{AppError, AppResult},
    models::{CatalogGame, NewsArticle, Platform},
    services::providers::CatalogProvider,
};
use reqwest::Client as HttpClient;

const SEARCH_RESULT_LIMIT: u32 = 25;

#[derive(Clone)]
pub struct IgdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl IgdbProvider {
    pub fn new(http_client: HttpClient, api_key: String, api_url: String) -> Self {
        Self {
            http_client,
            api_key,
            api_url,
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> AppResult<T> {
        let url = format!("{}/{}", self.api_url, path);

        let response = self
            .http_client
            .get(&url)
            .header("user-key", &self.api_key)
            .query(query)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(path = %path, status = %status, body = %body, "Catalog API request failed");
            return Err(AppError::ExternalApi(format!(
                "Catalog API returned status {}: {}",
                status, body
            )));
        }

        Ok(response.json().await?)
    }
}

fn join_ids(ids: &[u64]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

#[async_trait::async_trait]
impl CatalogProvider for IgdbProvider {
    async fn search_games(&self, query: &str) -> AppResult<Vec<CatalogGame>> {
        let limit = SEARCH_RESULT_LIMIT.to_string();
        let games: Vec<CatalogGame> = self
            .get_json(
                "games/",
                &[("search", query), ("fields", "id"), ("limit", limit.as_str())],
            )
            .await?;

        tracing::info!(query = %query, results = games.len(), "Catalog search completed");

        Ok(games)
    }

    async fn fetch_games(&self, ids: &[u64], fields: &str) -> AppResult<Vec<CatalogGame>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let path = format!("games/{}", join_ids(ids));
        self.get_json(&path, &[("fields", fields)]).await
    }

    async fn fetch_related(&self, id: u64) -> AppResult<Vec<u64>> {
        let path = format!("games/{}", id);
        let games: Vec<CatalogGame> = self.get_json(&path, &[("fields", "games")]).await?;

        Ok(games.into_iter().next().map(|g| g.games).unwrap_or_default())
    }

    async fn fetch_platforms(&self, ids: &[u64]) -> AppResult<Vec<Platform>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let path = format!("platforms/{}", join_ids(ids));
        self.get_json(&path, &[("fields", "name")]).await
    }

    async fn fetch_news(&self, limit: u32) -> AppResult<Vec<NewsArticle>> {
        let limit = limit.to_string();
        self.get_json(
            "pulses/",
            &[
                ("fields", "title,image,url,published_at,pulse_source"),
                ("order", "published_at:desc"),
                ("expand", "pulse_source"),
                ("limit", limit.as_str()),
            ],
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_ids_comma_separates() {
        assert_eq!(join_ids(&[45149, 7346, 1029]), "45149,7346,1029");
        assert_eq!(join_ids(&[7346]), "7346");
        assert_eq!(join_ids(&[]), "");
    }
}
