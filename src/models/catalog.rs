use serde::{Deserialize, Serialize};

/// Raw game record from the catalog API.
///
/// Only the fields requested at the call site are populated; everything else
/// deserializes to its default. The `games` field carries the catalog's own
/// related-game identifiers for this entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogGame {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub cover: Option<CoverImage>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub platforms: Vec<u64>,
    #[serde(default)]
    pub games: Vec<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverImage {
    #[serde(default)]
    pub url: Option<String>,
}

/// Display-ready search candidate returned to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogCandidate {
    pub id: u64,
    pub name: String,
    pub cover_url: Option<String>,
    pub rating: Option<f64>,
}

impl From<CatalogGame> for CatalogCandidate {
    fn from(game: CatalogGame) -> Self {
        Self {
            id: game.id,
            name: game.name.unwrap_or_default(),
            cover_url: game.cover.and_then(|c| c.url),
            rating: game.rating,
        }
    }
}

/// Platform record from the catalog API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub id: u64,
    pub name: String,
}

/// Single-game detail response: the raw catalog record plus the resolved
/// platform names it is available on.
#[derive(Debug, Clone, Serialize)]
pub struct GameDetail {
    pub game: CatalogGame,
    pub platforms: Vec<String>,
}

/// News article from the catalog's feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsArticle {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub published_at: Option<i64>,
    #[serde(default)]
    pub pulse_source: Option<NewsSource>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsSource {
    #[serde(default)]
    pub name: Option<String>,
}
