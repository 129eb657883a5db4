use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Game catalog API key
    pub catalog_api_key: String,

    /// Game catalog API base URL
    #[serde(default = "default_catalog_api_url")]
    pub catalog_api_url: String,

    /// Primary marketplace access key id
    pub marketplace_access_key: String,

    /// Primary marketplace associate tag
    pub marketplace_associate_tag: String,

    /// Primary marketplace API base URL
    #[serde(default = "default_marketplace_api_url")]
    pub marketplace_api_url: String,

    /// Secondary marketplace application id
    pub finding_app_id: String,

    /// Secondary marketplace API base URL
    #[serde(default = "default_finding_api_url")]
    pub finding_api_url: String,

    /// Redis connection URL
    #[serde(default = "default_redis_url")]
    pub redis_url: String,

    /// Per-call timeout for external services, in seconds
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_catalog_api_url() -> String {
    "https://api-v3.igdb.com".to_string()
}

fn default_marketplace_api_url() -> String {
    "https://webservices.amazon.com/onca/json".to_string()
}

fn default_finding_api_url() -> String {
    "https://svcs.ebay.com/services/search/FindingService/v1".to_string()
}

fn default_redis_url() -> String {
    "redis://localhost:6379".to_string()
}

fn default_http_timeout_secs() -> u64 {
    10
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}
