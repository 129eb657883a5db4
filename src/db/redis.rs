use redis::{AsyncCommands, Client};
use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    GameSearch(String),
}

impl Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheKey::GameSearch(query) => write!(f, "games:search:{}", query.to_lowercase()),
        }
    }
}

/// Creates a Redis client for caching
pub fn create_redis_client(redis_url: &str) -> anyhow::Result<Client> {
    let client = Client::open(redis_url)?;
    Ok(client)
}

/// Cache handler for catalog search responses.
///
/// Reads degrade to a miss when Redis is unreachable or an entry fails to
/// parse, so a cache outage never fails a request; writes happen in a
/// spawned task and are fire-and-forget.
#[derive(Clone)]
pub struct Cache {
    redis_client: Client,
}

impl Cache {
    pub fn new(redis_client: Client) -> Self {
        Self { redis_client }
    }

    /// Retrieves a cached value, treating every failure as a miss.
    pub async fn get<T: serde::de::DeserializeOwned>(&self, key: &CacheKey) -> Option<T> {
        let raw = match self.read_raw(key).await {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Cache read failed, treating as miss");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => {
                tracing::debug!(key = %key, "Cache hit");
                Some(value)
            }
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Cache entry failed to parse, ignoring");
                None
            }
        }
    }

    async fn read_raw(&self, key: &CacheKey) -> Result<Option<String>, redis::RedisError> {
        let mut conn = self.redis_client.get_multiplexed_async_connection().await?;
        conn.get(key.to_string()).await
    }

    /// Stores a value without blocking the caller.
    pub fn put_in_background<T: serde::Serialize>(&self, key: &CacheKey, value: &T, ttl: u64) {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!(key = %key, error = %e, "Cache serialization error");
                return;
            }
        };

        let client = self.redis_client.clone();
        let key = key.to_string();
        tokio::spawn(async move {
            let result: Result<(), redis::RedisError> = async {
                let mut conn = client.get_multiplexed_async_connection().await?;
                conn.set_ex(&key, json, ttl).await
            }
            .await;

            if let Err(e) = result {
                tracing::warn!(key = %key, error = %e, "Cache write failed");
            } else {
                tracing::debug!(key = %key, ttl, "Cached value");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_key_lowercases_query() {
        let key = CacheKey::GameSearch("Hollow Knight".to_string());
        assert_eq!(key.to_string(), "games:search:hollow knight");
    }

    #[tokio::test]
    async fn unreachable_redis_reads_as_miss() {
        // Port 1 is never a Redis server; the read must degrade, not error.
        let client = create_redis_client("redis://127.0.0.1:1").unwrap();
        let cache = Cache::new(client);

        let key = CacheKey::GameSearch("anything".to_string());
        let value: Option<Vec<String>> = cache.get(&key).await;
        assert!(value.is_none());
    }
}
