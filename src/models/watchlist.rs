use serde::{Deserialize, Serialize};

/// Incoming watchlist update: the full replacement set of tracked game ids.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistUpdate {
    pub game_ids: Vec<u64>,
}

/// The stored watchlist alongside its current related-game sample.
/// `game_ids` preserves the order the client sent; `related_ids` is the
/// sampler's draw, disjoint from `game_ids` and duplicate-free.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistView {
    pub game_ids: Vec<u64>,
    pub related_ids: Vec<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_deserializes_camel_case() {
        let update: WatchlistUpdate =
            serde_json::from_str(r#"{"gameIds": [45149, 7346]}"#).unwrap();
        assert_eq!(update.game_ids, vec![45149, 7346]);
    }

    #[test]
    fn empty_view_serializes_empty_arrays() {
        let json = serde_json::to_value(WatchlistView::default()).unwrap();
        assert_eq!(json["gameIds"], serde_json::json!([]));
        assert_eq!(json["relatedIds"], serde_json::json!([]));
    }
}
