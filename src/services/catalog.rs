use crate::{
    error::{AppError, AppResult},
    models::{CatalogCandidate, GameDetail},
    services::providers::CatalogProvider,
};

/// Display fields fetched for search candidates.
pub const CANDIDATE_FIELDS: &str = "name,cover,rating";

/// Display fields fetched for a single-game detail view.
pub const DETAIL_FIELDS: &str = "name,cover,rating,platforms";

/// Platform names dropped from the detail view. The catalog mixes mobile
/// ports into a game's platform list even when filtered server-side.
const EXCLUDED_PLATFORM_NAMES: &[&str] = &["iOS", "Android"];

/// Resolves a free-text title to display-ready catalog candidates.
///
/// Two catalog calls: a loose search for ids, then a batched detail fetch
/// for the display field set. An empty search result is a valid outcome and
/// returns an empty sequence.
pub async fn resolve_candidates(
    catalog: &dyn CatalogProvider,
    title: &str,
) -> AppResult<Vec<CatalogCandidate>> {
    let hits = catalog.search_games(title).await?;
    if hits.is_empty() {
        tracing::info!(title = %title, "Catalog search found nothing");
        return Ok(Vec::new());
    }

    let ids: Vec<u64> = hits.iter().map(|game| game.id).collect();
    let detailed = catalog.fetch_games(&ids, CANDIDATE_FIELDS).await?;

    Ok(detailed.into_iter().map(CatalogCandidate::from).collect())
}

/// Fetches one game plus the display names of the console platforms it
/// shipped on.
pub async fn game_detail(catalog: &dyn CatalogProvider, id: u64) -> AppResult<GameDetail> {
    let games = catalog.fetch_games(&[id], DETAIL_FIELDS).await?;
    let game = games
        .into_iter()
        .next()
        .ok_or_else(|| AppError::NotFound(format!("game {} not found", id)))?;

    let platforms = if game.platforms.is_empty() {
        Vec::new()
    } else {
        catalog
            .fetch_platforms(&game.platforms)
            .await?
            .into_iter()
            .map(|platform| platform.name)
            .filter(|name| !EXCLUDED_PLATFORM_NAMES.contains(&name.as_str()))
            .collect()
    };

    Ok(GameDetail { game, platforms })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CatalogGame, Platform};
    use crate::services::providers::MockCatalogProvider;

    fn bare_game(id: u64) -> CatalogGame {
        CatalogGame {
            id,
            name: None,
            cover: None,
            rating: None,
            platforms: vec![],
            games: vec![],
        }
    }

    #[tokio::test]
    async fn empty_search_resolves_to_empty_sequence() {
        let mut catalog = MockCatalogProvider::new();
        catalog.expect_search_games().returning(|_| Ok(vec![]));
        catalog.expect_fetch_games().times(0);

        let candidates = resolve_candidates(&catalog, "zzzz unknown title")
            .await
            .unwrap();
        assert!(candidates.is_empty());
    }

    #[tokio::test]
    async fn detail_fetch_uses_search_hit_ids() {
        let mut catalog = MockCatalogProvider::new();
        catalog
            .expect_search_games()
            .returning(|_| Ok(vec![bare_game(7346), bare_game(1029)]));
        catalog
            .expect_fetch_games()
            .withf(|ids, fields| ids == [7346, 1029] && fields == CANDIDATE_FIELDS)
            .times(1)
            .returning(|ids, _| {
                Ok(ids
                    .iter()
                    .map(|&id| CatalogGame {
                        name: Some(format!("game-{}", id)),
                        ..bare_game(id)
                    })
                    .collect())
            });

        let candidates = resolve_candidates(&catalog, "zelda").await.unwrap();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].id, 7346);
        assert_eq!(candidates[0].name, "game-7346");
    }

    #[tokio::test]
    async fn unknown_game_detail_is_not_found() {
        let mut catalog = MockCatalogProvider::new();
        catalog.expect_fetch_games().returning(|_, _| Ok(vec![]));

        let result = game_detail(&catalog, 999).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn detail_filters_mobile_platforms() {
        let mut catalog = MockCatalogProvider::new();
        catalog.expect_fetch_games().returning(|_, _| {
            Ok(vec![CatalogGame {
                platforms: vec![6, 48, 39],
                ..bare_game(7346)
            }])
        });
        catalog.expect_fetch_platforms().returning(|_| {
            Ok(vec![
                Platform {
                    id: 6,
                    name: "PC (Microsoft Windows)".to_string(),
                },
                Platform {
                    id: 48,
                    name: "PlayStation 4".to_string(),
                },
                Platform {
                    id: 39,
                    name: "iOS".to_string(),
                },
            ])
        });

        let detail = game_detail(&catalog, 7346).await.unwrap();
        assert_eq!(
            detail.platforms,
            vec!["PC (Microsoft Windows)", "PlayStation 4"]
        );
    }
}
