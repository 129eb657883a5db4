use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use std::collections::HashSet;

use crate::{error::AppResult, services::providers::CatalogProvider};

/// Target size of a related-game sample.
pub const RELATED_SAMPLE_SIZE: usize = 5;

/// Draws a random related-game sample for a watchlist.
///
/// Fetches each watchlist entry's related-game list from the catalog, then
/// draws up to [`RELATED_SAMPLE_SIZE`] ids uniformly without replacement
/// from the combined pool, excluding everything already on the watchlist.
/// When fewer eligible candidates exist, the sample is simply shorter; the
/// draw always terminates.
pub async fn sample_related(catalog: &dyn CatalogProvider, watchlist: &[u64]) -> AppResult<Vec<u64>> {
    let mut pools = Vec::with_capacity(watchlist.len());
    for &game_id in watchlist {
        pools.push(catalog.fetch_related(game_id).await?);
    }

    let mut rng = StdRng::from_entropy();
    let sample = draw_sample(&pools, watchlist, RELATED_SAMPLE_SIZE, &mut rng);

    tracing::info!(
        watchlist_len = watchlist.len(),
        sample_len = sample.len(),
        "Related-game sample drawn"
    );

    Ok(sample)
}

/// Uniform without-replacement draw of `k` ids from the union of `pools`,
/// excluding `exclude`. Returns fewer than `k` ids when the eligible set is
/// smaller than `k`.
pub fn draw_sample<R: Rng>(
    pools: &[Vec<u64>],
    exclude: &[u64],
    k: usize,
    rng: &mut R,
) -> Vec<u64> {
    let excluded: HashSet<u64> = exclude.iter().copied().collect();

    let mut seen = HashSet::new();
    let mut eligible = Vec::new();
    for pool in pools {
        for &candidate in pool {
            if !excluded.contains(&candidate) && seen.insert(candidate) {
                eligible.push(candidate);
            }
        }
    }

    eligible.choose_multiple(rng, k).copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::providers::MockCatalogProvider;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0x6a6f7973)
    }

    #[test]
    fn draws_exactly_k_when_enough_candidates() {
        let pools = vec![(100..120).collect::<Vec<u64>>()];
        let sample = draw_sample(&pools, &[1], RELATED_SAMPLE_SIZE, &mut rng());
        assert_eq!(sample.len(), RELATED_SAMPLE_SIZE);
    }

    #[test]
    fn sample_is_duplicate_free() {
        let pools = vec![vec![100, 101, 102, 103, 104, 105, 106]];
        let sample = draw_sample(&pools, &[], RELATED_SAMPLE_SIZE, &mut rng());
        let unique: HashSet<u64> = sample.iter().copied().collect();
        assert_eq!(unique.len(), sample.len());
    }

    #[test]
    fn sample_excludes_watchlist_ids() {
        // Every pool leans heavily on excluded ids.
        let pools = vec![vec![1, 2, 100, 101], vec![1, 2, 102, 103], vec![2, 104]];
        let exclude = [1, 2];

        let sample = draw_sample(&pools, &exclude, RELATED_SAMPLE_SIZE, &mut rng());
        assert_eq!(sample.len(), RELATED_SAMPLE_SIZE);
        assert!(sample.iter().all(|id| !exclude.contains(id)));
    }

    #[test]
    fn overlapping_pools_do_not_inflate_the_draw() {
        // Only three distinct eligible ids despite nine pool entries.
        let pools = vec![vec![100, 101, 102], vec![100, 101, 102], vec![100, 101, 102]];
        let mut sample = draw_sample(&pools, &[], RELATED_SAMPLE_SIZE, &mut rng());
        sample.sort_unstable();
        assert_eq!(sample, vec![100, 101, 102]);
    }

    #[test]
    fn insufficient_candidates_yield_a_shorter_sample() {
        let pools = vec![vec![100, 101], vec![101]];
        let sample = draw_sample(&pools, &[], RELATED_SAMPLE_SIZE, &mut rng());
        assert_eq!(sample.len(), 2);
    }

    #[test]
    fn fully_excluded_pool_yields_an_empty_sample() {
        let pools = vec![vec![1, 2, 3]];
        let sample = draw_sample(&pools, &[1, 2, 3], RELATED_SAMPLE_SIZE, &mut rng());
        assert!(sample.is_empty());
    }

    #[test]
    fn empty_pools_terminate_immediately() {
        let sample = draw_sample(&[], &[1], RELATED_SAMPLE_SIZE, &mut rng());
        assert!(sample.is_empty());
    }

    #[tokio::test]
    async fn fetches_one_pool_per_watchlist_entry() {
        let mut catalog = MockCatalogProvider::new();
        catalog
            .expect_fetch_related()
            .withf(|id| *id == 45149)
            .times(1)
            .returning(|_| Ok(vec![100, 101, 102, 103, 104, 105]));
        catalog
            .expect_fetch_related()
            .withf(|id| *id == 7346)
            .times(1)
            .returning(|_| Ok(vec![104, 105, 106]));

        let sample = sample_related(&catalog, &[45149, 7346]).await.unwrap();
        assert_eq!(sample.len(), RELATED_SAMPLE_SIZE);
        assert!(!sample.contains(&45149));
        assert!(!sample.contains(&7346));
    }

    #[tokio::test]
    async fn catalog_fault_propagates() {
        let mut catalog = MockCatalogProvider::new();
        catalog.expect_fetch_related().returning(|_| {
            Err(crate::error::AppError::ExternalApi(
                "Catalog API returned status 429".to_string(),
            ))
        });

        let result = sample_related(&catalog, &[45149]).await;
        assert!(result.is_err());
    }
}
