use crate::{
    error::AppResult,
    models::{
        CrossReferenceResult, FindingResponse, ItemSearchResponse, MarketplaceItem,
        MarketplaceListing, ReconciliationResult, SearchQuery,
    },
    services::providers::{MarketplaceSearch, ProductFinder},
};

/// How far a listing's release date may sit from the requested one and still
/// count as the same release. A fixed window replaces the source data's
/// loose "same year" notion: half a year either side keeps regional release
/// gaps in while rejecting remasters and sequels.
pub const RELEASE_DATE_TOLERANCE_DAYS: i64 = 184;

/// Outcome of one matching stage: a value, or a well-formed absence.
///
/// Absence is an expected, frequent result and never an error; transport
/// faults travel separately through `AppResult`. Keeping the two apart means
/// a network failure can never masquerade as "nothing matched" or vice
/// versa.
#[derive(Debug, PartialEq)]
pub enum MatchOutcome<T> {
    Found(T),
    NoMatch,
}

impl<T> MatchOutcome<T> {
    pub fn found(self) -> Option<T> {
        match self {
            MatchOutcome::Found(value) => Some(value),
            MatchOutcome::NoMatch => None,
        }
    }
}

/// Selects the best-matching listing from a marketplace search page.
///
/// Filters by exact platform, then by the release-date window, then
/// tie-breaks in favor of the first candidate exposing a lowest-new-price
/// offer, falling back to the first candidate in upstream order. The
/// tie-break is deliberately order-dependent on the marketplace's result
/// ordering rather than price-optimal; the upstream ordering is not a
/// contractual guarantee, so a stable "best price" selection would need a
/// different upstream agreement.
pub fn select_listing<'a>(
    page: &'a ItemSearchResponse,
    query: &SearchQuery,
) -> MatchOutcome<&'a MarketplaceItem> {
    if page.total_results == 0 {
        return MatchOutcome::NoMatch;
    }

    let platform_matches: Vec<&MarketplaceItem> = page
        .items
        .iter()
        .filter(|item| item.attributes.platform.as_deref() == Some(query.platform.as_str()))
        .collect();

    if platform_matches.is_empty() {
        return MatchOutcome::NoMatch;
    }

    let in_window: Vec<&MarketplaceItem> = platform_matches
        .into_iter()
        .filter(|item| within_release_window(item, query))
        .collect();

    if in_window.is_empty() {
        return MatchOutcome::NoMatch;
    }

    let selected = in_window
        .iter()
        .copied()
        .find(|item| has_new_price(item))
        .unwrap_or(in_window[0]);

    MatchOutcome::Found(selected)
}

/// A listing with no release date cannot be placed in the window and is
/// excluded.
fn within_release_window(item: &MarketplaceItem, query: &SearchQuery) -> bool {
    match item.attributes.release_date {
        Some(date) => {
            (date - query.release_date).num_days().abs() <= RELEASE_DATE_TOLERANCE_DAYS
        }
        None => false,
    }
}

fn has_new_price(item: &MarketplaceItem) -> bool {
    item.offer_summary
        .as_ref()
        .and_then(|offers| offers.lowest_new_price.as_ref())
        .is_some()
}

/// Extracts the universal product code that keys the cross-reference lookup.
pub fn extract_product_code(item: &MarketplaceItem) -> MatchOutcome<&str> {
    match item.attributes.upc.as_deref() {
        Some(upc) if !upc.is_empty() => MatchOutcome::Found(upc),
        _ => MatchOutcome::NoMatch,
    }
}

/// Maps a product-keyed search response to its first result item.
///
/// A failure acknowledgement, an empty result set, or a response missing the
/// expected envelope all read as "no match"; only the transport layer can
/// produce a fault here.
pub fn first_cross_reference(response: &FindingResponse) -> MatchOutcome<CrossReferenceResult> {
    let Some(result) = response.responses.first() else {
        tracing::warn!("Product lookup response missing envelope, treating as no match");
        return MatchOutcome::NoMatch;
    };

    if result.ack.first().map(String::as_str) == Some("Failure") {
        return MatchOutcome::NoMatch;
    }

    match result.search_result.first().and_then(|r| r.items.first()) {
        Some(item) => MatchOutcome::Found(item.into()),
        None => MatchOutcome::NoMatch,
    }
}

/// Runs the full reconciliation pipeline for one query.
///
/// Keyword search on the primary marketplace, listing selection, product
/// code extraction, then a single cross-reference attempt on the secondary
/// marketplace. Every stage may end the pipeline early with a partial
/// result; the response is well-formed whichever stage stops it.
pub async fn reconcile(
    marketplace: &dyn MarketplaceSearch,
    finder: &dyn ProductFinder,
    query: &SearchQuery,
) -> AppResult<ReconciliationResult> {
    let page = marketplace.search_listings(&query.title).await?;

    let item = match select_listing(&page, query) {
        MatchOutcome::Found(item) => item,
        MatchOutcome::NoMatch => {
            tracing::info!(
                title = %query.title,
                platform = %query.platform,
                total_results = page.total_results,
                "No marketplace listing matched"
            );
            return Ok(ReconciliationResult::default());
        }
    };

    let primary = MarketplaceListing::from(item);

    let upc = match extract_product_code(item) {
        MatchOutcome::Found(upc) => upc.to_owned(),
        MatchOutcome::NoMatch => {
            tracing::info!(
                title = %query.title,
                "Matched listing carries no product code, skipping cross-reference"
            );
            return Ok(ReconciliationResult {
                primary_listing: Some(primary),
                secondary_listing: None,
            });
        }
    };

    let finding = finder.find_by_product_code(&upc).await?;
    let secondary = first_cross_reference(&finding).found();

    if secondary.is_none() {
        tracing::info!(upc = %upc, "No cross-referenced listing found");
    }

    Ok(ReconciliationResult {
        primary_listing: Some(primary),
        secondary_listing: secondary,
    })
}
