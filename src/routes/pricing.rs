use axum::{extract::State, Extension, Json};

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::{ReconciliationResult, SearchQuery},
    services::pricing,
    state::AppState,
};

/// Handler for the cross-marketplace price reconciliation endpoint.
///
/// Always responds 200 with a `ReconciliationResult`; a listing that cannot
/// be matched leaves its side null. Only a dependency fault produces an
/// error status.
pub async fn reconcile(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(query): Json<SearchQuery>,
) -> AppResult<Json<ReconciliationResult>> {
    tracing::info!(
        request_id = %request_id,
        title = %query.title,
        platform = %query.platform,
        "Processing price reconciliation"
    );

    let result = pricing::reconcile(
        state.marketplace.as_ref(),
        state.finder.as_ref(),
        &query,
    )
    .await?;

    tracing::info!(
        request_id = %request_id,
        matched_primary = result.primary_listing.is_some(),
        matched_secondary = result.secondary_listing.is_some(),
        "Price reconciliation completed"
    );

    Ok(Json(result))
}
