use axum::{
    Json,
    extract::{Query, State},
};
use common::search_query::RawSearchParams;
use tracing::info;

use crate::api::search::{SearchPageView, search_page};
use crate::server_extra::AppState;

/// Always answers 200; a degraded result is flagged in the body.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<RawSearchParams>,
) -> Json<SearchPageView> {
    info!("Search: q={:?} filter_by={:?} page={:?}", params.q, params.filter_by, params.page);
    let view = search_page(state.search_service.as_ref(), &state.collection, &params).await;
    Json(view)
}
