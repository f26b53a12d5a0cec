//! Search gateway: one request to the search service, embedded fallback on failure.

use common::{
    search_query::SearchRequest,
    search_result::{Product, SearchResult, SearchResultHit},
    text_highlight::HitHighlight,
};

use crate::api::search::search_facets::shape_facet_counts;
use crate::api::search::search_fallback::fallback_search_result;
use crate::api::search::search_params::build_search_parameters;
use crate::db_utils::decompose_spans::HighlightTags;
use crate::db_utils::typesense_utils::{
    RawSearchHit, RawSearchResponse, SearchService, SearchServiceError,
};

/// Never fails: any service error is logged and answered from the embedded
/// catalogue. No retries.
pub async fn search_for_results(
    service: &dyn SearchService,
    collection: &str,
    request: &SearchRequest,
) -> SearchResult {
    match try_search_for_results(service, collection, request).await {
        Ok(result) => result,
        Err(e) => {
            tracing::warn!(
                collection,
                query = %request.query_string,
                error = %e,
                "Falling back to embedded results: search service error"
            );
            fallback_search_result(&request.query_string)
        }
    }
}

pub async fn try_search_for_results(
    service: &dyn SearchService,
    collection: &str,
    request: &SearchRequest,
) -> Result<SearchResult, SearchServiceError> {
    let params = build_search_parameters(request);
    let response = service.search_documents(collection, &params).await?;
    tracing::info!(
        collection,
        q = %params.q,
        filter_by = params.filter_by.as_deref().unwrap_or(""),
        found = response.found,
        search_time_ms = response.search_time_ms,
        "search completed"
    );
    let tags = HighlightTags {
        start: &params.highlight_start_tag,
        end: &params.highlight_end_tag,
    };
    Ok(shape_search_result(response, &tags))
}

/// `tags` must be the highlight markers the search was sent with.
pub fn shape_search_result(
    response: RawSearchResponse<Product>,
    tags: &HighlightTags<'_>,
) -> SearchResult {
    SearchResult {
        hits: response.hits.into_iter().map(|hit| shape_hit(hit, tags)).collect(),
        facet_counts: shape_facet_counts(response.facet_counts),
        found: response.found,
        search_time_ms: response.search_time_ms,
        page: response.page.max(1),
        served_from_fallback: false,
    }
}

fn shape_hit(hit: RawSearchHit<Product>, tags: &HighlightTags<'_>) -> SearchResultHit {
    let highlights = hit
        .highlights
        .into_iter()
        .filter_map(|highlight| {
            let snippet = match highlight.snippet {
                Some(snippet) => snippet,
                None if !highlight.snippets.is_empty() => highlight.snippets.join(" … "),
                None => return None,
            };
            Some(HitHighlight {
                field: highlight.field,
                spans: tags.decompose(&snippet),
                snippet,
            })
        })
        .collect();

    SearchResultHit {
        document: hit.document,
        highlights,
        text_match: hit.text_match,
    }
}
