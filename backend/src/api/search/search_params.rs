//! Search parameter builders for the Typesense search endpoint.

use common::{search_const::WILDCARD_QUERY, search_query::SearchRequest};

use crate::db_utils::decompose_spans::MARK_TAGS;
use crate::db_utils::typesense_utils::SearchParameters;

pub const SNIPPET_THRESHOLD: u32 = 30;
pub const NUM_TYPOS: &str = "1";


pub fn build_search_parameters(request: &SearchRequest) -> SearchParameters {
    let filter_by = request.filter_by();

    SearchParameters {
        q: match request.query_string.trim() {
            "" => WILDCARD_QUERY.to_string(),
            q => q.to_string(),
        },
        query_by: request.query_by.join(","),
        filter_by: if filter_by.is_empty() { None } else { Some(filter_by) },
        sort_by: request.sort_by.clone(),
        facet_by: request.facet_by.join(","),
        max_facet_values: request.max_facet_values,
        page: request.page.max(1),
        per_page: request.page_size.max(1),
        highlight_fields: request.highlight_fields.join(","),
        highlight_start_tag: MARK_TAGS.start.to_string(),
        highlight_end_tag: MARK_TAGS.end.to_string(),
        snippet_threshold: SNIPPET_THRESHOLD,
        num_typos: NUM_TYPOS.to_string(),
        prefix: true,
        enable_overrides: true,
    }
}

/// Match-all query returning facet counts only.
pub fn build_facet_only_parameters(facet_by: &[String]) -> SearchParameters {
    let request = SearchRequest {
        facet_by: facet_by.to_vec(),
        ..SearchRequest::default()
    };
    SearchParameters {
        per_page: 0,
        ..build_search_parameters(&request)
    }
}
