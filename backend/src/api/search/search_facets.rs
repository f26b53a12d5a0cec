//! Facet count queries and response shaping.

use std::collections::HashSet;

use common::search_result::{SearchResultFacetCounts, SearchResultFacetItem};

use crate::api::search::search_params::build_facet_only_parameters;
use crate::db_utils::typesense_utils::{RawFacetCounts, SearchService};

/// Facet counts for a match-all query. Any service error yields an empty list.
pub async fn search_facets(
    service: &dyn SearchService,
    collection: &str,
    facet_by: &[String],
) -> Vec<SearchResultFacetCounts> {
    let params = build_facet_only_parameters(facet_by);
    match service.search_documents(collection, &params).await {
        Ok(response) => shape_facet_counts(response.facet_counts),
        Err(e) => {
            tracing::warn!(collection, error = %e, "search_facets: search service error");
            Vec::new()
        }
    }
}

/// Drops repeated values and orders each facet by count, then by value.
pub fn shape_facet_counts(raw_facets: Vec<RawFacetCounts>) -> Vec<SearchResultFacetCounts> {
    raw_facets
        .into_iter()
        .map(|facet| {
            let mut present_values = HashSet::new();
            let mut counts = Vec::with_capacity(facet.counts.len());
            for item in facet.counts {
                if !present_values.insert(item.value.clone()) {
                    continue;
                }
                counts.push(SearchResultFacetItem {
                    highlighted: if item.highlighted.is_empty() {
                        item.value.clone()
                    } else {
                        item.highlighted
                    },
                    value: item.value,
                    count: item.count,
                });
            }
            counts.sort_by_key(|item| (u64::MAX - item.count, item.value.clone()));
            SearchResultFacetCounts {
                field_name: facet.field_name,
                counts,
            }
        })
        .collect()
}
