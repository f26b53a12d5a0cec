//! The search page model: hits, facets with toggle links, pagination.
//!
//! Every facet value carries the href that toggles it, so rendering never
//! has to touch the filter grammar.

use common::{
    filter_expression::{FacetSelection, FilterExpression},
    search_query::{RawSearchParams, SearchRequest},
    search_result::{SearchResult, SearchResultFacetCounts, SearchResultHit},
};
use serde::Serialize;
use url::form_urlencoded;

use crate::api::search::search_for_results::search_for_results;
use crate::db_utils::typesense_utils::SearchService;

pub const SEARCH_PATH: &str = "/search";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchPageView {
    pub query: String,
    pub filter_by: String,
    pub sort_by: String,
    pub page: u32,
    pub page_size: u32,
    pub found: u64,
    pub search_time_ms: u64,
    pub first_result: u64,
    pub last_result: u64,
    /// The user searched for something and nothing matched.
    pub no_results: bool,
    pub served_from_fallback: bool,
    pub hits: Vec<SearchResultHit>,
    pub facets: Vec<FacetView>,
    pub active_filters: Vec<FacetSelection>,
    pub clear_filters_href: Option<String>,
    pub previous_page_href: Option<String>,
    pub next_page_href: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacetView {
    pub field_name: String,
    pub label: String,
    pub values: Vec<FacetValueView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacetValueView {
    pub value: String,
    pub label: String,
    pub count: u64,
    pub checked: bool,
    pub toggle_href: String,
}

/// Normalize, search, and build the page in one go.
pub async fn search_page(
    service: &dyn SearchService,
    collection: &str,
    params: &RawSearchParams,
) -> SearchPageView {
    let request = SearchRequest::from_params(params);
    let result = search_for_results(service, collection, &request).await;
    build_search_page(&request, result)
}

pub fn build_search_page(request: &SearchRequest, result: SearchResult) -> SearchPageView {
    let query = request.user_query().unwrap_or_default().to_string();
    let filter_by = request.filter_by();
    let links = PageLinks {
        query: &query,
        filter_by: &filter_by,
        sort_by: &request.sort_by,
    };

    // the embedded catalogue only ever answers with its first page
    let page = if result.served_from_fallback {
        result.page.max(1)
    } else {
        request.page.max(1)
    };
    let page_size = u64::from(request.page_size.max(1));
    let (first_result, last_result) = if result.found == 0 {
        (0, 0)
    } else {
        (
            (u64::from(page) - 1) * page_size + 1,
            (u64::from(page) * page_size).min(result.found),
        )
    };

    let facets = result
        .facet_counts
        .iter()
        .map(|facet| facet_view(facet, &request.filter, &links))
        .collect();

    SearchPageView {
        no_results: result.found == 0 && !query.is_empty(),
        clear_filters_href: (!request.filter.is_empty()).then(|| links.clear_filters()),
        previous_page_href: (page > 1).then(|| links.page(page - 1)),
        next_page_href: (u64::from(page) * page_size < result.found).then(|| links.page(page + 1)),
        active_filters: request.filter.active_selections(),
        query,
        filter_by: filter_by.clone(),
        sort_by: request.sort_by.clone(),
        page,
        page_size: request.page_size,
        found: result.found,
        search_time_ms: result.search_time_ms,
        first_result,
        last_result,
        served_from_fallback: result.served_from_fallback,
        hits: result.hits,
        facets,
    }
}

fn facet_view(
    facet: &SearchResultFacetCounts,
    filter: &FilterExpression,
    links: &PageLinks<'_>,
) -> FacetView {
    let values = facet
        .counts
        .iter()
        .map(|item| FacetValueView {
            label: facet_value_label(&facet.field_name, &item.value),
            count: item.count,
            checked: filter.is_selected(&facet.field_name, &item.value),
            toggle_href: links
                .with_filter(&filter.toggle(&facet.field_name, &item.value).to_filter_by()),
            value: item.value.clone(),
        })
        .collect();

    FacetView {
        label: facet.field_name.replace('_', " "),
        field_name: facet.field_name.clone(),
        values,
    }
}

pub fn facet_value_label(field_name: &str, value: &str) -> String {
    match (field_name, value) {
        ("in_stock", "true") => "In Stock".to_string(),
        ("in_stock", _) => "Out of Stock".to_string(),
        _ => value.to_string(),
    }
}

struct PageLinks<'a> {
    query: &'a str,
    filter_by: &'a str,
    sort_by: &'a str,
}

impl PageLinks<'_> {
    /// Facet toggles always return to the first page.
    fn with_filter(&self, filter_by: &str) -> String {
        let mut pairs = vec![("q", self.query), ("sort_by", self.sort_by), ("page", "1")];
        if !filter_by.is_empty() {
            pairs.push(("filter_by", filter_by));
        }
        search_href(&pairs)
    }

    fn clear_filters(&self) -> String {
        search_href(&[("q", self.query), ("sort_by", self.sort_by)])
    }

    fn page(&self, page: u32) -> String {
        let page = page.to_string();
        let mut pairs = vec![("q", self.query)];
        if !self.filter_by.is_empty() {
            pairs.push(("filter_by", self.filter_by));
        }
        pairs.push(("sort_by", self.sort_by));
        pairs.push(("page", page.as_str()));
        search_href(&pairs)
    }
}

fn search_href(pairs: &[(&str, &str)]) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs.iter().copied())
        .finish();
    format!("{SEARCH_PATH}?{query}")
}
