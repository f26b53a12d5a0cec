//! Embedded catalogue served while the search service is unavailable.
//!
//! The fallback ignores filters, sorting and paging; it only narrows the two
//! embedded products by a case-insensitive substring match of the query.

use common::{
    search_const::WILDCARD_QUERY,
    search_result::{
        Product, SearchResult, SearchResultFacetCounts, SearchResultFacetItem, SearchResultHit,
    },
    text_highlight::HitHighlight,
};

use crate::db_utils::decompose_spans::decompose_text_into_spans;

pub fn fallback_search_result(query: &str) -> SearchResult {
    let query = query.trim().to_lowercase();
    let mut hits = fallback_hits();
    if !query.is_empty() && query != WILDCARD_QUERY {
        hits.retain(|hit| hit.document.matches_text(&query));
    }

    SearchResult {
        found: hits.len() as u64,
        hits,
        facet_counts: fallback_facet_counts(),
        search_time_ms: 1,
        page: 1,
        served_from_fallback: true,
    }
}

fn fallback_hits() -> Vec<SearchResultHit> {
    let strings = |values: &[&str]| values.iter().map(|v| v.to_string()).collect::<Vec<_>>();
    let highlight = |field: &str, snippet: &str| HitHighlight {
        field: field.to_string(),
        snippet: snippet.to_string(),
        spans: decompose_text_into_spans(snippet),
    };

    vec![
        SearchResultHit {
            document: Product {
                id: "1".to_string(),
                name: "Premium Wireless Headphones".to_string(),
                description: "High-quality wireless headphones with active noise cancellation."
                    .to_string(),
                content: "Experience premium audio with these professional-grade wireless headphones."
                    .to_string(),
                category: "Electronics".to_string(),
                subcategory: "Audio".to_string(),
                price: 299.99,
                currency: Some("USD".to_string()),
                rating: 4.5,
                reviews_count: 1250,
                in_stock: true,
                brand: "AudioTech".to_string(),
                tags: strings(&["wireless", "noise-cancellation", "premium"]),
                image_url: Some(
                    "https://via.placeholder.com/300x300/4F46E5/ffffff?text=Headphones".to_string(),
                ),
            },
            highlights: vec![highlight("name", "<mark>Premium</mark> Wireless Headphones")],
            text_match: 0,
        },
        SearchResultHit {
            document: Product {
                id: "2".to_string(),
                name: "Smart Watch Pro".to_string(),
                description: "Advanced fitness tracking and smartphone integration.".to_string(),
                content: "Stay connected and healthy with this advanced smartwatch.".to_string(),
                category: "Electronics".to_string(),
                subcategory: "Wearables".to_string(),
                price: 399.99,
                currency: Some("USD".to_string()),
                rating: 4.3,
                reviews_count: 890,
                in_stock: true,
                brand: "TechWear".to_string(),
                tags: strings(&["fitness", "health", "smart"]),
                image_url: Some(
                    "https://via.placeholder.com/300x300/10B981/ffffff?text=Smart+Watch".to_string(),
                ),
            },
            highlights: vec![highlight("name", "<mark>Smart</mark> Watch Pro")],
            text_match: 0,
        },
    ]
}

fn fallback_facet_counts() -> Vec<SearchResultFacetCounts> {
    let facet = |field_name: &str, counts: &[(&str, u64)]| SearchResultFacetCounts {
        field_name: field_name.to_string(),
        counts: counts
            .iter()
            .map(|(value, count)| SearchResultFacetItem {
                value: value.to_string(),
                highlighted: value.to_string(),
                count: *count,
            })
            .collect(),
    };

    vec![
        facet("category", &[("Electronics", 2)]),
        facet("brand", &[("AudioTech", 1), ("TechWear", 1)]),
        facet("in_stock", &[("true", 2)]),
    ]
}
