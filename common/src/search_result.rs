use serde::{Deserialize, Serialize};

use crate::text_highlight::HitHighlight;


/// One executed query. Built once per request and never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub hits: Vec<SearchResultHit>,
    pub facet_counts: Vec<SearchResultFacetCounts>,
    pub found: u64,
    pub search_time_ms: u64,
    pub page: u32,
    /// Set when the search service failed and the embedded catalogue was used.
    pub served_from_fallback: bool,
}

impl SearchResult {
    pub fn facet(&self, field_name: &str) -> Option<&SearchResultFacetCounts> {
        self.facet_counts.iter().find(|facet| facet.field_name == field_name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResultHit {
    pub document: Product,
    pub highlights: Vec<HitHighlight>,
    pub text_match: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResultFacetCounts {
    pub field_name: String,
    pub counts: Vec<SearchResultFacetItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResultFacetItem {
    pub value: String,
    pub highlighted: String,
    pub count: u64,
}

/// A document of the `products` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub content: String,
    pub category: String,
    pub subcategory: String,
    pub price: f64,
    pub currency: Option<String>,
    pub rating: f64,
    pub reviews_count: u64,
    pub in_stock: bool,
    pub brand: String,
    pub tags: Vec<String>,
    pub image_url: Option<String>,
}

impl Product {
    /// Case-insensitive substring match over name, description and category.
    /// `needle` must already be lowercase.
    pub fn matches_text(&self, needle: &str) -> bool {
        [&self.name, &self.description, &self.category]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}
