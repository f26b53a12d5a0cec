//! Shared search request models and the raw parameter normalizer.

use serde::{Deserialize, Serialize};

use crate::filter_expression::FilterExpression;
use crate::search_const::{
    DEFAULT_FACET_BY, DEFAULT_HIGHLIGHT_FIELDS, DEFAULT_MAX_FACET_VALUES, DEFAULT_QUERY_BY,
    DEFAULT_SORT_BY, PAGE_SIZE, WILDCARD_QUERY,
};


/// Query parameters exactly as they arrive on the search page URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RawSearchParams {
    pub q: Option<String>,
    pub filter_by: Option<String>,
    pub sort_by: Option<String>,
    pub page: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchRequest {
    pub query_string: String,
    pub filter: FilterExpression,
    pub sort_by: String,
    pub page: u32,
    pub page_size: u32,
    pub query_by: Vec<String>,
    pub facet_by: Vec<String>,
    pub highlight_fields: Vec<String>,
    pub max_facet_values: u32,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            query_string: WILDCARD_QUERY.to_string(),
            filter: FilterExpression::default(),
            sort_by: DEFAULT_SORT_BY.to_string(),
            page: 1,
            page_size: PAGE_SIZE,
            query_by: to_strings(DEFAULT_QUERY_BY),
            facet_by: to_strings(DEFAULT_FACET_BY),
            highlight_fields: to_strings(DEFAULT_HIGHLIGHT_FIELDS),
            max_facet_values: DEFAULT_MAX_FACET_VALUES,
        }
    }
}

impl SearchRequest {
    /// Fills defaults for missing or blank parameters. Never fails: a page
    /// number that is not a positive integer becomes page 1.
    pub fn from_params(params: &RawSearchParams) -> Self {
        let query_string = non_blank(params.q.as_deref()).unwrap_or(WILDCARD_QUERY).to_string();
        let sort_by = non_blank(params.sort_by.as_deref()).unwrap_or(DEFAULT_SORT_BY).to_string();
        let filter = FilterExpression::parse(params.filter_by.as_deref().unwrap_or_default());

        Self {
            query_string,
            filter,
            sort_by,
            page: parse_page_number(params.page.as_deref()),
            ..Self::default()
        }
    }

    /// The text the user typed, or `None` for the match-all query.
    pub fn user_query(&self) -> Option<&str> {
        let query = self.query_string.trim();
        if query.is_empty() || query == WILDCARD_QUERY {
            None
        } else {
            Some(query)
        }
    }

    pub fn filter_by(&self) -> String {
        self.filter.to_filter_by()
    }
}

pub fn parse_page_number(raw: Option<&str>) -> u32 {
    raw.and_then(|page| page.trim().parse::<u32>().ok())
        .filter(|page| *page >= 1)
        .unwrap_or(1)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
