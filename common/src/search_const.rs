//! Defaults shared by the request normalizer and the search gateway.

pub const PRODUCTS_COLLECTION: &str = "products";

pub const PAGE_SIZE: u32 = 12;

pub const WILDCARD_QUERY: &str = "*";

pub const DEFAULT_SORT_BY: &str = "_text_match:desc,rating:desc";

pub const DEFAULT_QUERY_BY: &[&str] = &["name", "description", "content", "category", "tags"];

pub const DEFAULT_FACET_BY: &[&str] = &["category", "brand", "in_stock"];

pub const DEFAULT_HIGHLIGHT_FIELDS: &[&str] = &["name", "description"];

pub const DEFAULT_MAX_FACET_VALUES: u32 = 10;

// facet fields whose clauses are not set-membership tests
pub const BOOLEAN_FACET_FIELDS: &[&str] = &["in_stock"];
pub const NUMERIC_FACET_FIELDS: &[&str] = &["price", "rating"];
