//! Search gateway, facet queries and the search page model.

mod search_for_results;
pub use search_for_results::{search_for_results, shape_search_result, try_search_for_results};

mod search_facets;
pub use search_facets::{search_facets, shape_facet_counts};

mod search_page;
pub use search_page::{
    FacetValueView, FacetView, SEARCH_PATH, SearchPageView, build_search_page, facet_value_label,
    search_page,
};

pub mod search_fallback;
pub mod search_params;
