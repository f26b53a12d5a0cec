//! Highlighted snippets attached to search hits.

use serde::{Deserialize, Serialize};


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighlightTextSpan {
    pub text: String,
    pub is_highlighted: bool,
    pub index: u64,
}

/// Snippet for one document field, as markup and as decomposed spans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitHighlight {
    pub field: String,
    pub snippet: String,
    pub spans: Vec<HighlightTextSpan>,
}
