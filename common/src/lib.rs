//! Common library exports shared by the search backend and its clients.

extern crate serde;


pub mod search_const;
pub mod filter_expression;
pub mod search_query;
pub mod search_result;
pub mod text_highlight;
