//! Storefront search backend: facet filters, the Typesense gateway and its HTTP surface.

pub mod api;
pub mod config;
pub mod db_utils;
pub mod logging;
pub mod server_extra;
