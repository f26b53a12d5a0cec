//! HTTP routes of the storefront search server.

use std::sync::Arc;

use axum::{Router, routing::get};

use crate::db_utils::typesense_utils::SearchService;

pub mod get_document;
pub mod health;
pub mod search;

/// Shared by every handler. The search service is built once in `main`.
#[derive(Clone)]
pub struct AppState {
    pub search_service: Arc<dyn SearchService>,
    pub collection: String,
}

impl AppState {
    pub fn new(search_service: Arc<dyn SearchService>, collection: impl Into<String>) -> Self {
        Self {
            search_service,
            collection: collection.into(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(crate::api::search::SEARCH_PATH, get(search::search))
        .route("/documents/{id}", get(get_document::get_document))
        .route("/health", get(health::health))
        .with_state(state)
}
