use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::search_result::Product;

use crate::api::documents::get_document::get_document as fetch_document;
use crate::db_utils::typesense_utils::SearchServiceError;
use crate::server_extra::AppState;

async fn _get_document(state: &AppState, id: &str) -> anyhow::Result<Product> {
    fetch_document(state.search_service.as_ref(), &state.collection, id).await
}

pub async fn get_document(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match _get_document(&state, &id).await {
        Ok(product) => Json(product).into_response(),
        Err(e) => {
            if let Some(SearchServiceError::NotFound(_)) = e.downcast_ref::<SearchServiceError>() {
                return (StatusCode::NOT_FOUND, e.to_string()).into_response();
            }
            tracing::error!("get_document: request failed: {:#?}", e);
            (StatusCode::BAD_GATEWAY, e.to_string()).into_response()
        }
    }
}
