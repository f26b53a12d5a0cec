use axum::{Json, extract::State};
use serde_json::{Value, json};

use crate::api::health::health_check;
use crate::server_extra::AppState;

pub async fn health(State(state): State<AppState>) -> Json<Value> {
    let ok = health_check(state.search_service.as_ref()).await;
    Json(json!({ "ok": ok }))
}
