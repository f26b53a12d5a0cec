use crate::db_utils::typesense_utils::SearchService;

/// True when the search service answers its health endpoint with `ok`.
pub async fn health_check(service: &dyn SearchService) -> bool {
    match service.health().await {
        Ok(ok) => ok,
        Err(e) => {
            tracing::warn!(error = %e, "Search service health check failed");
            false
        }
    }
}
