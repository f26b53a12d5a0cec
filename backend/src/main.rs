//! Storefront search server entry point.

use std::sync::Arc;

use anyhow::Context;
use backend::{
    config::StorefrontConfig,
    db_utils::typesense_utils::TypesenseClient,
    logging::init_logging,
    server_extra::{AppState, router},
};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = StorefrontConfig::load()?;
    let client = TypesenseClient::new(&config.typesense)?;
    let state = AppState::new(Arc::new(client), config.collection.clone());

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_addr))?;
    info!(
        "Storefront search listening on {} (typesense at {}, collection {})",
        config.listen_addr,
        config.typesense.base_url(),
        config.collection
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;
    Ok(())
}
