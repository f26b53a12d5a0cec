//! Lookup of a single catalogue document.

use common::search_result::Product;
use tracing::info;

use crate::db_utils::typesense_utils::SearchService;

pub async fn get_document(
    service: &dyn SearchService,
    collection: &str,
    id: &str,
) -> anyhow::Result<Product> {
    info!("Retrieving document: {}/{}", collection, id);
    let product = service.retrieve_document(collection, id).await?;
    Ok(product)
}
