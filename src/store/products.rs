use crate::models::product::{NewProduct, Product, ProductPatch};
use crate::store::client::{BackendClient, ClientError};
use crate::store::BulkDeleteOutcome;
use thiserror::Error;
use tracing::warn;

const TABLE: &str = "posts";

#[derive(Error, Debug)]
pub enum ProductError {
    #[error("Product not found")]
    NotFound,
    #[error("Backend error: {0}")]
    Backend(#[from] ClientError),
}

/// Lists all products, newest first
pub async fn list(client: &BackendClient) -> Result<Vec<Product>, ProductError> {
    let products = client
        .fetch(
            TABLE,
            &[
                ("select", "*".to_string()),
                ("order", "created_at.desc".to_string()),
            ],
        )
        .await?;
    Ok(products)
}

/// Gets a product by ID; `Ok(None)` if it doesn't exist
pub async fn get(client: &BackendClient, id: &str) -> Result<Option<Product>, ProductError> {
    let rows: Vec<Product> = client
        .fetch(
            TABLE,
            &[("select", "*".to_string()), ("id", format!("eq.{}", id))],
        )
        .await?;
    Ok(rows.into_iter().next())
}

/// Creates a product; the backend assigns identity and timestamps
pub async fn create(client: &BackendClient, new: &NewProduct) -> Result<Product, ProductError> {
    let product = client.insert(TABLE, new).await?;
    Ok(product)
}

/// Applies a partial update; fails with NotFound when the id is absent
pub async fn update(
    client: &BackendClient,
    id: &str,
    patch: &ProductPatch,
) -> Result<Product, ProductError> {
    client
        .update(TABLE, id, patch)
        .await?
        .ok_or(ProductError::NotFound)
}

/// Deletes a product; fails with NotFound when nothing was deleted
pub async fn delete(client: &BackendClient, id: &str) -> Result<(), ProductError> {
    if !client.remove(TABLE, id).await? {
        return Err(ProductError::NotFound);
    }
    Ok(())
}

/// Deletes a set of products, one independent request per id.
///
/// Best effort, no atomicity across the set: ids that fail (missing row,
/// transport error) are collected and reported, the rest still go through.
pub async fn delete_many(client: &BackendClient, ids: &[String]) -> BulkDeleteOutcome {
    let mut failed = Vec::new();
    for id in ids {
        match client.remove(TABLE, id).await {
            Ok(true) => {}
            Ok(false) => {
                warn!("Bulk delete: product {} not found", id);
                failed.push(id.clone());
            }
            Err(err) => {
                warn!("Bulk delete: product {} failed: {}", id, err);
                failed.push(id.clone());
            }
        }
    }
    BulkDeleteOutcome {
        requested: ids.len(),
        failed,
    }
}
