use crate::models::article::{Article, ArticlePatch, NewArticle};
use crate::models::section::StoredSection;
use crate::store::client::{BackendClient, ClientError};
use crate::store::BulkDeleteOutcome;
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

const TABLE: &str = "news_articles";

#[derive(Error, Debug)]
pub enum ArticleError {
    #[error("Article not found")]
    NotFound,
    #[error("Backend error: {0}")]
    Backend(#[from] ClientError),
    #[error("Failed to encode article: {0}")]
    Encode(String),
}

/// Lists all articles, newest first
pub async fn list(client: &BackendClient) -> Result<Vec<Article>, ArticleError> {
    let articles = client
        .fetch(
            TABLE,
            &[
                ("select", "*".to_string()),
                ("order", "created_at.desc".to_string()),
            ],
        )
        .await?;
    Ok(articles)
}

/// Gets an article by ID; `Ok(None)` if it doesn't exist
pub async fn get(client: &BackendClient, id: &str) -> Result<Option<Article>, ArticleError> {
    let rows: Vec<Article> = client
        .fetch(
            TABLE,
            &[("select", "*".to_string()), ("id", format!("eq.{}", id))],
        )
        .await?;
    Ok(rows.into_iter().next())
}

/// Gets an article by its URL slug; `Ok(None)` if it doesn't exist
pub async fn get_by_slug(
    client: &BackendClient,
    slug: &str,
) -> Result<Option<Article>, ArticleError> {
    let rows: Vec<Article> = client
        .fetch(
            TABLE,
            &[("select", "*".to_string()), ("slug", format!("eq.{}", slug))],
        )
        .await?;
    Ok(rows.into_iter().next())
}

/// Creates an article. The sections, if any, are serialized into the store's
/// JSON-string column.
pub async fn create(client: &BackendClient, new: &NewArticle) -> Result<Article, ArticleError> {
    let body = with_encoded_sections(
        serde_json::to_value(new).map_err(|e| ArticleError::Encode(e.to_string()))?,
        new.sections.as_deref(),
    )?;
    let article = client.insert(TABLE, &body).await?;
    Ok(article)
}

/// Applies a partial update; fails with NotFound when the id is absent
pub async fn update(
    client: &BackendClient,
    id: &str,
    patch: &ArticlePatch,
) -> Result<Article, ArticleError> {
    let body = with_encoded_sections(
        serde_json::to_value(patch).map_err(|e| ArticleError::Encode(e.to_string()))?,
        patch.sections.as_deref(),
    )?;
    client
        .update(TABLE, id, &body)
        .await?
        .ok_or(ArticleError::NotFound)
}

/// Deletes an article; fails with NotFound when nothing was deleted
pub async fn delete(client: &BackendClient, id: &str) -> Result<(), ArticleError> {
    if !client.remove(TABLE, id).await? {
        return Err(ArticleError::NotFound);
    }
    Ok(())
}

/// Deletes a set of articles, one independent request per id, best effort
pub async fn delete_many(client: &BackendClient, ids: &[String]) -> BulkDeleteOutcome {
    let mut failed = Vec::new();
    for id in ids {
        match client.remove(TABLE, id).await {
            Ok(true) => {}
            Ok(false) => {
                warn!("Bulk delete: article {} not found", id);
                failed.push(id.clone());
            }
            Err(err) => {
                warn!("Bulk delete: article {} failed: {}", id, err);
                failed.push(id.clone());
            }
        }
    }
    BulkDeleteOutcome {
        requested: ids.len(),
        failed,
    }
}

/// The store keeps `sections` as a JSON-encoded string column, so the
/// structured array in the request body is re-encoded to a string before the
/// write goes out.
fn with_encoded_sections(
    mut body: Value,
    sections: Option<&[StoredSection]>,
) -> Result<Value, ArticleError> {
    if let Some(sections) = sections {
        let encoded =
            serde_json::to_string(sections).map_err(|e| ArticleError::Encode(e.to_string()))?;
        body["sections"] = Value::String(encoded);
    }
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::section::Section;

    #[test]
    fn test_sections_are_string_encoded_in_write_bodies() {
        let new = NewArticle {
            title: "T".to_string(),
            sections: Some(vec![Section::new("s1").to_stored()]),
            meta_title: None,
            meta_description: None,
            slug: "t".to_string(),
        };
        let body = with_encoded_sections(
            serde_json::to_value(&new).unwrap(),
            new.sections.as_deref(),
        )
        .unwrap();

        let column = body["sections"].as_str().expect("sections should be a string");
        let decoded: Vec<StoredSection> = serde_json::from_str(column).unwrap();
        assert_eq!(decoded[0].id, "s1");
    }

    #[test]
    fn test_absent_sections_stay_absent() {
        let patch = ArticlePatch {
            title: Some("T2".to_string()),
            ..Default::default()
        };
        let body = with_encoded_sections(
            serde_json::to_value(&patch).unwrap(),
            patch.sections.as_deref(),
        )
        .unwrap();
        assert!(body.get("sections").is_none());
    }
}
