use crate::config::Config;
use crate::error::{CmsError, Result};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Backend returned {status}: {message}")]
    Status { status: StatusCode, message: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

/// HTTP client for the hosted backend: row storage under `/rest/v1/<table>`
/// and object storage under `/storage/v1/object/<bucket>/<path>`.
///
/// Auth is the project's anon key; row-level security on the backend decides
/// what it may touch. One client per process is fine, reqwest pools
/// connections internally.
pub struct BackendClient {
    http: Client,
    base_url: String,
    anon_key: String,
}

impl BackendClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| CmsError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(BackendClient {
            http,
            base_url: config.backend_url.trim_end_matches('/').to_string(),
            anon_key: config.anon_key.clone(),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn object_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/storage/v1/object/{}/{}", self.base_url, bucket, path)
    }

    /// Publicly resolvable URL for an object in a public bucket
    pub fn public_object_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/storage/v1/object/public/{}/{}", self.base_url, bucket, path)
    }

    fn authed(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {}", self.anon_key))
    }

    pub(crate) async fn fetch<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> std::result::Result<Vec<T>, ClientError> {
        let response = self
            .authed(self.http.get(self.table_url(table)))
            .query(query)
            .send()
            .await?;
        let response = check_status(response).await?;

        response
            .json::<Vec<T>>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    pub(crate) async fn insert<T: DeserializeOwned, B: Serialize>(
        &self,
        table: &str,
        body: &B,
    ) -> std::result::Result<T, ClientError> {
        let response = self
            .authed(self.http.post(self.table_url(table)))
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await?;
        let response = check_status(response).await?;

        let rows: Vec<T> = response
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))?;
        rows.into_iter()
            .next()
            .ok_or_else(|| ClientError::Decode("insert returned no rows".to_string()))
    }

    /// Patches a single row by id. `Ok(None)` means no row matched.
    pub(crate) async fn update<T: DeserializeOwned, B: Serialize>(
        &self,
        table: &str,
        id: &str,
        body: &B,
    ) -> std::result::Result<Option<T>, ClientError> {
        let response = self
            .authed(self.http.patch(self.table_url(table)))
            .query(&[("id", format!("eq.{}", id))])
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await?;
        let response = check_status(response).await?;

        let rows: Vec<T> = response
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))?;
        Ok(rows.into_iter().next())
    }

    /// Deletes a single row by id; returns whether a row was actually deleted.
    pub(crate) async fn remove(
        &self,
        table: &str,
        id: &str,
    ) -> std::result::Result<bool, ClientError> {
        let response = self
            .authed(self.http.delete(self.table_url(table)))
            .query(&[("id", format!("eq.{}", id))])
            .header("Prefer", "return=representation")
            .send()
            .await?;
        let response = check_status(response).await?;

        let rows: Vec<serde_json::Value> = response
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))?;
        Ok(!rows.is_empty())
    }

    pub(crate) async fn upload(
        &self,
        bucket: &str,
        path: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> std::result::Result<(), ClientError> {
        let response = self
            .authed(self.http.post(self.object_url(bucket, path)))
            .header("Content-Type", content_type)
            .header("x-upsert", "true")
            .body(bytes)
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }
}

async fn check_status(response: Response) -> std::result::Result<Response, ClientError> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let message = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(ClientError::Status { status, message })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> BackendClient {
        let config = Config {
            backend_url: "https://project.example.co/".to_string(),
            ..Config::default()
        };
        BackendClient::new(&config).unwrap()
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = client();
        assert_eq!(
            client.table_url("posts"),
            "https://project.example.co/rest/v1/posts"
        );
    }

    #[test]
    fn test_public_object_url_shape() {
        let client = client();
        assert_eq!(
            client.public_object_url("post-images", "abc-cover.png"),
            "https://project.example.co/storage/v1/object/public/post-images/abc-cover.png"
        );
    }
}
