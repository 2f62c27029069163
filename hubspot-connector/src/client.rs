//! HubSpot CRM API client
//!
//! Thin bearer-token wrapper over the `crm/v3/objects` endpoints. No retries
//! and no caching; transient-failure handling belongs to the caller.
//!
//! API docs: https://developers.hubspot.com/docs/api/crm/search

use anyhow::Context;
use connector_common::ConnectorError;
use hubspot_search::SearchRequest;
use reqwest::{Client, Method};
use serde::Deserialize;
use serde_json::Value;

use crate::config;

pub struct HubspotApi {
    client: Client,
    base_url: String,
    token: String,
}

impl std::fmt::Debug for HubspotApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HubspotApi")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Response from the object search endpoint. Result objects are kept as raw
/// JSON so every attribute survives into `Record.data`.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub total: i64,
    pub results: Vec<Value>,
}

/// Response from object creation.
#[derive(Debug, Deserialize)]
pub struct CreatedObject {
    pub id: String,
}

impl HubspotApi {
    /// Creates a client using the access token from the environment and the
    /// default base URL.
    pub fn new() -> anyhow::Result<Self> {
        let token = config::access_token_from_env()?;
        Self::with_config(config::BASE_URL, token)
    }

    /// Creates a client against an explicit base URL (tests, CLI overrides).
    pub fn with_config(
        base_url: impl Into<String>,
        token: impl Into<String>,
    ) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config::REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to create HTTP client")?;

        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        Ok(Self {
            client,
            base_url,
            token: token.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request_builder(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client
            .request(method, &url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Content-Type", "application/json")
    }

    async fn handle_error(&self, response: reqwest::Response) -> ConnectorError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        ConnectorError::AbortedOperation(format!("HubSpot API error ({}): {}", status, body))
    }

    /// POST `crm/v3/objects/{objectType}/search` with a compiled request
    /// body.
    pub async fn search(
        &self,
        object_type: &str,
        body: &SearchRequest,
    ) -> Result<SearchResponse, ConnectorError> {
        let path = format!(
            "crm/v{}/objects/{}/search",
            config::API_VERSION,
            object_type
        );
        let response = self
            .request_builder(Method::POST, &path)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                ConnectorError::AbortedOperation(format!("Failed to send search request: {}", e))
            })?;

        if !response.status().is_success() {
            return Err(self.handle_error(response).await);
        }

        response.json().await.map_err(|e| {
            ConnectorError::AbortedOperation(format!("Failed to parse search response: {}", e))
        })
    }

    /// POST `crm/v3/objects/{objectType}` with `{"properties": {...}}`.
    pub async fn create(
        &self,
        object_type: &str,
        properties: &Value,
    ) -> Result<CreatedObject, ConnectorError> {
        let path = format!("crm/v{}/objects/{}", config::API_VERSION, object_type);
        let response = self
            .request_builder(Method::POST, &path)
            .json(&serde_json::json!({ "properties": properties }))
            .send()
            .await
            .map_err(|e| {
                ConnectorError::AbortedOperation(format!("Failed to send create request: {}", e))
            })?;

        if !response.status().is_success() {
            return Err(self.handle_error(response).await);
        }

        response.json().await.map_err(|e| {
            ConnectorError::AbortedOperation(format!("Failed to parse create response: {}", e))
        })
    }

    /// PATCH `crm/v3/objects/{objectType}/{recordId}` with
    /// `{"properties": {...}}`.
    pub async fn update(
        &self,
        object_type: &str,
        record_id: &str,
        properties: &Value,
    ) -> Result<(), ConnectorError> {
        let path = format!(
            "crm/v{}/objects/{}/{}",
            config::API_VERSION,
            object_type,
            record_id
        );
        let response = self
            .request_builder(Method::PATCH, &path)
            .json(&serde_json::json!({ "properties": properties }))
            .send()
            .await
            .map_err(|e| {
                ConnectorError::AbortedOperation(format!("Failed to send update request: {}", e))
            })?;

        if !response.status().is_success() {
            return Err(self.handle_error(response).await);
        }

        Ok(())
    }
}
