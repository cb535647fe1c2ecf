//! MailChimpClient — reqwest implementation of the remote API wrapper

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde_json::Value;
use shared::{AppError, AppResult};
use std::time::Duration;

use super::MailChimpApi;

/// HTTP client for the MailChimp v3 API
///
/// The datacenter is parsed from the API key suffix (`<key>-us6` →
/// `https://us6.api.mailchimp.com/3.0`); every request authenticates with
/// HTTP basic auth as MailChimp expects.
#[derive(Debug)]
pub struct MailChimpClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl MailChimpClient {
    /// Create a new client from an API key
    pub fn new(api_key: &str, timeout_ms: u64) -> Result<Self, AppError> {
        let datacenter = api_key
            .rsplit_once('-')
            .map(|(_, dc)| dc)
            .filter(|dc| !dc.is_empty())
            .ok_or_else(|| {
                AppError::internal("MailChimp API key has no datacenter suffix (expected <key>-<dc>)")
            })?;

        let base_url = format!("https://{datacenter}.api.mailchimp.com/3.0");

        tracing::info!(base_url = %base_url, "MailChimpClient: configured");

        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url,
            api_key: api_key.to_string(),
        })
    }

    /// Build a client against an explicit base URL (local test servers)
    pub fn with_base_url(api_key: &str, base_url: &str, timeout_ms: u64) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    async fn request(&self, method: Method, path: &str, body: Option<&Value>) -> AppResult<Value> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));

        let mut request = self
            .client
            .request(method, &url)
            .basic_auth("bridge", Some(&self.api_key));
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::upstream(e.to_string()))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AppError::upstream(e.to_string()))?;

        if status.is_success() {
            if text.is_empty() {
                return Ok(Value::Null);
            }
            serde_json::from_str(&text)
                .map_err(|e| AppError::upstream(format!("Invalid MailChimp response body: {e}")))
        } else {
            // MailChimp error bodies are problem+json with a `detail` field
            let detail = serde_json::from_str::<Value>(&text)
                .ok()
                .and_then(|v| v.get("detail").and_then(Value::as_str).map(str::to_string))
                .unwrap_or_else(|| format!("MailChimp request failed with status {status}"));
            tracing::warn!(%status, path = %path, "MailChimp request rejected");
            Err(AppError::upstream(detail))
        }
    }
}

#[async_trait]
impl MailChimpApi for MailChimpClient {
    async fn post(&self, path: &str, body: &Value) -> AppResult<Value> {
        self.request(Method::POST, path, Some(body)).await
    }

    async fn get(&self, path: &str) -> AppResult<Value> {
        self.request(Method::GET, path, None).await
    }

    async fn patch(&self, path: &str, body: &Value) -> AppResult<Value> {
        self.request(Method::PATCH, path, Some(body)).await
    }

    async fn delete(&self, path: &str) -> AppResult<()> {
        self.request(Method::DELETE, path, None).await.map(|_| ())
    }
}
