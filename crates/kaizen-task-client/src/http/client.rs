/*
[INPUT]:  HTTP configuration (base URL, timeouts) and bearer credentials
[OUTPUT]: Configured reqwest client ready for task-store calls
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use crate::auth::Credential;
use crate::http::{Result, TaskStoreError};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

/// Default base URL for the task-store service
const STORE_BASE_URL: &str = "http://localhost:4875";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// HTTP client for the external task-store service
#[derive(Debug)]
pub struct KaizenClient {
    http_client: Client,
    base_url: Url,
}

impl KaizenClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Self::with_config_and_base_url(config, STORE_BASE_URL)
    }

    /// Create a new client against an explicit base URL (tests, self-hosted stores)
    pub fn with_config_and_base_url(config: ClientConfig, base_url: &str) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(TaskStoreError::Unreachable)?;

        let base_url = Url::parse(base_url)?;

        Ok(Self {
            http_client,
            base_url,
        })
    }

    /// Build full URL for a store endpoint
    fn store_url(&self, endpoint: &str) -> Result<Url> {
        Ok(self.base_url.join(endpoint)?)
    }

    /// Build request builder with bearer authorization
    pub(crate) fn request_with_bearer(
        &self,
        method: Method,
        endpoint: &str,
        credential: &Credential,
    ) -> Result<RequestBuilder> {
        let url = self.store_url(endpoint)?;
        Ok(self
            .http_client
            .request(method, url)
            .bearer_auth(&credential.token))
    }

    /// Send a request and deserialize a 2xx JSON body
    pub(crate) async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TaskStoreError::from_status(
                status,
                error_payload(response).await,
            ));
        }
        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| TaskStoreError::Invalid(format!("malformed body: {e}")))
    }
}

/// Extract the store's JSON error payload as the surfaced message.
/// The store answers non-2xx with a JSON-encoded string.
pub(crate) async fn error_payload(response: reqwest::Response) -> String {
    let body = response.text().await.unwrap_or_default();
    match serde_json::from_str::<serde_json::Value>(&body) {
        Ok(serde_json::Value::String(message)) => message,
        Ok(value) => value.to_string(),
        Err(_) => body,
    }
}
