//! Chainlaunch REST API client
//!
//! Thin `reqwest` transport behind [`RemoteClient`]. Authenticates every
//! request with HTTP basic auth and returns raw response bodies; decoding is
//! left to the resources. No retries are attempted.

use async_trait::async_trait;
use chainlaunch_config::ProviderConfig;
use chainlaunch_core::{ProviderError, RemoteClient, Result};
use reqwest::header::ACCEPT;

/// HTTP client for the control-plane API
pub struct HttpClient {
    client: reqwest::Client,
    base_url: String,
    username: String,
    password: String,
}

impl HttpClient {
    /// Create a client for the configured API root
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ProviderError::Remote(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: reqwest::RequestBuilder, method: &str, path: &str) -> Result<Vec<u8>> {
        tracing::debug!("{} {}", method, self.url(path));

        let response = request
            .basic_auth(&self.username, Some(&self.password))
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| ProviderError::Remote(format!("{} {}: {}", method, path, e)))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ProviderError::Remote(format!("{} {}: {}", method, path, e)))?;

        if !status.is_success() {
            let message = String::from_utf8_lossy(&body);
            return Err(ProviderError::Remote(format!(
                "{} {} returned {}: {}",
                method,
                path,
                status,
                message.trim()
            )));
        }

        Ok(body.to_vec())
    }
}

#[async_trait]
impl RemoteClient for HttpClient {
    async fn get(&self, path: &str) -> Result<Vec<u8>> {
        let request = self.client.get(self.url(path));
        self.send(request, "GET", path).await
    }

    async fn post(&self, path: &str, body: Option<serde_json::Value>) -> Result<Vec<u8>> {
        let mut request = self.client.post(self.url(path));
        if let Some(body) = &body {
            request = request.json(body);
        }
        self.send(request, "POST", path).await
    }
}
