//! Remote control-plane client abstraction

use crate::error::Result;
use async_trait::async_trait;
use serde::de::DeserializeOwned;

/// Issues requests against the control-plane API
///
/// Paths are relative to the API root (e.g. `/networks/fabric/12/nodes`).
/// Implementations return the raw response body on a 2xx response and
/// [`ProviderError::Remote`](crate::ProviderError::Remote) otherwise. They
/// hold no per-call state and are shared read-only across resources.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait RemoteClient: Send + Sync {
    /// GET `path`
    async fn get(&self, path: &str) -> Result<Vec<u8>>;

    /// POST `path`, optionally with a JSON body
    async fn post(&self, path: &str, body: Option<serde_json::Value>) -> Result<Vec<u8>>;
}

/// Decode a response body, reporting the endpoint on failure
pub fn decode_body<T: DeserializeOwned>(path: &str, body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(|e| crate::ProviderError::parse(path, e))
}
