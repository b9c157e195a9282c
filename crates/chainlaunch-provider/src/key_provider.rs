//! Key provider data source

use crate::models::{KeyProvider, merge_string};
use async_trait::async_trait;
use chainlaunch_core::{DataSource, RemoteClient, Result, decode_body};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Key provider data source model; `id` is the input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyProviderData {
    pub id: u64,
    pub name: Option<String>,
    pub provider_type: Option<String>,
    pub is_default: Option<bool>,
    pub status: Option<String>,
    pub created_at: Option<String>,
}

impl KeyProviderData {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            name: None,
            provider_type: None,
            is_default: None,
            status: None,
            created_at: None,
        }
    }

    pub fn merge(&mut self, remote: &KeyProvider) {
        merge_string(&mut self.name, &remote.name);
        merge_string(&mut self.provider_type, &remote.provider_type);
        merge_string(&mut self.status, &remote.status);
        merge_string(&mut self.created_at, &remote.created_at);
        if remote.is_default.is_some() {
            self.is_default = remote.is_default;
        }
    }
}

/// Fetches a key provider by ID
pub struct KeyProviderById {
    client: Arc<dyn RemoteClient>,
}

impl KeyProviderById {
    pub fn new(client: Arc<dyn RemoteClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DataSource for KeyProviderById {
    type Model = KeyProviderData;

    fn type_name(&self) -> &str {
        "chainlaunch_key_provider"
    }

    async fn read(&self, mut model: KeyProviderData) -> Result<KeyProviderData> {
        let path = format!("/key-providers/{}", model.id);
        let body = self.client.get(&path).await?;
        let provider: KeyProvider = decode_body(&path, &body)?;

        model.merge(&provider);
        Ok(model)
    }
}
