//! Provider wiring
//!
//! Owns the shared client handle and hands it to every resource and data
//! source. The handle is fixed at construction.

use crate::http::HttpClient;
use crate::key_provider::KeyProviderById;
use crate::network::{NetworkById, NetworkByName};
use crate::node_join::FabricNetworkJoin;
use chainlaunch_config::ProviderConfig;
use chainlaunch_core::{RemoteClient, Result};
use std::sync::Arc;

/// Chainlaunch provider
#[derive(Clone)]
pub struct Provider {
    client: Arc<dyn RemoteClient>,
}

impl Provider {
    pub fn new(client: Arc<dyn RemoteClient>) -> Self {
        Self { client }
    }

    /// Build a provider talking HTTP to the configured API
    pub fn from_config(config: &ProviderConfig) -> Result<Self> {
        let client = HttpClient::new(config)?;
        tracing::debug!("Chainlaunch API at {}", client.base_url());
        Ok(Self::new(Arc::new(client)))
    }

    pub fn name(&self) -> &str {
        "chainlaunch"
    }

    pub fn fabric_network_join(&self) -> FabricNetworkJoin {
        FabricNetworkJoin::new(Arc::clone(&self.client))
    }

    pub fn network_by_name(&self) -> NetworkByName {
        NetworkByName::new(Arc::clone(&self.client))
    }

    pub fn network_by_id(&self) -> NetworkById {
        NetworkById::new(Arc::clone(&self.client))
    }

    pub fn key_provider(&self) -> KeyProviderById {
        KeyProviderById::new(Arc::clone(&self.client))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chainlaunch_core::{DataSource, ManagedResource, MockRemoteClient};

    #[test]
    fn test_resources_share_client() {
        let client: Arc<dyn RemoteClient> = Arc::new(MockRemoteClient::new());
        let provider = Provider::new(Arc::clone(&client));

        let _join = provider.fabric_network_join();
        let _lookup = provider.network_by_name();
        assert_eq!(Arc::strong_count(&client), 4);
    }

    #[test]
    fn test_type_names() {
        let provider = Provider::new(Arc::new(MockRemoteClient::new()));

        assert_eq!(provider.name(), "chainlaunch");
        assert_eq!(
            provider.fabric_network_join().type_name(),
            "chainlaunch_fabric_network_join"
        );
        assert_eq!(provider.network_by_name().type_name(), "chainlaunch_network");
        assert_eq!(provider.network_by_id().type_name(), "chainlaunch_network_by_id");
        assert_eq!(provider.key_provider().type_name(), "chainlaunch_key_provider");
    }

    #[test]
    fn test_from_config() {
        let config = ProviderConfig {
            url: "http://localhost:8100/api/v1".to_string(),
            username: "admin".to_string(),
            password: "admin".to_string(),
            timeout: None,
        };
        assert!(Provider::from_config(&config).is_ok());
    }
}
