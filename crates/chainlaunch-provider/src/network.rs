//! Network data sources
//!
//! Read-only lookups of Fabric and Besu networks, either by name through the
//! list-filter resolver or directly by ID.

use crate::lookup::ListFilter;
use crate::models::{Network, NetworkList, merge_string};
use async_trait::async_trait;
use chainlaunch_core::{DataSource, ProviderError, RemoteClient, Result, decode_body};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

/// Blockchain platform of a network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Fabric,
    Besu,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Fabric => "fabric",
            Platform::Besu => "besu",
        }
    }

    /// List endpoint for this platform
    pub fn list_path(&self) -> String {
        format!("/networks/{}", self.as_str())
    }

    /// Endpoint of a single network
    pub fn network_path(&self, id: u64) -> String {
        format!("/networks/{}/{}", self.as_str(), id)
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "fabric" => Ok(Platform::Fabric),
            "besu" => Ok(Platform::Besu),
            other => Err(ProviderError::Validation(format!(
                "platform must be one of fabric, besu; got {:?}",
                other
            ))),
        }
    }
}

/// Network data source model
///
/// `name` (by-name lookup) or `id` (by-ID lookup) is the input; the other
/// fields are filled from the remote record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkData {
    pub platform: Platform,
    pub name: Option<String>,
    pub id: Option<u64>,
    pub status: Option<String>,
    pub description: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl NetworkData {
    pub fn by_name(platform: Platform, name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::empty(platform)
        }
    }

    pub fn by_id(platform: Platform, id: u64) -> Self {
        Self {
            id: Some(id),
            ..Self::empty(platform)
        }
    }

    fn empty(platform: Platform) -> Self {
        Self {
            platform,
            name: None,
            id: None,
            status: None,
            description: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Project a remote network, leaving fields the remote omits untouched
    pub fn merge(&mut self, remote: &Network) {
        self.id = Some(remote.id);
        if !remote.name.is_empty() {
            self.name = Some(remote.name.clone());
        }
        merge_string(&mut self.status, &remote.status);
        merge_string(&mut self.description, &remote.description);
        merge_string(&mut self.created_at, &remote.created_at);
        merge_string(&mut self.updated_at, &remote.updated_at);
    }
}

/// Resolves a network by its unique name
pub struct NetworkByName {
    client: Arc<dyn RemoteClient>,
}

impl NetworkByName {
    pub fn new(client: Arc<dyn RemoteClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DataSource for NetworkByName {
    type Model = NetworkData;

    fn type_name(&self) -> &str {
        "chainlaunch_network"
    }

    async fn read(&self, mut model: NetworkData) -> Result<NetworkData> {
        let name = model.name.clone().ok_or_else(|| {
            ProviderError::Validation("network lookup: name is required".to_string())
        })?;

        let filter = ListFilter::new(self.client.as_ref(), model.platform.list_path());
        let network = filter
            .find_first::<NetworkList, _>("name", &name, |n| n.name.as_str())
            .await?;

        tracing::debug!("Resolved {} network {:?} to id {}", model.platform, name, network.id);
        model.merge(&network);
        Ok(model)
    }
}

/// Fetches a network by ID
pub struct NetworkById {
    client: Arc<dyn RemoteClient>,
}

impl NetworkById {
    pub fn new(client: Arc<dyn RemoteClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DataSource for NetworkById {
    type Model = NetworkData;

    fn type_name(&self) -> &str {
        "chainlaunch_network_by_id"
    }

    async fn read(&self, mut model: NetworkData) -> Result<NetworkData> {
        let id = model.id.ok_or_else(|| {
            ProviderError::Validation("network lookup: id is required".to_string())
        })?;

        let path = model.platform.network_path(id);
        let body = self.client.get(&path).await?;
        let network: Network = decode_body(&path, &body)?;

        model.merge(&network);
        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chainlaunch_core::MockRemoteClient;
    use mockall::predicate::*;

    const NETWORKS: &[u8] = br#"{
        "networks": [
            {"id": 3, "name": "testnet", "status": "running"},
            {"id": 12, "name": "mainnet", "status": "running", "description": "", "createdAt": "2024-05-01T00:00:00Z"},
            {"id": 13, "name": "mainnet", "status": "stopped"}
        ]
    }"#;

    fn client_with_networks(path: &'static str) -> Arc<dyn RemoteClient> {
        let mut client = MockRemoteClient::new();
        client
            .expect_get()
            .with(eq(path))
            .times(1)
            .returning(|_| Ok(NETWORKS.to_vec()));
        Arc::new(client)
    }

    #[tokio::test]
    async fn test_by_name_first_match() {
        let source = NetworkByName::new(client_with_networks("/networks/fabric"));

        let data = source
            .read(NetworkData::by_name(Platform::Fabric, "mainnet"))
            .await
            .unwrap();

        assert_eq!(data.id, Some(12));
        assert_eq!(data.status.as_deref(), Some("running"));
        assert_eq!(data.created_at.as_deref(), Some("2024-05-01T00:00:00Z"));
    }

    #[tokio::test]
    async fn test_by_name_keeps_known_values_for_empty_fields() {
        let source = NetworkByName::new(client_with_networks("/networks/besu"));

        let mut prior = NetworkData::by_name(Platform::Besu, "mainnet");
        prior.description = Some("production ledger".to_string());
        prior.updated_at = Some("2024-01-01T00:00:00Z".to_string());

        let data = source.read(prior).await.unwrap();

        assert_eq!(data.description.as_deref(), Some("production ledger"));
        assert_eq!(data.updated_at.as_deref(), Some("2024-01-01T00:00:00Z"));
    }

    #[tokio::test]
    async fn test_by_name_not_found() {
        let source = NetworkByName::new(client_with_networks("/networks/fabric"));

        let err = source
            .read(NetworkData::by_name(Platform::Fabric, "Mainnet"))
            .await
            .unwrap_err();

        match err {
            ProviderError::NotFound(msg) => assert!(msg.contains("\"Mainnet\"")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_by_name_requires_name() {
        let source = NetworkByName::new(Arc::new(MockRemoteClient::new()));

        let model = NetworkData::by_id(Platform::Fabric, 1);
        assert!(matches!(
            source.read(model).await,
            Err(ProviderError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_by_id() {
        let mut client = MockRemoteClient::new();
        client
            .expect_get()
            .with(eq("/networks/besu/4"))
            .times(1)
            .returning(|_| Ok(br#"{"id": 4, "name": "qbft", "platform": "besu"}"#.to_vec()));
        let source = NetworkById::new(Arc::new(client));

        let data = source.read(NetworkData::by_id(Platform::Besu, 4)).await.unwrap();
        assert_eq!(data.name.as_deref(), Some("qbft"));
        assert_eq!(data.status, None);
    }

    #[test]
    fn test_platform_from_str() {
        assert_eq!("fabric".parse::<Platform>().unwrap(), Platform::Fabric);
        assert_eq!("besu".parse::<Platform>().unwrap(), Platform::Besu);
        assert!(matches!(
            "Fabric".parse::<Platform>(),
            Err(ProviderError::Validation(_))
        ));
    }
}
