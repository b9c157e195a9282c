//! Control-plane API wire types

use crate::lookup::Listing;
use serde::{Deserialize, Serialize};

/// Network descriptor returned by network endpoints and by join calls
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Network {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Response of `GET /networks/{platform}`
#[derive(Debug, Clone, Deserialize)]
pub struct NetworkList {
    #[serde(default)]
    pub networks: Vec<Network>,
}

impl Listing for NetworkList {
    type Item = Network;

    fn into_items(self) -> Vec<Network> {
        self.networks
    }
}

/// Membership of a node in a Fabric network
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkNode {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub network_id: Option<u64>,
    pub node_id: u64,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Response of `GET /networks/fabric/{networkID}/nodes`
#[derive(Debug, Clone, Deserialize)]
pub struct NetworkNodeList {
    #[serde(default)]
    pub nodes: Vec<NetworkNode>,
}

impl Listing for NetworkNodeList {
    type Item = NetworkNode;

    fn into_items(self) -> Vec<NetworkNode> {
        self.nodes
    }
}

/// Key provider returned by `GET /key-providers/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyProvider {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub provider_type: Option<String>,
    #[serde(default)]
    pub is_default: Option<bool>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Overwrite `target` only when the remote value is present and non-empty
pub(crate) fn merge_string(target: &mut Option<String>, remote: &Option<String>) {
    if let Some(value) = remote {
        if !value.is_empty() {
            *target = Some(value.clone());
        }
    }
}
