//! Fabric network membership resource
//!
//! Joins a peer or orderer node to a Fabric network. The resource has no
//! mutable attributes: any change to `network_id`, `node_id` or `role`
//! replaces it (unjoin, then join). Its persisted identity is the composite
//! `"<network_id>:<node_id>"`.
//!
//! A membership that no longer appears in the network's node list is treated
//! as deleted outside of the provider, not as an error.

use crate::lookup::ListFilter;
use crate::models::{Network, NetworkNodeList};
use async_trait::async_trait;
use chainlaunch_core::identity;
use chainlaunch_core::{
    Imported, ManagedResource, ProviderError, ReadOutcome, RemoteClient, Result, decode_body,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

pub const RESOURCE_TYPE: &str = "chainlaunch_fabric_network_join";

/// Which join/unjoin endpoint family a node uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Peer,
    Orderer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Peer => "peer",
            Role::Orderer => "orderer",
        }
    }

    fn collection(&self) -> &'static str {
        match self {
            Role::Peer => "peers",
            Role::Orderer => "orderers",
        }
    }

    /// Validate an optional declared role for `operation`
    fn require(operation: &str, role: Option<&str>) -> Result<Self> {
        match role {
            Some(value) => value.parse().map_err(|e: ProviderError| match e {
                ProviderError::Validation(msg) => {
                    ProviderError::Validation(format!("{}: {}", operation, msg))
                }
                other => other,
            }),
            None => Err(ProviderError::Validation(format!(
                "{}: role is not set; set it to \"peer\" or \"orderer\"",
                operation
            ))),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "peer" => Ok(Role::Peer),
            "orderer" => Ok(Role::Orderer),
            other => Err(ProviderError::Validation(format!(
                "role must be one of peer, orderer; got {:?}",
                other
            ))),
        }
    }
}

/// Declared membership
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeJoinSpec {
    pub network_id: u64,
    pub node_id: u64,
    pub role: String,
}

/// Persisted membership record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeJoinState {
    /// Composite `"<network_id>:<node_id>"`
    pub id: String,
    pub network_id: u64,
    pub node_id: u64,
    /// Unset after import until the caller declares it
    pub role: Option<String>,
}

fn membership_path(network_id: u64, role: Role, node_id: u64, action: &str) -> String {
    format!(
        "/networks/fabric/{}/{}/{}/{}",
        network_id,
        role.collection(),
        node_id,
        action
    )
}

fn nodes_path(network_id: u64) -> String {
    format!("/networks/fabric/{}/nodes", network_id)
}

/// Controller for [`RESOURCE_TYPE`]
pub struct FabricNetworkJoin {
    client: Arc<dyn RemoteClient>,
}

impl FabricNetworkJoin {
    pub fn new(client: Arc<dyn RemoteClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ManagedResource for FabricNetworkJoin {
    type Desired = NodeJoinSpec;
    type State = NodeJoinState;

    fn type_name(&self) -> &str {
        RESOURCE_TYPE
    }

    async fn create(&self, desired: &NodeJoinSpec) -> Result<NodeJoinState> {
        let role = Role::require("create network join", Some(desired.role.as_str()))?;
        let path = membership_path(desired.network_id, role, desired.node_id, "join");

        tracing::info!(
            "Joining {} {} to network {}",
            role,
            desired.node_id,
            desired.network_id
        );
        let body = self.client.post(&path, None).await?;
        let network: Network = decode_body(&path, &body)?;
        tracing::debug!("Join accepted by network {} ({})", network.id, network.name);

        Ok(NodeJoinState {
            id: identity::encode(desired.network_id, desired.node_id),
            network_id: desired.network_id,
            node_id: desired.node_id,
            role: Some(desired.role.clone()),
        })
    }

    async fn read(&self, state: &NodeJoinState) -> Result<ReadOutcome<NodeJoinState>> {
        let path = nodes_path(state.network_id);
        let nodes = ListFilter::new(self.client.as_ref(), path)
            .fetch::<NetworkNodeList>()
            .await?;

        if nodes.iter().any(|n| n.node_id == state.node_id) {
            return Ok(ReadOutcome::Present(state.clone()));
        }

        tracing::warn!(
            "Node {} is no longer a member of network {}; dropping {}",
            state.node_id,
            state.network_id,
            state.id
        );
        Ok(ReadOutcome::Gone)
    }

    async fn update(&self, state: &NodeJoinState, _desired: &NodeJoinSpec) -> Result<NodeJoinState> {
        Err(ProviderError::UnsupportedOperation(format!(
            "{} {} cannot be updated in place; change network_id, node_id or role to replace it",
            RESOURCE_TYPE, state.id
        )))
    }

    async fn delete(&self, state: &NodeJoinState) -> Result<()> {
        let role = Role::require("delete network join", state.role.as_deref())?;
        let path = membership_path(state.network_id, role, state.node_id, "unjoin");

        tracing::info!(
            "Removing {} {} from network {}",
            role,
            state.node_id,
            state.network_id
        );
        self.client.post(&path, None).await?;
        Ok(())
    }

    async fn import(&self, id: &str) -> Result<Imported<NodeJoinState>> {
        let (network_id, node_id) = identity::decode(id).map_err(|e| {
            ProviderError::InvalidImportId(format!(
                "{}: expected \"<network_id>:<node_id>\" ({})",
                id, e
            ))
        })?;

        let state = NodeJoinState {
            id: identity::encode(network_id, node_id),
            network_id,
            node_id,
            role: None,
        };

        tracing::warn!("Imported {} {} without a role", RESOURCE_TYPE, id);
        Ok(Imported::new(state).with_warning(
            "Role not set after import",
            format!(
                "The role of {} cannot be derived from its import ID. Set role to \"peer\" or \"orderer\" before the next operation that needs it.",
                id
            ),
        ))
    }
}
