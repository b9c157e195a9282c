//! Chainlaunch provider resources
//!
//! Implements the Chainlaunch control-plane resources on top of
//! `chainlaunch-core`:
//!
//! - `chainlaunch_fabric_network_join`: joins a peer or orderer to a Fabric
//!   network (create, read, delete, import; never updated in place)
//! - `chainlaunch_network`: looks up a Fabric or Besu network by name
//! - `chainlaunch_network_by_id`: fetches a network by ID
//! - `chainlaunch_key_provider`: fetches a key provider by ID
//!
//! # Example
//!
//! ```ignore
//! use chainlaunch_config::ProviderConfig;
//! use chainlaunch_core::ManagedResource;
//! use chainlaunch_provider::{NodeJoinSpec, Provider};
//!
//! let provider = Provider::from_config(&ProviderConfig::load()?)?;
//!
//! let state = provider
//!     .fabric_network_join()
//!     .create(&NodeJoinSpec { network_id: 12, node_id: 7, role: "peer".into() })
//!     .await?;
//! assert_eq!(state.id, "12:7");
//! ```

pub mod http;
pub mod key_provider;
pub mod lookup;
pub mod models;
pub mod network;
pub mod node_join;
pub mod provider;

pub use http::HttpClient;
pub use key_provider::{KeyProviderById, KeyProviderData};
pub use lookup::{ListFilter, Listing};
pub use network::{NetworkById, NetworkByName, NetworkData, Platform};
pub use node_join::{FabricNetworkJoin, NodeJoinSpec, NodeJoinState, Role};
pub use provider::Provider;
