//! Chainlaunch provider core
//!
//! Resource lifecycle abstractions shared by the Chainlaunch provider:
//! the error taxonomy, the composite identity codec, the remote client seam
//! and the local state store.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │               chainlaunch CLI                    │
//! │      (join / refresh / unjoin / import)          │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │               chainlaunch-core                   │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │  trait ManagedResource / DataSource       │   │
//! │  └──────────────────────────────────────────┘   │
//! │  ┌──────────────┐  ┌──────────────┐            │
//! │  │   Identity   │  │  State Mgmt  │            │
//! │  └──────────────┘  └──────────────┘            │
//! └───────┬─────────────────────────────────────────┘
//!         │ trait RemoteClient
//! ┌───────▼──────────────────────────┐
//! │       chainlaunch-provider        │
//! │  node join, lookups, HTTP client  │
//! └───────────────────────────────────┘
//! ```

pub mod client;
pub mod error;
pub mod identity;
pub mod lifecycle;
pub mod state;

// Re-exports
pub use client::{RemoteClient, decode_body};
#[cfg(any(test, feature = "mock"))]
pub use client::MockRemoteClient;
pub use error::{ProviderError, Result};
pub use identity::CompositeId;
pub use lifecycle::{DataSource, Diagnostic, Imported, ManagedResource, ReadOutcome, Severity};
pub use state::{GlobalState, StateLock, StateManager, StoredResource};
