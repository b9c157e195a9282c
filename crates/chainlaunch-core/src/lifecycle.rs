//! Resource lifecycle traits
//!
//! The host (CLI or any other orchestrator) drives one operation at a time
//! against a resource instance. Each call runs to completion and returns
//! either the new persisted state or an error.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A remote object whose lifecycle is reconciled against declared state
#[async_trait]
pub trait ManagedResource: Send + Sync {
    /// Declared configuration supplied by the caller
    type Desired: Send + Sync;

    /// Record persisted between invocations
    type State: Send + Sync;

    /// Resource type name (e.g., "chainlaunch_fabric_network_join")
    fn type_name(&self) -> &str;

    /// Create the remote object and return its first persisted state
    async fn create(&self, desired: &Self::Desired) -> Result<Self::State>;

    /// Refresh persisted state from the remote side
    async fn read(&self, state: &Self::State) -> Result<ReadOutcome<Self::State>>;

    /// Change the remote object in place
    async fn update(&self, state: &Self::State, desired: &Self::Desired) -> Result<Self::State>;

    /// Remove the remote object
    async fn delete(&self, state: &Self::State) -> Result<()>;

    /// Adopt an existing remote object from an external identity string
    async fn import(&self, id: &str) -> Result<Imported<Self::State>>;
}

/// Read-only lookup of a remote object
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Lookup arguments plus any previously known values
    type Model: Send + Sync;

    fn type_name(&self) -> &str;

    /// Resolve the object and merge what was discovered into `model`
    async fn read(&self, model: Self::Model) -> Result<Self::Model>;
}

/// Result of refreshing a resource
#[derive(Debug, Clone, PartialEq)]
pub enum ReadOutcome<S> {
    /// The remote object still exists; keep this state
    Present(S),
    /// The remote object is gone; the caller should drop its state
    Gone,
}

impl<S> ReadOutcome<S> {
    pub fn is_gone(&self) -> bool {
        matches!(self, ReadOutcome::Gone)
    }

    pub fn into_state(self) -> Option<S> {
        match self {
            ReadOutcome::Present(state) => Some(state),
            ReadOutcome::Gone => None,
        }
    }
}

/// Result of a successful import
#[derive(Debug, Clone)]
pub struct Imported<S> {
    pub state: S,
    pub diagnostics: Vec<Diagnostic>,
}

impl<S> Imported<S> {
    pub fn new(state: S) -> Self {
        Self {
            state,
            diagnostics: Vec::new(),
        }
    }

    pub fn with_warning(mut self, summary: impl Into<String>, detail: impl Into<String>) -> Self {
        self.diagnostics.push(Diagnostic::warning(summary, detail));
        self
    }

    pub fn has_warnings(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Warning)
    }
}

/// Non-fatal advisory returned alongside a successful result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub summary: String,
    pub detail: String,
}

impl Diagnostic {
    pub fn warning(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            summary: summary.into(),
            detail: detail.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}
