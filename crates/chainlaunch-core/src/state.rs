//! Local state store for persisted resource records
//!
//! Manages the `.chainlaunch/state.json` file which holds the last reconciled
//! state of every resource the CLI manages, keyed by resource address.

use crate::error::{ProviderError, Result};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;

const STATE_VERSION: u32 = 1;
const STATE_DIR: &str = ".chainlaunch";
const STATE_FILE: &str = "state.json";
const STATE_BACKUP: &str = "state.json.backup";
const STATE_TMP: &str = "state.json.tmp";
const LOCK_FILE: &str = "lock.json";

/// All persisted records
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalState {
    /// State file version
    pub version: u32,

    /// Last modified timestamp
    pub updated_at: DateTime<Utc>,

    /// Records indexed by resource address (`<type>.<name>`)
    pub resources: BTreeMap<String, StoredResource>,
}

impl Default for GlobalState {
    fn default() -> Self {
        Self {
            version: STATE_VERSION,
            updated_at: Utc::now(),
            resources: BTreeMap::new(),
        }
    }
}

impl GlobalState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a record
    pub fn set_resource(&mut self, resource: StoredResource) {
        self.resources.insert(resource.address.clone(), resource);
        self.updated_at = Utc::now();
    }

    /// Remove a record
    pub fn remove_resource(&mut self, address: &str) -> Option<StoredResource> {
        let result = self.resources.remove(address);
        if result.is_some() {
            self.updated_at = Utc::now();
        }
        result
    }

    pub fn get_resource(&self, address: &str) -> Option<&StoredResource> {
        self.resources.get(address)
    }

    /// Records of a given resource type
    pub fn by_type(&self, resource_type: &str) -> Vec<&StoredResource> {
        self.resources
            .values()
            .filter(|r| r.resource_type == resource_type)
            .collect()
    }
}

/// Persisted record of a single resource
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredResource {
    /// Resource address (`<type>.<name>`)
    pub address: String,

    /// Resource type
    pub resource_type: String,

    /// Remote identity
    pub id: String,

    /// Serialized resource state
    pub attributes: serde_json::Value,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl StoredResource {
    /// Build a record from a typed state value
    pub fn from_state<S: Serialize>(
        resource_type: impl Into<String>,
        name: &str,
        id: impl Into<String>,
        state: &S,
    ) -> Result<Self> {
        let resource_type = resource_type.into();
        let now = Utc::now();
        Ok(Self {
            address: address(&resource_type, name),
            resource_type,
            id: id.into(),
            attributes: serde_json::to_value(state)?,
            created_at: now,
            updated_at: now,
        })
    }

    /// Decode the stored attributes into a typed state value
    pub fn state<S: DeserializeOwned>(&self) -> Result<S> {
        serde_json::from_value(self.attributes.clone()).map_err(|e| {
            ProviderError::State(format!("{}: cannot decode attributes: {}", self.address, e))
        })
    }

    /// Replace the stored attributes, keeping the creation time
    pub fn refresh<S: Serialize>(&mut self, state: &S) -> Result<()> {
        self.attributes = serde_json::to_value(state)?;
        self.updated_at = Utc::now();
        Ok(())
    }
}

/// Resource address for a type and instance name
pub fn address(resource_type: &str, name: &str) -> String {
    format!("{}.{}", resource_type, name)
}

/// Reads and writes the state file
pub struct StateManager {
    /// Project root directory
    project_root: PathBuf,
}

impl StateManager {
    pub fn new(project_root: impl AsRef<Path>) -> Self {
        Self {
            project_root: project_root.as_ref().to_path_buf(),
        }
    }

    fn state_dir(&self) -> PathBuf {
        self.project_root.join(STATE_DIR)
    }

    fn state_path(&self) -> PathBuf {
        self.state_dir().join(STATE_FILE)
    }

    fn backup_path(&self) -> PathBuf {
        self.state_dir().join(STATE_BACKUP)
    }

    fn tmp_path(&self) -> PathBuf {
        self.state_dir().join(STATE_TMP)
    }

    fn lock_path(&self) -> PathBuf {
        self.state_dir().join(LOCK_FILE)
    }

    async fn ensure_state_dir(&self) -> Result<()> {
        let dir = self.state_dir();
        if !dir.exists() {
            fs::create_dir_all(&dir).await?;
            tracing::debug!("Created state directory: {}", dir.display());
        }
        Ok(())
    }

    /// Load the current state
    pub async fn load(&self) -> Result<GlobalState> {
        let path = self.state_path();
        if !path.exists() {
            tracing::debug!("State file not found, returning empty state");
            return Ok(GlobalState::new());
        }

        let content = fs::read_to_string(&path).await?;
        let state: GlobalState = serde_json::from_str(&content)?;

        if state.version > STATE_VERSION {
            return Err(ProviderError::State(format!(
                "State file version {} is newer than supported version {}",
                state.version, STATE_VERSION
            )));
        }

        tracing::debug!("Loaded state with {} resources", state.resources.len());
        Ok(state)
    }

    /// Save the state, keeping the previous file as a backup
    ///
    /// The new content is written to a temporary file and renamed over
    /// `state.json`, so an interrupted save never leaves it truncated.
    pub async fn save(&self, state: &GlobalState) -> Result<()> {
        self.ensure_state_dir().await?;

        let path = self.state_path();
        let tmp = self.tmp_path();

        let content = serde_json::to_string_pretty(state)?;
        fs::write(&tmp, content).await?;

        if path.exists() {
            fs::copy(&path, self.backup_path()).await?;
            tracing::debug!("Created state backup");
        }

        fs::rename(&tmp, &path).await?;

        tracing::debug!("Saved state with {} resources", state.resources.len());
        Ok(())
    }

    /// Acquire a lock for exclusive access
    pub async fn acquire_lock(&self) -> Result<StateLock> {
        self.ensure_state_dir().await?;

        let lock_path = self.lock_path();

        if lock_path.exists() {
            let content = fs::read_to_string(&lock_path).await?;
            let lock_info: LockInfo = serde_json::from_str(&content)?;

            // Locks older than an hour are considered abandoned
            let age = Utc::now().signed_duration_since(lock_info.acquired_at);
            if age.num_hours() < 1 {
                return Err(ProviderError::Lock(format!(
                    "State is locked by {} since {}",
                    lock_info.holder, lock_info.acquired_at
                )));
            }

            tracing::warn!("Removing stale lock from {}", lock_info.holder);
        }

        let lock_info = LockInfo {
            holder: std::env::var("HOSTNAME")
                .or_else(|_| std::env::var("HOST"))
                .unwrap_or_else(|_| "unknown".to_string()),
            acquired_at: Utc::now(),
        };

        let content = serde_json::to_string_pretty(&lock_info)?;
        fs::write(&lock_path, content).await?;

        tracing::debug!("Acquired state lock");
        Ok(StateLock {
            lock_path,
            released: false,
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct LockInfo {
    holder: String,
    acquired_at: DateTime<Utc>,
}

/// RAII guard for the state lock
pub struct StateLock {
    lock_path: PathBuf,
    released: bool,
}

impl StateLock {
    /// Release the lock
    pub async fn release(mut self) -> Result<()> {
        if !self.released {
            if self.lock_path.exists() {
                fs::remove_file(&self.lock_path).await?;
                tracing::debug!("Released state lock");
            }
            self.released = true;
        }
        Ok(())
    }
}

impl Drop for StateLock {
    fn drop(&mut self) {
        if !self.released && self.lock_path.exists() {
            let _ = std::fs::remove_file(&self.lock_path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct JoinState {
        id: String,
        network_id: u64,
        node_id: u64,
    }

    fn join_state() -> JoinState {
        JoinState {
            id: "12:7".to_string(),
            network_id: 12,
            node_id: 7,
        }
    }

    #[tokio::test]
    async fn test_state_save_load() {
        let temp_dir = tempdir().unwrap();
        let manager = StateManager::new(temp_dir.path());

        let mut state = GlobalState::new();
        state.set_resource(
            StoredResource::from_state("chainlaunch_fabric_network_join", "peer0", "12:7", &join_state())
                .unwrap(),
        );

        manager.save(&state).await.unwrap();

        let loaded = manager.load().await.unwrap();
        assert_eq!(loaded.resources.len(), 1);
        let record = loaded
            .get_resource("chainlaunch_fabric_network_join.peer0")
            .unwrap();
        assert_eq!(record.id, "12:7");
        assert_eq!(record.state::<JoinState>().unwrap(), join_state());
    }

    #[tokio::test]
    async fn test_empty_state() {
        let temp_dir = tempdir().unwrap();
        let manager = StateManager::new(temp_dir.path());

        let state = manager.load().await.unwrap();
        assert!(state.resources.is_empty());
    }

    #[tokio::test]
    async fn test_save_keeps_backup() {
        let temp_dir = tempdir().unwrap();
        let manager = StateManager::new(temp_dir.path());

        manager.save(&GlobalState::new()).await.unwrap();
        manager.save(&GlobalState::new()).await.unwrap();

        assert!(temp_dir.path().join(STATE_DIR).join(STATE_BACKUP).exists());
    }

    #[tokio::test]
    async fn test_save_backup_holds_previous_state() {
        let temp_dir = tempdir().unwrap();
        let manager = StateManager::new(temp_dir.path());

        let mut first = GlobalState::new();
        first.set_resource(
            StoredResource::from_state("chainlaunch_fabric_network_join", "peer0", "12:7", &join_state())
                .unwrap(),
        );
        manager.save(&first).await.unwrap();
        manager.save(&GlobalState::new()).await.unwrap();

        let dir = temp_dir.path().join(STATE_DIR);
        let backup: GlobalState =
            serde_json::from_str(&std::fs::read_to_string(dir.join(STATE_BACKUP)).unwrap()).unwrap();
        assert!(backup.get_resource("chainlaunch_fabric_network_join.peer0").is_some());
        assert!(manager.load().await.unwrap().resources.is_empty());
        assert!(!dir.join(STATE_TMP).exists());
    }

    #[tokio::test]
    async fn test_newer_version_rejected() {
        let temp_dir = tempdir().unwrap();
        let manager = StateManager::new(temp_dir.path());

        let mut state = GlobalState::new();
        state.version = STATE_VERSION + 1;
        manager.save(&state).await.unwrap();

        assert!(matches!(manager.load().await, Err(ProviderError::State(_))));
    }

    #[tokio::test]
    async fn test_lock_is_exclusive() {
        let temp_dir = tempdir().unwrap();
        let manager = StateManager::new(temp_dir.path());

        let lock = manager.acquire_lock().await.unwrap();
        assert!(matches!(
            manager.acquire_lock().await,
            Err(ProviderError::Lock(_))
        ));

        lock.release().await.unwrap();
        let again = manager.acquire_lock().await.unwrap();
        again.release().await.unwrap();
    }

    #[test]
    fn test_remove_and_by_type() {
        let mut state = GlobalState::new();
        state.set_resource(
            StoredResource::from_state("chainlaunch_fabric_network_join", "a", "1:2", &json!({}))
                .unwrap(),
        );
        state.set_resource(
            StoredResource::from_state("chainlaunch_fabric_network_join", "b", "1:3", &json!({}))
                .unwrap(),
        );

        assert_eq!(state.by_type("chainlaunch_fabric_network_join").len(), 2);
        assert!(state.remove_resource("chainlaunch_fabric_network_join.a").is_some());
        assert!(state.remove_resource("chainlaunch_fabric_network_join.a").is_none());
        assert_eq!(state.resources.len(), 1);
    }

    #[test]
    fn test_undecodable_attributes() {
        let record =
            StoredResource::from_state("chainlaunch_fabric_network_join", "x", "1:2", &json!([1, 2]))
                .unwrap();
        assert!(matches!(
            record.state::<JoinState>(),
            Err(ProviderError::State(_))
        ));
    }
}
