pub mod error;

pub use error::*;

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default API root of a local Chainlaunch instance
pub const DEFAULT_URL: &str = "http://localhost:8100/api/v1";

const ENV_CONFIG_PATH: &str = "CHAINLAUNCH_CONFIG_PATH";
const ENV_URL: &str = "CHAINLAUNCH_URL";
const ENV_USERNAME: &str = "CHAINLAUNCH_USERNAME";
const ENV_PASSWORD: &str = "CHAINLAUNCH_PASSWORD";

/// Get the Chainlaunch config directory (`~/.config/chainlaunch`)
pub fn get_config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or(ConfigError::ConfigDirNotFound)?
        .join("chainlaunch");

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)?;
    }

    Ok(config_dir)
}

/// Find the provider config file
///
/// Search order:
/// 1. `CHAINLAUNCH_CONFIG_PATH` (must exist when set)
/// 2. current directory: `chainlaunch.local.yaml`, `chainlaunch.yaml`
/// 3. `./.chainlaunch/config.yaml`
/// 4. `~/.config/chainlaunch/config.yaml`
///
/// Returns `Ok(None)` when no file exists; the config can then come from the
/// environment alone.
pub fn find_config_file() -> Result<Option<PathBuf>> {
    if let Ok(config_path) = std::env::var(ENV_CONFIG_PATH) {
        let path = PathBuf::from(&config_path);
        if path.exists() {
            return Ok(Some(path));
        }
        return Err(ConfigError::FileNotFound(config_path));
    }

    let current_dir = std::env::current_dir()?;
    for filename in ["chainlaunch.local.yaml", "chainlaunch.yaml"] {
        let path = current_dir.join(filename);
        if path.exists() {
            return Ok(Some(path));
        }
    }

    let local = current_dir.join(".chainlaunch").join("config.yaml");
    if local.exists() {
        return Ok(Some(local));
    }

    if let Some(config_dir) = dirs::config_dir() {
        let global_config = config_dir.join("chainlaunch").join("config.yaml");
        if global_config.exists() {
            return Ok(Some(global_config));
        }
    }

    Ok(None)
}

/// Config file contents; every field may be overridden by the environment
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Per-request timeout in seconds
    pub timeout_secs: Option<u64>,
}

impl FileConfig {
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(&content)?)
    }
}

/// Resolved connection settings for the control-plane API
#[derive(Clone)]
pub struct ProviderConfig {
    /// API root, without trailing slash
    pub url: String,
    pub username: String,
    pub password: String,
    pub timeout: Option<Duration>,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ProviderConfig {
    /// Discover the config file and apply environment overrides
    pub fn load() -> Result<Self> {
        let file = match find_config_file()? {
            Some(path) => {
                tracing::debug!("Loading config from {}", path.display());
                FileConfig::from_path(&path)?
            }
            None => {
                tracing::debug!("No config file found, using environment only");
                FileConfig::default()
            }
        };
        Self::resolve(file)
    }

    /// Merge file values with environment overrides and validate
    pub fn resolve(file: FileConfig) -> Result<Self> {
        let url = env_or(ENV_URL, file.url).unwrap_or_else(|| DEFAULT_URL.to_string());
        let username = env_or(ENV_USERNAME, file.username);
        let password = env_or(ENV_PASSWORD, file.password);

        let (Some(username), Some(password)) = (username, password) else {
            return Err(ConfigError::MissingCredentials);
        };

        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::Invalid(format!(
                "url must start with http:// or https://: {}",
                url
            )));
        }

        Ok(Self {
            url: url.trim_end_matches('/').to_string(),
            username,
            password,
            timeout: file.timeout_secs.map(Duration::from_secs),
        })
    }
}

/// Environment value if set and non-empty, else the file value
fn env_or(key: &str, file_value: Option<String>) -> Option<String> {
    std::env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .or(file_value)
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;

    const NO_ENV: [(&str, Option<&str>); 4] = [
        (ENV_CONFIG_PATH, None),
        (ENV_URL, None),
        (ENV_USERNAME, None),
        (ENV_PASSWORD, None),
    ];

    #[test]
    fn test_get_config_dir() {
        let config_dir = get_config_dir().unwrap();
        assert!(config_dir.ends_with("chainlaunch"));
        assert!(config_dir.exists());
    }

    #[test]
    #[serial]
    fn test_load_from_env_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("custom.yaml");
        fs::write(
            &path,
            "url: https://cl.example.com/api/v1/\nusername: admin\npassword: secret\ntimeout_secs: 30\n",
        )
        .unwrap();

        temp_env::with_vars(
            [
                (ENV_CONFIG_PATH, Some(path.to_str().unwrap())),
                (ENV_URL, None),
                (ENV_USERNAME, None),
                (ENV_PASSWORD, None),
            ],
            || {
                let config = ProviderConfig::load().unwrap();
                assert_eq!(config.url, "https://cl.example.com/api/v1");
                assert_eq!(config.username, "admin");
                assert_eq!(config.password, "secret");
                assert_eq!(config.timeout, Some(Duration::from_secs(30)));
            },
        );
    }

    #[test]
    #[serial]
    fn test_env_overrides_file() {
        let file = FileConfig {
            url: Some("https://file.example.com/api/v1".to_string()),
            username: Some("file-user".to_string()),
            password: Some("file-pass".to_string()),
            timeout_secs: None,
        };

        temp_env::with_vars(
            [
                (ENV_CONFIG_PATH, None),
                (ENV_URL, Some("http://env.example.com:8100/api/v1")),
                (ENV_USERNAME, Some("env-user")),
                (ENV_PASSWORD, None),
            ],
            || {
                let config = ProviderConfig::resolve(file).unwrap();
                assert_eq!(config.url, "http://env.example.com:8100/api/v1");
                assert_eq!(config.username, "env-user");
                assert_eq!(config.password, "file-pass");
            },
        );
    }

    #[test]
    #[serial]
    fn test_default_url() {
        temp_env::with_vars(
            [
                (ENV_CONFIG_PATH, None),
                (ENV_URL, None),
                (ENV_USERNAME, Some("admin")),
                (ENV_PASSWORD, Some("admin")),
            ],
            || {
                let config = ProviderConfig::resolve(FileConfig::default()).unwrap();
                assert_eq!(config.url, DEFAULT_URL);
                assert_eq!(config.timeout, None);
            },
        );
    }

    #[test]
    #[serial]
    fn test_missing_credentials() {
        temp_env::with_vars(NO_ENV, || {
            let file = FileConfig {
                username: Some("admin".to_string()),
                ..Default::default()
            };
            assert!(matches!(
                ProviderConfig::resolve(file),
                Err(ConfigError::MissingCredentials)
            ));
        });
    }

    #[test]
    #[serial]
    fn test_invalid_url() {
        temp_env::with_vars(NO_ENV, || {
            let file = FileConfig {
                url: Some("localhost:8100".to_string()),
                username: Some("admin".to_string()),
                password: Some("admin".to_string()),
                timeout_secs: None,
            };
            assert!(matches!(
                ProviderConfig::resolve(file),
                Err(ConfigError::Invalid(_))
            ));
        });
    }

    #[test]
    #[serial]
    fn test_env_path_missing() {
        temp_env::with_vars(
            [(ENV_CONFIG_PATH, Some("/nonexistent/chainlaunch.yaml"))],
            || {
                assert!(matches!(
                    find_config_file(),
                    Err(ConfigError::FileNotFound(_))
                ));
            },
        );
    }

    #[test]
    #[serial]
    fn test_find_config_file_local_priority() {
        let temp_dir = tempfile::tempdir().unwrap();
        let original_dir = std::env::current_dir().unwrap();

        fs::write(temp_dir.path().join("chainlaunch.yaml"), "url: http://a").unwrap();
        fs::write(temp_dir.path().join("chainlaunch.local.yaml"), "url: http://b").unwrap();

        std::env::set_current_dir(&temp_dir).unwrap();

        temp_env::with_var(ENV_CONFIG_PATH, None::<&str>, || {
            let result = find_config_file().unwrap().unwrap();
            assert!(result.ends_with("chainlaunch.local.yaml"));
        });

        std::env::set_current_dir(original_dir).unwrap();
    }

    #[test]
    #[serial]
    fn test_find_config_file_in_dot_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let original_dir = std::env::current_dir().unwrap();

        let dot_dir = temp_dir.path().join(".chainlaunch");
        fs::create_dir(&dot_dir).unwrap();
        fs::write(dot_dir.join("config.yaml"), "username: admin").unwrap();

        std::env::set_current_dir(&temp_dir).unwrap();

        temp_env::with_var(ENV_CONFIG_PATH, None::<&str>, || {
            let result = find_config_file().unwrap().unwrap();
            assert!(result.ends_with(".chainlaunch/config.yaml"));
        });

        std::env::set_current_dir(original_dir).unwrap();
    }

    #[test]
    fn test_file_config_rejects_unknown_fields() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("bad.yaml");
        fs::write(&path, "endpoint: http://x\n").unwrap();

        assert!(matches!(
            FileConfig::from_path(&path),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn test_empty_file_is_default() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("empty.yaml");
        fs::write(&path, "\n").unwrap();

        let file = FileConfig::from_path(&path).unwrap();
        assert!(file.url.is_none());
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = ProviderConfig {
            url: DEFAULT_URL.to_string(),
            username: "admin".to_string(),
            password: "hunter2".to_string(),
            timeout: None,
        };
        assert!(!format!("{:?}", config).contains("hunter2"));
    }
}
