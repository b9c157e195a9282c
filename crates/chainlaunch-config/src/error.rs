use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config directory not found")]
    ConfigDirNotFound,

    #[error("Config file not found: {0}")]
    FileNotFound(String),

    #[error(
        "Missing credentials: set `username` and `password` in the config file \
        or the CHAINLAUNCH_USERNAME / CHAINLAUNCH_PASSWORD environment variables"
    )]
    MissingCredentials,

    #[error("Invalid config: {0}")]
    Invalid(String),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
