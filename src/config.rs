//! Configuration management for the checkpoint gate

use crate::error::CheckpointError;
use crate::network::NetworkType;
use crate::params::NetworkParams;
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub checkpoints: CheckpointsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
pub struct NetworkConfig {
    #[serde(default = "default_network_id")]
    pub network_id: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            network_id: default_network_id(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CheckpointsConfig {
    #[serde(default = "default_checkpoint_file")]
    pub file: PathBuf,
    #[serde(default)]
    pub use_dns: bool,
    /// Replaces the network's compiled-in DNS domain list when set.
    #[serde(default)]
    pub dns_domains: Option<Vec<String>>,
}

impl Default for CheckpointsConfig {
    fn default() -> Self {
        Self {
            file: default_checkpoint_file(),
            use_dns: false,
            dns_domains: None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    pub fn parse(config_str: &str) -> Result<Self, CheckpointError> {
        let config: Config = toml::from_str(config_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Unknown network ids are rejected here rather than deeper in the gate.
    pub fn network_type(&self) -> Result<NetworkType, CheckpointError> {
        self.network.network_id.parse()
    }

    /// DNS domains in effect: the configured override or the network default.
    pub fn dns_domains(&self) -> Result<Vec<String>, CheckpointError> {
        match &self.checkpoints.dns_domains {
            Some(domains) => Ok(domains.clone()),
            None => Ok(NetworkParams::for_network(self.network_type()?).dns_domains()),
        }
    }

    fn validate(&self) -> Result<(), CheckpointError> {
        self.network_type()?;
        if self.checkpoints.file.as_os_str().is_empty() {
            return Err(CheckpointError::Config(
                "checkpoints.file must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Load configuration from `path`, falling back to defaults when the file
/// does not exist.
pub fn load_config(path: &Path) -> Result<Config, CheckpointError> {
    match fs::read_to_string(path) {
        Ok(config_str) => Config::parse(&config_str),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(Config::default()),
        Err(e) => Err(CheckpointError::Io(format!(
            "Failed to read {}: {}",
            path.display(),
            e
        ))),
    }
}

fn default_network_id() -> String {
    "mainnet".to_string()
}

fn default_checkpoint_file() -> PathBuf {
    PathBuf::from("./checkpoints.json")
}

fn default_log_level() -> String {
    "info".to_string()
}
