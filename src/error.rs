//! Error types for the checkpoint gate

use crate::hash::BlockHash;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckpointError {
    #[error("Checkpoint conflict at height {height}: pinned {existing}, proposed {proposed}")]
    Conflict {
        height: u64,
        existing: BlockHash,
        proposed: BlockHash,
    },
    #[error("Invalid block hash: {0}")]
    InvalidHash(String),
    #[error("Invalid block height: {0}")]
    InvalidHeight(String),
    #[error("Invalid checkpoint record: {0}")]
    InvalidRecord(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("JSON error: {0}")]
    Json(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Unknown network: {0}")]
    UnknownNetwork(String),
}

impl CheckpointError {
    /// True when two trust sources disagree about a pinned height.
    pub fn is_conflict(&self) -> bool {
        matches!(self, CheckpointError::Conflict { .. })
    }
}

impl From<std::io::Error> for CheckpointError {
    fn from(err: std::io::Error) -> Self {
        CheckpointError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CheckpointError {
    fn from(err: serde_json::Error) -> Self {
        CheckpointError::Json(err.to_string())
    }
}

impl From<toml::de::Error> for CheckpointError {
    fn from(err: toml::de::Error) -> Self {
        CheckpointError::Config(err.to_string())
    }
}

/// Convenience alias used across the crate
pub type Result<T> = std::result::Result<T, CheckpointError>;
