//! JSON hash file source.
//!
//! Document shape: `{ "hashlines": [ { "height": 123, "hash": "<hex>" } ] }`.

use crate::checkpoints::{Checkpoint, CheckpointStore};
use crate::error::CheckpointError;
use crate::hash::BlockHash;
use crate::loader::LoadReport;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashLine {
    pub height: u64,
    pub hash: BlockHash,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashFile {
    #[serde(default)]
    pub hashlines: Vec<HashLine>,
}

impl HashFile {
    /// Read a hash file. A missing file is `Ok(None)`; an unreadable or
    /// malformed one (including any bad hash) is an error.
    pub fn read(path: &Path) -> Result<Option<Self>, CheckpointError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(CheckpointError::Io(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                )))
            }
        };
        let file: HashFile = serde_json::from_str(&content).map_err(|e| {
            CheckpointError::Json(format!("Failed to parse {}: {}", path.display(), e))
        })?;
        Ok(Some(file))
    }

    pub fn write(&self, path: &Path) -> Result<(), CheckpointError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn from_store(store: &CheckpointStore) -> Self {
        Self {
            hashlines: store
                .iter()
                .map(|Checkpoint { height, hash }| HashLine { height, hash })
                .collect(),
        }
    }
}

/// Merge an already read hash file into `store`. `None` means the file was
/// not there, which loads nothing and is not an error.
///
/// Records at or below the store's highest height as it stood before the
/// merge are skipped, so a file cannot touch heights already covered by more
/// trusted sources. Everything above goes through [`CheckpointStore::add`];
/// a conflict there fails the load, and entries merged before it stay.
pub fn apply_hash_file(
    store: &mut CheckpointStore,
    path: &Path,
    file: Option<&HashFile>,
) -> Result<LoadReport, CheckpointError> {
    let Some(file) = file else {
        info!("Blockchain checkpoints file not found at {}", path.display());
        return Ok(LoadReport::default());
    };

    info!("Adding checkpoints from blockchain hashfile {}", path.display());
    let prev_max_height = store.highest_height();
    if let Some(max) = prev_max_height {
        info!("Hard-coded max checkpoint height is {}", max);
    }

    let mut report = LoadReport::default();
    for line in &file.hashlines {
        if prev_max_height.is_some_and(|max| line.height <= max) {
            debug!("ignoring checkpoint height {}", line.height);
            report.skipped += 1;
            continue;
        }
        debug!("Adding checkpoint height {}, hash={}", line.height, line.hash);
        report.record(store.add(line.height, line.hash)?);
    }
    Ok(report)
}

/// Read and merge a hash file in one step.
pub fn load_checkpoints_from_json(
    store: &mut CheckpointStore,
    path: &Path,
) -> Result<LoadReport, CheckpointError> {
    let file = HashFile::read(path)?;
    apply_hash_file(store, path, file.as_ref())
}
