//! Caller-held critical section around a [`CheckpointStore`].
//!
//! The store itself has no locking. Nodes that validate blocks from more than
//! one thread share it through [`SharedCheckpoints`]. A load reads its
//! sources with no lock held, then merges all of them under one write guard;
//! each policy query takes a read guard, so a query never sees a
//! half-applied merge.

use crate::checkpoints::{AddOutcome, BlockCheck, CheckpointStore};
use crate::error::CheckpointError;
use crate::hash::BlockHash;
use crate::loader::CheckpointLoader;
use parking_lot::RwLock;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct SharedCheckpoints {
    inner: Arc<RwLock<CheckpointStore>>,
}

impl SharedCheckpoints {
    pub fn new(store: CheckpointStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    pub fn add(&self, height: u64, hash: BlockHash) -> Result<AddOutcome, CheckpointError> {
        self.inner.write().add(height, hash)
    }

    /// Fetches every requested source without the lock, then merges them
    /// under a single write guard.
    pub fn load_new_checkpoints(&self, loader: &CheckpointLoader, path: &Path, use_dns: bool) -> bool {
        let pending = loader.fetch(path, use_dns);
        let mut store = self.inner.write();
        loader.apply(&mut store, pending)
    }

    pub fn check_block(&self, height: u64, hash: &BlockHash) -> BlockCheck {
        self.inner.read().gate().check_block(height, hash)
    }

    pub fn alternative_block_allowed(&self, chain_height: u64, candidate_height: u64) -> bool {
        self.inner
            .read()
            .gate()
            .alternative_block_allowed(chain_height, candidate_height)
    }

    pub fn in_checkpoint_zone(&self, height: u64) -> bool {
        self.inner.read().in_checkpoint_zone(height)
    }

    pub fn highest_height(&self) -> Option<u64> {
        self.inner.read().highest_height()
    }

    /// Point-in-time copy of the pins.
    pub fn snapshot(&self) -> CheckpointStore {
        self.inner.read().clone()
    }
}
