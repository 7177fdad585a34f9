use crate::checkpoints::gate::ValidationGate;
use crate::error::CheckpointError;
use crate::hash::BlockHash;
use crate::params::NetworkParams;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// An externally attested block identity at a given height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub height: u64,
    pub hash: BlockHash,
}

impl Checkpoint {
    pub fn new(height: u64, hash: BlockHash) -> Self {
        Self { height, hash }
    }
}

/// Result of a successful [`CheckpointStore::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    AlreadyPresent,
}

impl AddOutcome {
    pub fn is_new(&self) -> bool {
        matches!(self, AddOutcome::Added)
    }
}

/// The authoritative height -> hash mapping.
///
/// Entries are only ever inserted through [`add`](Self::add); once a height
/// is pinned its hash never changes and nothing is removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckpointStore {
    points: BTreeMap<u64, BlockHash>,
}

impl CheckpointStore {
    /// An empty store with no pins.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store seeded with the compiled-in defaults of `params`.
    pub fn with_params(params: &NetworkParams) -> Result<Self, CheckpointError> {
        let mut store = Self::new();
        store.init_default_checkpoints(params)?;
        Ok(store)
    }

    pub fn from_checkpoints<I>(checkpoints: I) -> Result<Self, CheckpointError>
    where
        I: IntoIterator<Item = Checkpoint>,
    {
        let mut store = Self::new();
        for cp in checkpoints {
            store.add(cp.height, cp.hash)?;
        }
        Ok(store)
    }

    /// Insert the network's default trust anchors. Networks without a
    /// default table succeed without touching the store.
    pub fn init_default_checkpoints(&mut self, params: &NetworkParams) -> Result<(), CheckpointError> {
        for (height, hash_hex) in params.checkpoints {
            self.add_hex(*height, hash_hex)?;
        }
        debug!(
            "Seeded {} default checkpoints for {}",
            params.checkpoints.len(),
            params.network
        );
        Ok(())
    }

    /// The single mutation entry point.
    ///
    /// A new height is inserted. A known height with the same hash is a
    /// no-op. A known height with a different hash is a conflict and the
    /// store is left untouched.
    pub fn add(&mut self, height: u64, hash: BlockHash) -> Result<AddOutcome, CheckpointError> {
        match self.points.get(&height) {
            Some(existing) if *existing == hash => Ok(AddOutcome::AlreadyPresent),
            Some(existing) => Err(CheckpointError::Conflict {
                height,
                existing: *existing,
                proposed: hash,
            }),
            None => {
                self.points.insert(height, hash);
                Ok(AddOutcome::Added)
            }
        }
    }

    pub fn add_hex(&mut self, height: u64, hash_hex: &str) -> Result<AddOutcome, CheckpointError> {
        let hash = BlockHash::from_hex(hash_hex)?;
        self.add(height, hash)
    }

    pub fn lookup(&self, height: u64) -> Option<BlockHash> {
        self.points.get(&height).copied()
    }

    /// Greatest pinned height, `None` when nothing is pinned.
    pub fn highest_height(&self) -> Option<u64> {
        self.points.last_key_value().map(|(h, _)| *h)
    }

    pub fn in_checkpoint_zone(&self, height: u64) -> bool {
        self.highest_height().is_some_and(|max| height <= max)
    }

    /// The checkpoint with the greatest height `<= height`.
    pub fn predecessor(&self, height: u64) -> Option<Checkpoint> {
        self.points
            .range(..=height)
            .next_back()
            .map(|(h, hash)| Checkpoint::new(*h, *hash))
    }

    /// Verify that every height pinned by both stores carries the same hash.
    /// Neither store is modified.
    pub fn check_conflicts(&self, other: &CheckpointStore) -> Result<(), CheckpointError> {
        for (height, proposed) in &other.points {
            if let Some(existing) = self.points.get(height) {
                if existing != proposed {
                    return Err(CheckpointError::Conflict {
                        height: *height,
                        existing: *existing,
                        proposed: *proposed,
                    });
                }
            }
        }
        Ok(())
    }

    /// Add every pin of `other`. Conflicts are checked up front, so either
    /// all entries merge or none do. Returns how many heights were new.
    pub fn merge(&mut self, other: &CheckpointStore) -> Result<usize, CheckpointError> {
        self.check_conflicts(other)?;
        let mut added = 0;
        for (height, hash) in &other.points {
            if self.add(*height, *hash)?.is_new() {
                added += 1;
            }
        }
        Ok(added)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Checkpoints in ascending height order.
    pub fn iter(&self) -> impl Iterator<Item = Checkpoint> + '_ {
        self.points.iter().map(|(h, hash)| Checkpoint::new(*h, *hash))
    }

    pub fn points(&self) -> &BTreeMap<u64, BlockHash> {
        &self.points
    }

    /// Policy view over this store.
    pub fn gate(&self) -> ValidationGate<'_> {
        ValidationGate::new(self)
    }
}
