use crate::checkpoints::store::CheckpointStore;
use crate::hash::BlockHash;
use tracing::{info, warn};

/// Outcome of checking one block against the pins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockCheck {
    pub accepted: bool,
    pub is_checkpoint: bool,
}

/// Stateless acceptance policy over a borrowed [`CheckpointStore`].
#[derive(Debug, Clone, Copy)]
pub struct ValidationGate<'a> {
    store: &'a CheckpointStore,
}

impl<'a> ValidationGate<'a> {
    pub fn new(store: &'a CheckpointStore) -> Self {
        Self { store }
    }

    /// A block at an unpinned height is always accepted. At a pinned height
    /// it must carry exactly the pinned hash; a mismatch is never corrected.
    pub fn check_block(&self, height: u64, hash: &BlockHash) -> BlockCheck {
        let Some(pinned) = self.store.lookup(height) else {
            return BlockCheck {
                accepted: true,
                is_checkpoint: false,
            };
        };

        if pinned == *hash {
            info!("CHECKPOINT PASSED FOR HEIGHT {} {}", height, hash);
            BlockCheck {
                accepted: true,
                is_checkpoint: true,
            }
        } else {
            warn!(
                "CHECKPOINT FAILED FOR HEIGHT {}. EXPECTED HASH: {}, FETCHED HASH: {}",
                height, pinned, hash
            );
            BlockCheck {
                accepted: false,
                is_checkpoint: true,
            }
        }
    }

    /// Fork-depth limiter for a block on a competing branch.
    ///
    /// The branch may only diverge strictly above the nearest checkpoint at or
    /// below the current chain height. Height 0 is never a valid alternative,
    /// and a chain that has not reached its first checkpoint (or a store with
    /// no pins at all) places no limit.
    pub fn alternative_block_allowed(&self, chain_height: u64, candidate_height: u64) -> bool {
        if candidate_height == 0 {
            return false;
        }

        match self.store.predecessor(chain_height) {
            None => true,
            Some(checkpoint) => candidate_height > checkpoint.height,
        }
    }
}
