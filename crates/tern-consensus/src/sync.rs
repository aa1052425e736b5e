//! Depth-based sync checkpoint and reorg floor.
//!
//! The sync checkpoint is the best-chain ancestor [`Checkpoints::span`]
//! blocks behind the tip, or genesis on a shorter chain. It is recomputed
//! from the tip on every call, so it advances as the chain grows and never
//! needs invalidating. Reorganizations that would replace the block at or
//! below that height are refused.

use tern_core::traits::BlockTree;
use tern_core::types::BlockIndexEntry;
use tracing::debug;

use crate::checkpoint::Checkpoints;

impl Checkpoints {
    /// Walk back from `tip` to the sync checkpoint.
    ///
    /// Steps to the parent while the distance from the tip is below the
    /// span. Stops early at genesis, or at an entry whose parent id the
    /// tree cannot resolve.
    pub fn auto_select_sync_checkpoint<'a, T: BlockTree>(
        &self,
        tree: &'a T,
        tip: &'a BlockIndexEntry,
    ) -> &'a BlockIndexEntry {
        let mut current = tip;
        while tip.height.saturating_sub(current.height) < self.span() {
            match tree.parent(current) {
                Some(parent) => current = parent,
                None => break,
            }
        }
        current
    }

    /// Whether a reorganization reaching down to `height` is allowed.
    ///
    /// Returns `false` when `height` is at or below the sync checkpoint.
    /// A `false` is a policy refusal, not an error.
    pub fn check_sync<T: BlockTree>(&self, height: u64, tree: &T, tip: &BlockIndexEntry) -> bool {
        let sync = self.auto_select_sync_checkpoint(tree, tip);
        if height <= sync.height {
            debug!(height, sync_height = sync.height, tip_height = tip.height, "reorg below sync checkpoint refused");
            return false;
        }
        true
    }
}
