//! Node-side checkpoint enforcement.
//!
//! [`ChainGuard`] is what the block-acceptance and reorg paths hold on to.
//! It wraps the [`Checkpoints`] chosen at startup and turns its boolean
//! answers into typed [`GuardError`] refusals carrying the numbers a log
//! line or peer-ban decision needs.

use tern_consensus::Checkpoints;
use tern_core::constants::NetworkType;
use tern_core::traits::BlockTree;
use tern_core::types::{BlockIndexEntry, Hash256};
use tracing::{info, warn};

use crate::config::NodeConfig;
use crate::error::GuardError;

/// Checkpoint policy for a running node.
#[derive(Clone, Debug)]
pub struct ChainGuard {
    network: NetworkType,
    checkpoints: Checkpoints,
}

impl ChainGuard {
    pub fn new(network: NetworkType, checkpoints: Checkpoints) -> Self {
        Self { network, checkpoints }
    }

    /// Build the guard described by `config` and log what was chosen.
    pub fn from_config(config: &NodeConfig) -> Self {
        let checkpoints = config.checkpoints();
        info!(
            network = %config.network,
            checkpoints = checkpoints.table().len(),
            last_checkpoint = checkpoints.total_blocks_estimate(),
            span = checkpoints.span(),
            "checkpoint policy loaded"
        );
        Self::new(config.network, checkpoints)
    }

    pub fn network(&self) -> NetworkType {
        self.network
    }

    pub fn checkpoints(&self) -> &Checkpoints {
        &self.checkpoints
    }

    /// Check a block against the hardened checkpoints before connecting it.
    ///
    /// # Errors
    ///
    /// - [`GuardError::CheckpointMismatch`] if a checkpoint at `height`
    ///   names a different hash
    pub fn accept_block(&self, height: u64, hash: &Hash256) -> Result<(), GuardError> {
        if self.checkpoints.check_hardened(height, hash) {
            return Ok(());
        }
        let expected = self
            .checkpoints
            .table()
            .get(height)
            .copied()
            .unwrap_or_default();
        Err(GuardError::CheckpointMismatch { height, expected, got: *hash })
    }

    /// Check whether switching to a branch that forks at `fork_height` is
    /// allowed given the current best tip.
    ///
    /// # Errors
    ///
    /// - [`GuardError::ReorgTooDeep`] if `fork_height` is at or below the
    ///   sync checkpoint
    pub fn allow_reorg<T: BlockTree>(
        &self,
        fork_height: u64,
        tree: &T,
        tip: &BlockIndexEntry,
    ) -> Result<(), GuardError> {
        let sync_height = self.checkpoints.auto_select_sync_checkpoint(tree, tip).height;
        if fork_height > sync_height {
            return Ok(());
        }
        warn!(fork_height, sync_height, tip = %tip.hash, "refusing deep reorg");
        Err(GuardError::ReorgTooDeep { fork_height, sync_height })
    }

    /// Newest checkpoint block present in `tree`.
    pub fn last_checkpoint<'a, T: BlockTree>(&self, tree: &'a T) -> Option<&'a BlockIndexEntry> {
        self.checkpoints.last_checkpoint(tree)
    }

    /// Fraction of the checkpointed chain reached by `tip`, in `[0, 1]`.
    ///
    /// Based on [`Checkpoints::total_blocks_estimate`], so it only tracks
    /// progress up to the last checkpoint. With no checkpoints it is 1.0.
    pub fn sync_progress(&self, tip: &BlockIndexEntry) -> f64 {
        let estimate = self.checkpoints.total_blocks_estimate();
        if estimate == 0 {
            return 1.0;
        }
        (tip.height as f64 / estimate as f64).min(1.0)
    }
}
