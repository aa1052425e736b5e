//! Hardened checkpoint verification.
//!
//! A checkpoint pins a block height to the only acceptable block hash at
//! that height. The lists are compiled into the binary (see
//! [`tern_core::constants::MAINNET_CHECKPOINTS`]); the node picks one at
//! startup through [`Checkpoints::for_network`] and threads the resulting
//! value into every call. Nothing here reads global state.
//!
//! # Attack vectors
//!
//! - **Long-range rewrite:** Without checkpoints an attacker with enough
//!   hash power could rewrite arbitrarily deep history. Checkpoints pin
//!   known-good blocks so conflicting branches are refused outright.
//!
//! - **Checkpoint spoofing:** The list ships with the binary. An attacker
//!   would need to distribute a modified binary, which is outside our
//!   threat model.
//!
//! # Usage
//!
//! The block-acceptance path calls [`Checkpoints::check_hardened`] before
//! connecting a block whose height is known. Sync-progress reporting uses
//! [`Checkpoints::total_blocks_estimate`], and header download uses
//! [`Checkpoints::last_checkpoint`] to find the newest checkpoint block it
//! already has. The depth-based reorg floor lives in [`crate::sync`].

use std::collections::BTreeMap;
use std::collections::HashSet;

use tern_core::constants::{NetworkType, CHECKPOINT_SPAN};
use tern_core::error::CheckpointError;
use tern_core::traits::BlockTree;
use tern_core::types::{BlockIndexEntry, Hash256};
use tracing::warn;

/// Height-ordered map of hardened checkpoints.
///
/// Heights and hashes are both unique. Read-only once built.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CheckpointTable(BTreeMap<u64, Hash256>);

impl CheckpointTable {
    /// The compiled checkpoint list for `network`.
    pub fn for_network(network: NetworkType) -> Self {
        // Compiled lists have unique heights and hashes (tern-core tests).
        Self(network.checkpoints().iter().copied().collect())
    }

    /// Build a table from `(height, hash)` pairs in any order.
    ///
    /// # Errors
    ///
    /// - [`CheckpointError::DuplicateHeight`] if two entries share a height
    /// - [`CheckpointError::DuplicateHash`] if two entries share a hash
    pub fn from_list(
        list: impl IntoIterator<Item = (u64, Hash256)>,
    ) -> Result<Self, CheckpointError> {
        let mut map = BTreeMap::new();
        let mut seen_hashes = HashSet::new();
        for (height, hash) in list {
            if map.insert(height, hash).is_some() {
                return Err(CheckpointError::DuplicateHeight(height));
            }
            if !seen_hashes.insert(hash) {
                return Err(CheckpointError::DuplicateHash(hash));
            }
        }
        Ok(Self(map))
    }

    /// Checkpointed hash at `height`, if any.
    pub fn get(&self, height: u64) -> Option<&Hash256> {
        self.0.get(&height)
    }

    /// Whether a checkpoint exists at `height`.
    pub fn contains_height(&self, height: u64) -> bool {
        self.0.contains_key(&height)
    }

    /// Highest checkpointed height, or `None` for an empty table.
    pub fn max_height(&self) -> Option<u64> {
        self.0.keys().next_back().copied()
    }

    /// Checkpoints in ascending height order. Use `.rev()` for descending.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (u64, &Hash256)> + '_ {
        self.0.iter().map(|(h, hash)| (*h, hash))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The checkpoint policy in force for one node: a table plus the sync span.
///
/// Cheap to share; every query is `&self` and allocation-free.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Checkpoints {
    table: CheckpointTable,
    span: u64,
}

impl Checkpoints {
    /// Compiled table for `network` with the default [`CHECKPOINT_SPAN`].
    pub fn for_network(network: NetworkType) -> Self {
        Self::new(CheckpointTable::for_network(network), CHECKPOINT_SPAN)
    }

    /// Explicit table and span. Used by tests and by configs that shorten
    /// the span.
    pub fn new(table: CheckpointTable, span: u64) -> Self {
        Self { table, span }
    }

    /// The active checkpoint table.
    pub fn table(&self) -> &CheckpointTable {
        &self.table
    }

    /// Reorg-immunity depth used by the sync checkpoint.
    pub fn span(&self) -> u64 {
        self.span
    }

    /// Whether a block with `hash` at `height` agrees with the table.
    ///
    /// Heights without a checkpoint always pass; a checkpointed height
    /// passes only for the exact checkpointed hash.
    pub fn check_hardened(&self, height: u64, hash: &Hash256) -> bool {
        match self.table.get(height) {
            None => true,
            Some(expected) if expected == hash => true,
            Some(expected) => {
                warn!(height, %expected, got = %hash, "block conflicts with hardened checkpoint");
                false
            }
        }
    }

    /// Rough total block count for sync-progress display: the highest
    /// checkpointed height, or 0 when no checkpoints are enforced.
    pub fn total_blocks_estimate(&self) -> u64 {
        self.table.max_height().unwrap_or(0)
    }

    /// Newest checkpoint whose block is present in `index`.
    ///
    /// Scans from the highest checkpoint down and stops at the first hash
    /// the index knows. Returns `None` if the index holds none of them.
    pub fn last_checkpoint<'a, T: BlockTree>(&self, index: &'a T) -> Option<&'a BlockIndexEntry> {
        self.table
            .iter()
            .rev()
            .find_map(|(_, hash)| index.get_by_hash(hash))
    }
}
