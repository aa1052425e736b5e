//! Trait interfaces for the Tern protocol.
//!
//! - [`BlockTree`] — read-only view of the node's block index (the node
//!   owns the index; checkpoint logic borrows it per call)

use crate::types::{BlockId, BlockIndexEntry, Hash256};

/// Read-only view of the block tree.
///
/// Entries are addressed by [`BlockId`] and linked to their parents by id.
/// Implementors must hand out a consistent snapshot for the duration of a
/// borrow; the checkpoint code never caches anything across calls.
pub trait BlockTree {
    /// Entry for `id`, or `None` if the id is not known to this tree.
    fn entry(&self, id: BlockId) -> Option<&BlockIndexEntry>;

    /// Id of the block with `hash`, or `None` if it has not been indexed.
    fn lookup(&self, hash: &Hash256) -> Option<BlockId>;

    /// Entry for the block with `hash`.
    ///
    /// Default implementation chains [`lookup`](Self::lookup) and
    /// [`entry`](Self::entry).
    fn get_by_hash(&self, hash: &Hash256) -> Option<&BlockIndexEntry> {
        self.lookup(hash).and_then(|id| self.entry(id))
    }

    /// Parent entry of `entry`, or `None` at genesis.
    fn parent(&self, entry: &BlockIndexEntry) -> Option<&BlockIndexEntry> {
        entry.prev.and_then(|id| self.entry(id))
    }
}
