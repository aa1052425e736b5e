//! Arena-backed block index.
//!
//! [`BlockIndex`] stores every known block header as a [`BlockIndexEntry`]
//! in a `Vec`, addressed by [`BlockId`], with a hash map for lookups by
//! block hash. Parent links are ids into the same arena, so the tree can be
//! walked without pointers and entries never move once inserted.
//!
//! Heights are derived from the parent on insert. Because a parent must
//! already exist before its child is inserted, parent links cannot form a
//! cycle.

use std::collections::HashMap;

use crate::error::BlockIndexError;
use crate::traits::BlockTree;
use crate::types::{BlockId, BlockIndexEntry, Hash256};

/// In-memory block index: every header the node has seen, on any branch.
#[derive(Debug, Default, Clone)]
pub struct BlockIndex {
    /// Arena of entries; `BlockId(i)` refers to `entries[i]`.
    entries: Vec<BlockIndexEntry>,
    /// Block hash → arena id.
    by_hash: HashMap<Hash256, BlockId>,
}

impl BlockIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert the genesis block (height 0, no parent).
    ///
    /// # Errors
    ///
    /// - [`BlockIndexError::GenesisExists`] if the index is not empty
    pub fn insert_genesis(&mut self, hash: Hash256) -> Result<BlockId, BlockIndexError> {
        if !self.entries.is_empty() {
            return Err(BlockIndexError::GenesisExists(self.entries[0].hash));
        }
        Ok(self.push(BlockIndexEntry { hash, height: 0, prev: None }))
    }

    /// Insert a block whose parent is `prev_hash`.
    ///
    /// The new entry's height is the parent's height plus one.
    ///
    /// # Errors
    ///
    /// - [`BlockIndexError::DuplicateBlock`] if `hash` is already indexed
    /// - [`BlockIndexError::UnknownParent`] if `prev_hash` is not indexed
    pub fn insert(&mut self, hash: Hash256, prev_hash: &Hash256) -> Result<BlockId, BlockIndexError> {
        if self.by_hash.contains_key(&hash) {
            return Err(BlockIndexError::DuplicateBlock(hash));
        }
        let prev_id = *self
            .by_hash
            .get(prev_hash)
            .ok_or(BlockIndexError::UnknownParent(*prev_hash))?;
        let height = self.entries[prev_id.0].height + 1;
        Ok(self.push(BlockIndexEntry { hash, height, prev: Some(prev_id) }))
    }

    fn push(&mut self, entry: BlockIndexEntry) -> BlockId {
        let id = BlockId(self.entries.len());
        self.by_hash.insert(entry.hash, id);
        self.entries.push(entry);
        id
    }

    /// Entry for `id`, if issued by this index.
    pub fn get(&self, id: BlockId) -> Option<&BlockIndexEntry> {
        self.entries.get(id.0)
    }

    /// Number of indexed blocks across all branches.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no blocks.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl BlockTree for BlockIndex {
    fn entry(&self, id: BlockId) -> Option<&BlockIndexEntry> {
        self.get(id)
    }

    fn lookup(&self, hash: &Hash256) -> Option<BlockId> {
        self.by_hash.get(hash).copied()
    }
}
