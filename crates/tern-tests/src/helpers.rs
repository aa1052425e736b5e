//! Shared chain builders for integration tests.

use tern_core::block_index::BlockIndex;
use tern_core::types::{BlockId, Hash256};

/// Deterministic hash for block `seed` on branch `branch`.
pub fn block_hash(branch: u8, seed: u64) -> Hash256 {
    let mut bytes = [0u8; 32];
    bytes[0] = 0xC0 | (branch & 0x0F);
    bytes[1..9].copy_from_slice(&seed.to_le_bytes());
    Hash256(bytes)
}

/// Linear chain of `len` blocks (heights `0..len`) on branch 0.
///
/// `overrides` replaces the hash at specific heights, e.g. to plant
/// checkpoint hashes.
pub fn linear_chain(len: u64, overrides: &[(u64, Hash256)]) -> (BlockIndex, Vec<BlockId>) {
    assert!(len > 0, "chain needs a genesis block");
    let hash_at = |height: u64| {
        overrides
            .iter()
            .find(|(h, _)| *h == height)
            .map(|(_, hash)| *hash)
            .unwrap_or_else(|| block_hash(0, height))
    };

    let mut index = BlockIndex::new();
    let mut ids = Vec::with_capacity(len as usize);
    ids.push(index.insert_genesis(hash_at(0)).unwrap());
    for height in 1..len {
        ids.push(index.insert(hash_at(height), &hash_at(height - 1)).unwrap());
    }
    (index, ids)
}

/// Grow a side branch of `len` blocks off the block with `parent` hash.
///
/// Returns the ids of the new blocks, lowest first.
pub fn extend_branch(index: &mut BlockIndex, parent: Hash256, branch: u8, len: u64) -> Vec<BlockId> {
    let mut prev = parent;
    (0..len)
        .map(|i| {
            let hash = block_hash(branch, i);
            let id = index.insert(hash, &prev).unwrap();
            prev = hash;
            id
        })
        .collect()
}
