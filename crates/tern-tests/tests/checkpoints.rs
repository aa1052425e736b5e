//! Property-based checkpoint tests.
//!
//! Drives the hardened-checkpoint validator, the resolver, the sync
//! checkpoint selector, and the reorg guard with randomized tables and
//! chains. Each property runs at least 64 cases with proptest shrinking.
//!
//! Attack vectors tested:
//! - Substituting a block at a checkpointed height
//! - Reorganizing at, or below, the sync checkpoint
//! - Pointing the resolver at an index that holds stale checkpoints only

use proptest::prelude::*;
use tern_consensus::{CheckpointTable, Checkpoints};
use tern_core::block_index::BlockIndex;
use tern_core::constants::{NetworkType, CHECKPOINT_SPAN, MAINNET_CHECKPOINTS};
use tern_core::traits::BlockTree;
use tern_core::types::Hash256;
use tern_node_lib::{ChainGuard, GuardError, NodeConfig};
use tern_tests::helpers::{block_hash, extend_branch, linear_chain};

fn dcc5() -> Hash256 {
    "0xdcc5d3973d6144d2da7c77b3c0e5f7160a4c00690e45b06f70766b421e3afc57"
        .parse()
        .unwrap()
}

// ---------------------------------------------------------------------------
// Hardened checkpoints against the compiled mainnet table
// ---------------------------------------------------------------------------

#[test]
fn mainnet_height_three_is_pinned() {
    let cps = Checkpoints::for_network(NetworkType::Mainnet);
    assert!(cps.check_hardened(3, &dcc5()));
    assert!(!cps.check_hardened(3, &Hash256::ZERO));
}

#[test]
fn mainnet_estimate_and_testnet_estimate() {
    assert_eq!(Checkpoints::for_network(NetworkType::Mainnet).total_blocks_estimate(), 6511);
    assert_eq!(Checkpoints::for_network(NetworkType::Testnet).total_blocks_estimate(), 0);
}

#[test]
fn every_mainnet_checkpoint_accepts_its_own_hash_only() {
    let cps = Checkpoints::for_network(NetworkType::Mainnet);
    for (height, hash) in MAINNET_CHECKPOINTS {
        assert!(cps.check_hardened(*height, hash), "height {height}");
        for (other_height, other) in MAINNET_CHECKPOINTS {
            if other_height != height {
                assert!(!cps.check_hardened(*height, other), "height {height} accepted {other}");
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn unconstrained_heights_accept_any_hash(height in any::<u64>(), bytes in any::<[u8; 32]>()) {
        let cps = Checkpoints::for_network(NetworkType::Mainnet);
        prop_assume!(!cps.table().contains_height(height));
        prop_assert!(cps.check_hardened(height, &Hash256(bytes)));
    }

    #[test]
    fn testnet_accepts_everything(height in any::<u64>(), bytes in any::<[u8; 32]>()) {
        let cps = Checkpoints::for_network(NetworkType::Testnet);
        prop_assert!(cps.check_hardened(height, &Hash256(bytes)));
    }

    #[test]
    fn checkpointed_heights_reject_substitutes(idx in 0usize..12, bytes in any::<[u8; 32]>()) {
        let (height, expected) = MAINNET_CHECKPOINTS[idx];
        let candidate = Hash256(bytes);
        prop_assume!(candidate != expected);
        let cps = Checkpoints::for_network(NetworkType::Mainnet);
        prop_assert!(!cps.check_hardened(height, &candidate));
    }

    #[test]
    fn estimate_is_table_maximum(heights in proptest::collection::btree_set(0u64..1_000_000, 0..32)) {
        let table = CheckpointTable::from_list(
            heights.iter().map(|h| (*h, block_hash(1, *h))),
        ).unwrap();
        let cps = Checkpoints::new(table, CHECKPOINT_SPAN);
        prop_assert_eq!(cps.total_blocks_estimate(), heights.iter().next_back().copied().unwrap_or(0));
    }
}

// ---------------------------------------------------------------------------
// Resolver: newest checkpoint present in the index
// ---------------------------------------------------------------------------

#[test]
fn resolver_on_chain_carrying_mainnet_checkpoints() {
    let cps = Checkpoints::for_network(NetworkType::Mainnet);

    // Chain long enough to include heights 0..=92 only.
    let (index, _) = linear_chain(100, MAINNET_CHECKPOINTS);
    let found = cps.last_checkpoint(&index).unwrap();
    assert_eq!(found.height, 92);

    // Full chain reaches 6511.
    let (index, _) = linear_chain(6600, MAINNET_CHECKPOINTS);
    let found = cps.last_checkpoint(&index).unwrap();
    assert_eq!(found.height, 6511);
}

#[test]
fn resolver_ignores_foreign_chain() {
    let cps = Checkpoints::for_network(NetworkType::Mainnet);
    let (index, _) = linear_chain(500, &[]);
    assert!(cps.last_checkpoint(&index).is_none());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn resolver_picks_highest_present(
        chain_len in 1u64..400,
        planted in proptest::collection::btree_set(0u64..400, 1..8),
    ) {
        // Checkpoints at every planted height; only those below chain_len
        // end up in the index.
        let plants: Vec<(u64, Hash256)> = planted.iter().map(|h| (*h, block_hash(7, *h))).collect();
        let table = CheckpointTable::from_list(plants.iter().copied()).unwrap();
        let cps = Checkpoints::new(table, 50);
        let (index, _) = linear_chain(chain_len, &plants);

        let expected = planted.iter().copied().filter(|h| *h < chain_len).max();
        let found = cps.last_checkpoint(&index).map(|e| e.height);
        prop_assert_eq!(found, expected);
    }
}

// ---------------------------------------------------------------------------
// Sync checkpoint and reorg guard
// ---------------------------------------------------------------------------

#[test]
fn sync_checkpoint_with_default_span() {
    let cps = Checkpoints::for_network(NetworkType::Mainnet);

    let (index, ids) = linear_chain(4000, &[]);
    let tip = index.entry(*ids.last().unwrap()).unwrap();
    assert_eq!(cps.auto_select_sync_checkpoint(&index, tip).height, 0);

    let (index, ids) = linear_chain(7001, &[]);
    let tip = index.entry(*ids.last().unwrap()).unwrap();
    assert_eq!(tip.height, 7000);
    assert_eq!(cps.auto_select_sync_checkpoint(&index, tip).height, 2000);
    assert!(!cps.check_sync(2000, &index, tip));
    assert!(cps.check_sync(2001, &index, tip));
}

#[test]
fn guard_refuses_side_branch_forking_below_floor() {
    let guard = ChainGuard::new(
        NetworkType::Testnet,
        Checkpoints::new(CheckpointTable::default(), 30),
    );
    let (mut index, ids) = linear_chain(101, &[]);
    let main_tip = index.entry(ids[100]).unwrap().clone();

    // Side branches off heights 80 and 40, both long enough to overtake.
    let at_80 = index.entry(ids[80]).unwrap().hash;
    let at_40 = index.entry(ids[40]).unwrap().hash;
    let shallow = extend_branch(&mut index, at_80, 3, 30);
    let deep = extend_branch(&mut index, at_40, 4, 70);
    assert_eq!(index.entry(*shallow.last().unwrap()).unwrap().height, 110);
    assert_eq!(index.entry(*deep.last().unwrap()).unwrap().height, 110);

    // Main tip at 100 with span 30 puts the floor at 70.
    assert_eq!(guard.allow_reorg(80, &index, &main_tip), Ok(()));
    assert_eq!(guard.allow_reorg(71, &index, &main_tip), Ok(()));
    assert_eq!(
        guard.allow_reorg(70, &index, &main_tip),
        Err(GuardError::ReorgTooDeep { fork_height: 70, sync_height: 70 })
    );
    assert_eq!(
        guard.allow_reorg(40, &index, &main_tip),
        Err(GuardError::ReorgTooDeep { fork_height: 40, sync_height: 70 })
    );
}

#[test]
fn guard_from_default_config_enforces_mainnet() {
    let guard = ChainGuard::from_config(&NodeConfig::default());
    let err = guard.accept_block(3, &Hash256::ZERO).unwrap_err();
    assert_eq!(
        err,
        GuardError::CheckpointMismatch { height: 3, expected: dcc5(), got: Hash256::ZERO }
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn sync_checkpoint_is_span_behind_tip(tip_height in 0u64..600, span in 1u64..300) {
        let (index, ids) = linear_chain(tip_height + 1, &[]);
        let tip = index.entry(ids[tip_height as usize]).unwrap();
        let cps = Checkpoints::new(CheckpointTable::default(), span);

        let sync = cps.auto_select_sync_checkpoint(&index, tip);
        prop_assert_eq!(sync.height, tip_height.saturating_sub(span));
        prop_assert!(sync.height <= tip.height);
        prop_assert_eq!(sync.hash, block_hash(0, sync.height));
    }

    #[test]
    fn reorg_floor_splits_heights(tip_height in 0u64..400, span in 1u64..200, height in 0u64..500) {
        let (index, ids) = linear_chain(tip_height + 1, &[]);
        let tip = index.entry(ids[tip_height as usize]).unwrap();
        let cps = Checkpoints::new(CheckpointTable::default(), span);

        let floor = cps.auto_select_sync_checkpoint(&index, tip).height;
        prop_assert_eq!(cps.check_sync(height, &index, tip), height > floor);
    }

    #[test]
    fn queries_are_idempotent(tip_height in 0u64..300, height in 0u64..300) {
        let (index, ids) = linear_chain(tip_height + 1, &[]);
        let tip = index.entry(ids[tip_height as usize]).unwrap();
        let cps = Checkpoints::new(CheckpointTable::default(), 25);

        let a = cps.auto_select_sync_checkpoint(&index, tip).clone();
        let b = cps.auto_select_sync_checkpoint(&index, tip).clone();
        prop_assert_eq!(a, b);
        prop_assert_eq!(cps.check_sync(height, &index, tip), cps.check_sync(height, &index, tip));
        prop_assert_eq!(
            cps.last_checkpoint(&index).map(|e| e.hash),
            cps.last_checkpoint(&index).map(|e| e.hash)
        );
    }
}

#[test]
fn empty_index_resolver_is_none() {
    let cps = Checkpoints::for_network(NetworkType::Mainnet);
    assert!(cps.last_checkpoint(&BlockIndex::new()).is_none());
}
