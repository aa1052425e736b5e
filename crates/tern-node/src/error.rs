//! Errors surfaced by the node-side checkpoint plumbing.
use tern_core::types::Hash256;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config: {0}")] Load(#[from] config::ConfigError),
    #[error("checkpoint_span must be greater than zero")] ZeroSpan,
}

/// Policy refusals from [`ChainGuard`](crate::guard::ChainGuard).
///
/// Neither variant is a fault: the caller drops the block or abandons the
/// reorganization and carries on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GuardError {
    #[error("checkpoint mismatch at height {height}: expected {expected}, got {got}")]
    CheckpointMismatch { height: u64, expected: Hash256, got: Hash256 },
    #[error("reorg to height {fork_height} reaches sync checkpoint at {sync_height}")]
    ReorgTooDeep { fork_height: u64, sync_height: u64 },
}
