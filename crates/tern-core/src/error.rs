//! Error types for the Tern protocol.
use thiserror::Error;

use crate::types::Hash256;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HashParseError {
    #[error("expected 64 hex digits, got {0}")] InvalidLength(usize),
    #[error("invalid hex: {0}")] InvalidHex(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckpointError {
    #[error("duplicate checkpoint height: {0}")] DuplicateHeight(u64),
    #[error("duplicate checkpoint hash: {0}")] DuplicateHash(Hash256),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BlockIndexError {
    #[error("duplicate block: {0}")] DuplicateBlock(Hash256),
    #[error("unknown parent: {0}")] UnknownParent(Hash256),
    #[error("genesis already indexed: {0}")] GenesisExists(Hash256),
}
