//! # tern-consensus — Checkpoint anchoring.
//!
//! Two layers of protection against deep reorganizations:
//!
//! - [`checkpoint`] — the compiled table of hardened `(height, hash)`
//!   checkpoints, the validator that enforces it, the sync-progress
//!   estimate, and the resolver for the newest checkpoint already indexed.
//! - [`sync`] — the depth-based sync checkpoint recomputed from the best
//!   tip, and the reorg floor it implies.
//!
//! Every query is a read-only function of a [`Checkpoints`] value, the
//! node's block index, and the best tip passed in by the caller.

pub mod checkpoint;
pub mod sync;

pub use checkpoint::{CheckpointTable, Checkpoints};
