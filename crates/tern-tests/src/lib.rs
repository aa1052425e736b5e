//! Cross-crate checkpoint test suite for Tern.
//!
//! Integration tests that drive the checkpoint subsystem through the same
//! block index and guard types the node uses.

pub mod helpers;
