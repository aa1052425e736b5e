//! # tern-core
//! Foundation types and traits for the Tern protocol.

pub mod block_index;
pub mod constants;
pub mod error;
pub mod traits;
pub mod types;
