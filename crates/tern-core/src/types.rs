//! Core value types shared by every Tern crate.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::HashParseError;

/// A 32-byte block hash.
///
/// Bytes are kept in the same order as their hex rendering, so
/// `Hash256::from_str(s)?.to_string() == s` for any lowercase 64-digit `s`.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Hash256(pub [u8; 32]);

impl Hash256 {
    /// The zero hash (32 zero bytes).
    pub const ZERO: Self = Self([0u8; 32]);

    /// Check if this is the zero hash.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// Decode a 64-digit hex string at compile time.
    ///
    /// Accepts an optional `0x` prefix. Panics on malformed input, which in a
    /// `const` context turns a bad literal into a build error. Runtime parsing
    /// should go through [`FromStr`] instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use tern_core::types::Hash256;
    /// const H: Hash256 = Hash256::from_hex(
    ///     "0x00000000000000000000000000000000000000000000000000000000000000ff",
    /// );
    /// assert_eq!(H.0[31], 0xff);
    /// ```
    pub const fn from_hex(s: &str) -> Self {
        let bytes = s.as_bytes();
        let start = if bytes.len() >= 2 && bytes[0] == b'0' && (bytes[1] == b'x' || bytes[1] == b'X') {
            2
        } else {
            0
        };
        assert!(bytes.len() - start == 64, "hash literal must have 64 hex digits");

        let mut out = [0u8; 32];
        let mut i = 0;
        while i < 32 {
            let hi = hex_digit(bytes[start + 2 * i]);
            let lo = hex_digit(bytes[start + 2 * i + 1]);
            out[i] = (hi << 4) | lo;
            i += 1;
        }
        Self(out)
    }
}

const fn hex_digit(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => c - b'0',
        b'a'..=b'f' => c - b'a' + 10,
        b'A'..=b'F' => c - b'A' + 10,
        _ => panic!("invalid hex digit in hash literal"),
    }
}

impl FromStr for Hash256 {
    type Err = HashParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        if digits.len() != 64 {
            return Err(HashParseError::InvalidLength(digits.len()));
        }
        let mut out = [0u8; 32];
        hex::decode_to_slice(digits, &mut out)
            .map_err(|e| HashParseError::InvalidHex(e.to_string()))?;
        Ok(Self(out))
    }
}

impl fmt::Display for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// Stable handle to an entry in a block index arena.
///
/// Ids are only meaningful for the index that issued them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(pub usize);

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One node of the block tree: a block hash, its height, and its parent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockIndexEntry {
    /// Block header hash.
    pub hash: Hash256,
    /// Distance from genesis (genesis is 0).
    pub height: u64,
    /// Parent entry, `None` for genesis.
    pub prev: Option<BlockId>,
}
