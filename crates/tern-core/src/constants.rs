//! Protocol constants and the compiled-in checkpoint lists.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::types::Hash256;

/// Depth below the best tip after which history is treated as immutable.
///
/// The sync checkpoint sits this many blocks behind the tip (or at genesis
/// on shorter chains), and reorganizations may not reach it.
pub const CHECKPOINT_SPAN: u64 = 5000;

/// Network type: Mainnet or Testnet.
///
/// Selects which compiled checkpoint list is enforced.
///
/// # Examples
///
/// ```
/// use tern_core::constants::NetworkType;
/// let net = NetworkType::default();
/// assert_eq!(net, NetworkType::Mainnet);
/// assert_eq!(net.as_str(), "mainnet");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkType {
    /// Production network.
    #[default]
    Mainnet,
    /// Public test network. No checkpoints are enforced.
    Testnet,
}

impl NetworkType {
    /// Compiled checkpoint list for this network, ascending by height.
    ///
    /// # Examples
    ///
    /// ```
    /// use tern_core::constants::NetworkType;
    /// assert_eq!(NetworkType::Mainnet.checkpoints().len(), 12);
    /// assert!(NetworkType::Testnet.checkpoints().is_empty());
    /// ```
    pub fn checkpoints(&self) -> &'static [(u64, Hash256)] {
        match self {
            Self::Mainnet => MAINNET_CHECKPOINTS,
            Self::Testnet => TESTNET_CHECKPOINTS,
        }
    }

    /// Lowercase network name as used in config files and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
        }
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NetworkType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" | "main" => Ok(Self::Mainnet),
            "testnet" | "test" => Ok(Self::Testnet),
            other => Err(format!("unknown network: {other}")),
        }
    }
}

/// Hardened mainnet checkpoints as `(height, block hash)`, ascending.
///
/// A good checkpoint block is surrounded by blocks with sane timestamps and
/// contains no unusual transactions.
pub const MAINNET_CHECKPOINTS: &[(u64, Hash256)] = &[
    (0, Hash256::from_hex("0x00003f25e94400925d8d6d4237c28556f99e5580764e1ce1bc841dd4033b22f0")),
    (3, Hash256::from_hex("0xdcc5d3973d6144d2da7c77b3c0e5f7160a4c00690e45b06f70766b421e3afc57")),
    (7, Hash256::from_hex("0x491b37199781fc444c91fb19f1250a86e5306d3e1aa5ac98883f4f6bac5ca3c5")),
    (9, Hash256::from_hex("0x52a9681e8405d937c49dab154e1d4ef1e10afb1769bf59a0300a4a8e86b619d5")),
    (70, Hash256::from_hex("0x2589f4203f62726bb029a2a71e1ece5c26dd6426bfc1f2971faf3d66243db835")),
    (83, Hash256::from_hex("0x4cb30dc9d91108f2e7f0a00280d2f40799dcffe485fbfe2e2e3ece601f153879")),
    (92, Hash256::from_hex("0x8ba4492b248810a460eb0902c621bb129d31e892201e566f7749fc892b1dc8d4")),
    (348, Hash256::from_hex("0xf8f9fe5aa6cf4f0279536f57c7b41565b5db7803da962003986a7fa78d811637")),
    (1987, Hash256::from_hex("0x5397308a7b797b1b809a1e9d869e3c3291297dcfe92d55749cd4f4523d3fca54")),
    (3216, Hash256::from_hex("0xe77711dc00547b7ff9588b1ee4c96ceb7be9aaa0d0af7edb4169fc9e2c050ee0")),
    (5519, Hash256::from_hex("0xf666fb193b57faeb5b10eb1467941afdfc48a90dfbeb937139bdbabd9cd7fdcc")),
    (6511, Hash256::from_hex("0x2b448a6a5326db8854340ed7595a4ffc7866964b5803932c84ba7edfe6fbcf98")),
];

/// Testnet enforces no checkpoints.
pub const TESTNET_CHECKPOINTS: &[(u64, Hash256)] = &[];
