//! Node configuration for checkpoint enforcement.
//!
//! [`NodeConfig`] carries the network choice, the sync-checkpoint span, and
//! logging settings. [`NodeConfig::load`] layers built-in defaults, an
//! optional config file, and `TERN_*` environment variables, in that order.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tern_consensus::{CheckpointTable, Checkpoints};
use tern_core::constants::{NetworkType, CHECKPOINT_SPAN};

use crate::error::ConfigError;

/// Prefix for environment overrides, e.g. `TERN_NETWORK=testnet`.
pub const ENV_PREFIX: &str = "TERN";

/// Configuration for a node's checkpoint policy.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NodeConfig {
    /// Which compiled checkpoint list applies.
    pub network: NetworkType,
    /// Depth of the sync checkpoint below the best tip.
    pub checkpoint_span: u64,
    /// Log level filter string (e.g. "info", "debug", "tern_consensus=trace").
    pub log_level: String,
    /// Log output format ("text" or "json").
    pub log_format: String,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            network: NetworkType::Mainnet,
            checkpoint_span: CHECKPOINT_SPAN,
            log_level: "info".to_string(),
            log_format: "text".to_string(),
        }
    }
}

impl NodeConfig {
    /// Load configuration from defaults, then `path` (if given), then the
    /// environment.
    ///
    /// The file format is inferred from the extension (TOML, JSON, YAML...).
    ///
    /// # Errors
    ///
    /// - [`ConfigError::Load`] if the file is missing or malformed, or a
    ///   value has the wrong type
    /// - [`ConfigError::ZeroSpan`] if `checkpoint_span` is 0
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, None)
    }

    /// Same as [`NodeConfig::load`], but reads `TERN_*` overrides from `env`
    /// instead of the process environment when it is `Some`.
    pub fn load_with_env(
        path: Option<&Path>,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let mut builder = config::Config::builder()
            .set_default("network", defaults.network.as_str())?
            .set_default("checkpoint_span", defaults.checkpoint_span)?
            .set_default("log_level", defaults.log_level)?
            .set_default("log_format", defaults.log_format)?;

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }
        builder = builder.add_source(config::Environment::with_prefix(ENV_PREFIX).source(env));

        let cfg: Self = builder.build()?.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values no node should run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.checkpoint_span == 0 {
            return Err(ConfigError::ZeroSpan);
        }
        Ok(())
    }

    /// Checkpoint policy for the configured network and span.
    pub fn checkpoints(&self) -> Checkpoints {
        Checkpoints::new(CheckpointTable::for_network(self.network), self.checkpoint_span)
    }
}

/// Default config file location: `<config dir>/tern/tern.toml`.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tern")
        .join("tern.toml")
}
