//! tern-checkpoints — inspect the compiled checkpoint policy.
//!
//! Lists the active checkpoint table, checks a block against it, prints the
//! sync-progress estimate, and shows where the sync checkpoint would sit on
//! a chain of a given height.

use std::path::PathBuf;
use std::process;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tern_core::block_index::BlockIndex;
use tern_core::constants::NetworkType;
use tern_core::traits::BlockTree;
use tern_core::types::Hash256;
use tern_node_lib::{init_logging, ChainGuard, NodeConfig};
use tracing::{debug, info};

/// Tern checkpoint inspector.
#[derive(Parser, Debug)]
#[command(name = "tern-checkpoints", version, about = "Inspect Tern checkpoint policy")]
struct Cli {
    /// Config file (default: <config dir>/tern/tern.toml if it exists)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Use the test network's checkpoint table.
    #[arg(long, global = true)]
    testnet: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Log output format ("text" or "json")
    #[arg(long, global = true)]
    log_format: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every checkpoint in the active table.
    List {
        /// Emit JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Check a block hash against the checkpoint at its height.
    Check {
        height: u64,
        /// Block hash as 64 hex digits, optional 0x prefix.
        hash: String,
    },
    /// Print the total-blocks estimate used for sync progress.
    Estimate,
    /// Show the sync checkpoint for a linear chain with the given tip height.
    SyncPoint { tip_height: u64 },
}

#[derive(Serialize)]
struct CheckpointRow {
    height: u64,
    hash: String,
}

impl Cli {
    fn load_config(&self) -> Result<NodeConfig> {
        let path = match &self.config {
            Some(path) => Some(path.clone()),
            None => {
                let default = tern_node_lib::config::default_config_path();
                default.exists().then_some(default)
            }
        };
        let mut config = NodeConfig::load(path.as_deref())
            .with_context(|| format!("failed to load config {path:?}"))?;

        if self.testnet {
            config.network = NetworkType::Testnet;
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        if let Some(format) = &self.log_format {
            config.log_format = format.clone();
        }
        Ok(config)
    }
}

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {e:#}");
        process::exit(2);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.load_config()?;
    init_logging(&config.log_level, &config.log_format);
    info!(network = %config.network, span = config.checkpoint_span, "tern-checkpoints v{}", env!("CARGO_PKG_VERSION"));

    let guard = ChainGuard::from_config(&config);

    match cli.command {
        Command::List { json } => list(&guard, json)?,
        Command::Check { height, hash } => {
            let hash: Hash256 = hash.parse().context("invalid block hash")?;
            match guard.accept_block(height, &hash) {
                Ok(()) => println!("ok: height {height} hash {hash}"),
                Err(e) => {
                    println!("rejected: {e}");
                    process::exit(1);
                }
            }
        }
        Command::Estimate => println!("{}", guard.checkpoints().total_blocks_estimate()),
        Command::SyncPoint { tip_height } => sync_point(&guard, tip_height)?,
    }
    Ok(())
}

fn list(guard: &ChainGuard, json: bool) -> Result<()> {
    let rows: Vec<CheckpointRow> = guard
        .checkpoints()
        .table()
        .iter()
        .map(|(height, hash)| CheckpointRow { height, hash: hash.to_string() })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }
    if rows.is_empty() {
        println!("no checkpoints enforced on {}", guard.network());
        return Ok(());
    }
    for row in rows {
        println!("{:>8}  {}", row.height, row.hash);
    }
    Ok(())
}

/// Upper bound on the synthetic chain `sync-point` builds in memory.
const MAX_SYNTHETIC_BLOCKS: u64 = 10_000_000;

fn sync_point(guard: &ChainGuard, tip_height: u64) -> Result<()> {
    let sync_height = sync_point_height(guard, tip_height)?;
    println!("tip height:            {tip_height}");
    println!("sync checkpoint:       {sync_height}");
    println!("lowest reorg height:   {}", sync_height + 1);
    Ok(())
}

/// Run the selector on a linear chain ending at `tip_height`.
///
/// Only the top `min(tip_height, span)` blocks matter to the selector, so
/// the chain is built as that many blocks on a synthetic base and the
/// result is shifted back to absolute heights.
fn sync_point_height(guard: &ChainGuard, tip_height: u64) -> Result<u64> {
    let window = tip_height.min(guard.checkpoints().span());
    if window > MAX_SYNTHETIC_BLOCKS {
        bail!(
            "checkpoint span {} is too large to simulate (limit {MAX_SYNTHETIC_BLOCKS} blocks)",
            guard.checkpoints().span()
        );
    }
    let base = tip_height - window;

    let hash_at = |height: u64| {
        let mut bytes = [0u8; 32];
        bytes[..8].copy_from_slice(&height.to_be_bytes());
        Hash256(bytes)
    };

    let mut index = BlockIndex::new();
    index.insert_genesis(hash_at(0))?;
    for height in 1..=window {
        index.insert(hash_at(height), &hash_at(height - 1))?;
    }
    debug!(blocks = index.len(), base, "synthetic chain built");

    let tip = index
        .get_by_hash(&hash_at(window))
        .context("tip missing from synthetic chain")?;
    let sync = guard.checkpoints().auto_select_sync_checkpoint(&index, tip);
    Ok(base + sync.height)
}
