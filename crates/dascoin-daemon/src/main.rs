// crates/dascoin-daemon/src/main.rs
//
// Binary entrypoint for the DasCoin replay daemon.
//
// Parses CLI arguments, loads configuration and genesis, initializes
// tracing, builds the chain state, and runs the block producer until the
// requested number of blocks has been produced or Ctrl-C is received.

mod config;
mod genesis;
mod scheduler;

use std::time::Duration;

use clap::Parser;
use config::DaemonConfig;
use genesis::GenesisConfig;
use scheduler::BlockProducer;

use dascoin_economics::Dascoin;

/// DasCoin reward queue daemon: replays a genesis schedule block by block.
#[derive(Parser, Debug)]
#[command(name = "dascoin-daemon", version = "0.1.0", about = "DasCoin reward queue replay daemon")]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(long, default_value = "~/.dascoin/config.toml")]
    config: String,

    /// Path to the genesis TOML file. Overrides `genesis_path` in the config.
    #[arg(long)]
    genesis: Option<String>,

    /// Stop after this many blocks. Overrides `max_blocks` in the config.
    #[arg(long)]
    blocks: Option<u64>,

    /// Ledger seconds between blocks. Overrides `block_interval_seconds`.
    #[arg(long)]
    block_interval: Option<u32>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration before installing the subscriber so that its
    // log level applies; the outcome is logged right after.
    let config_path = expand_tilde(&args.config);
    let loaded = DaemonConfig::load(&config_path);
    let mut daemon_config = match &loaded {
        Ok(cfg) => cfg.clone(),
        Err(_) => DaemonConfig::default(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&daemon_config.log_level)),
        )
        .init();

    match loaded {
        Ok(_) => tracing::info!("Loaded configuration from {}", config_path),
        Err(e) => tracing::warn!(
            "Could not load config from {}: {}. Using defaults.",
            config_path,
            e
        ),
    }

    // CLI flags override the config file values.
    if let Some(genesis) = args.genesis {
        daemon_config.genesis_path = genesis;
    }
    if let Some(blocks) = args.blocks {
        daemon_config.max_blocks = Some(blocks);
    }
    if let Some(interval) = args.block_interval {
        if interval == 0 {
            return Err("--block-interval must be positive".into());
        }
        daemon_config.block_interval_seconds = interval;
    }

    tracing::info!("DasCoin Daemon v0.1.0");
    tracing::info!("Block interval: {}s", daemon_config.block_interval_seconds);
    tracing::info!("Block period: {}ms", daemon_config.block_period_millis);

    let genesis_path = expand_tilde(&daemon_config.genesis_path);
    let genesis = match GenesisConfig::load(&genesis_path) {
        Ok(genesis) => {
            tracing::info!("Loaded genesis from {}", genesis_path);
            genesis
        }
        Err(e) => {
            tracing::warn!(
                "Could not load genesis from {}: {}. Using an empty genesis.",
                genesis_path,
                e
            );
            GenesisConfig::default()
        }
    };

    let chain = genesis.build_chain_state()?;
    tracing::info!(
        "Reward queue {} (interval {}s, budget {})",
        if chain.params().enable_dascoin_queue {
            "enabled"
        } else {
            "disabled"
        },
        chain.params().reward_interval_time_seconds,
        Dascoin::from_units(chain.params().dascoin_reward_amount)
    );

    let mut producer = BlockProducer::new(
        chain,
        genesis.schedule(),
        daemon_config.block_interval_seconds,
        Duration::from_millis(daemon_config.block_period_millis),
        daemon_config.max_blocks,
    );
    producer.run().await?;

    tracing::info!("DasCoin daemon shut down gracefully");
    Ok(())
}

/// Expand `~` at the start of a path to the user's home directory.
fn expand_tilde(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return format!("{}/{}", home.display(), rest);
        }
    }
    path.to_string()
}
