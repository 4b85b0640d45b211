// crates/dascoin-daemon/src/config.rs
//
// Runtime configuration for the DasCoin replay daemon.
// Loaded from a TOML file or populated with sensible defaults.

use serde::Deserialize;
use std::fs;

/// Runtime configuration for the daemon.
#[derive(Debug, Clone, Deserialize)]
pub struct DaemonConfig {
    /// Log level: "trace", "debug", "info", "warn", "error".
    /// `RUST_LOG` takes precedence when set.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Path of the genesis TOML file.
    #[serde(default = "default_genesis_path")]
    pub genesis_path: String,

    /// Ledger seconds between two consecutive blocks.
    #[serde(default = "default_block_interval_seconds")]
    pub block_interval_seconds: u32,

    /// Wall-clock milliseconds the daemon waits before producing each block.
    /// 0 replays as fast as possible.
    #[serde(default = "default_block_period_millis")]
    pub block_period_millis: u64,

    /// Stop after this many blocks. When unset the daemon runs until Ctrl-C.
    #[serde(default)]
    pub max_blocks: Option<u64>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_genesis_path() -> String {
    "~/.dascoin/genesis.toml".to_string()
}

fn default_block_interval_seconds() -> u32 {
    5
}

fn default_block_period_millis() -> u64 {
    1_000
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            genesis_path: default_genesis_path(),
            block_interval_seconds: default_block_interval_seconds(),
            block_period_millis: default_block_period_millis(),
            max_blocks: None,
        }
    }
}

impl DaemonConfig {
    /// Load configuration from a TOML file at the given path.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config: DaemonConfig = toml::from_str(contents)?;
        if config.block_interval_seconds == 0 {
            return Err("block_interval_seconds must be positive".into());
        }
        Ok(config)
    }
}
