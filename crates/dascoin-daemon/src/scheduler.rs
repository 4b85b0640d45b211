// crates/dascoin-daemon/src/scheduler.rs
//
// Block producer for the DasCoin replay daemon.
//
// Produces simulated blocks at a fixed ledger-time interval. Each block
// applies the operations scheduled at its height, then lets the chain run
// every reward distribution that became due.

use std::collections::BTreeMap;
use std::time::Duration;

use dascoin_core::{DascoinError, Timestamp};
use dascoin_economics::{BlockReport, ChainState, Dascoin, Operation};

/// Drives a `ChainState` forward one block at a time.
pub struct BlockProducer {
    chain: ChainState,
    /// Operations still to apply, keyed by block height.
    schedule: BTreeMap<u64, Vec<Operation>>,
    genesis_time: Timestamp,
    /// Ledger time between blocks.
    block_interval: chrono::Duration,
    /// Wall-clock pause before each block.
    block_period: Duration,
    max_blocks: Option<u64>,
    /// Height of the last produced block (0 before the first).
    current_block: u64,
}

impl BlockProducer {
    pub fn new(
        chain: ChainState,
        schedule: BTreeMap<u64, Vec<Operation>>,
        block_interval_seconds: u32,
        block_period: Duration,
        max_blocks: Option<u64>,
    ) -> Self {
        Self {
            genesis_time: chain.current_ledger_time(),
            chain,
            schedule,
            block_interval: chrono::Duration::seconds(i64::from(block_interval_seconds)),
            block_period,
            max_blocks,
            current_block: 0,
        }
    }

    pub fn chain(&self) -> &ChainState {
        &self.chain
    }

    pub fn current_block(&self) -> u64 {
        self.current_block
    }

    fn finished(&self) -> bool {
        self.max_blocks
            .is_some_and(|max| self.current_block >= max)
    }

    /// Run the producer loop until `max_blocks` is reached or Ctrl-C.
    pub async fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        tracing::info!(
            "Block producer started (block_interval={}s, max_blocks={:?})",
            self.block_interval.num_seconds(),
            self.max_blocks
        );

        while !self.finished() {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Block producer received shutdown signal");
                    break;
                }
                _ = tokio::time::sleep(self.block_period) => {
                    self.produce_block()?;
                }
            }
        }

        tracing::info!(
            blocks = self.current_block,
            queue_size = self.chain.access().get_reward_queue_size(),
            minted = %Dascoin::from_units(self.chain.access().get_total_dascoin_minted()),
            "Block producer stopped"
        );
        for (account, balances) in self.chain.ledger().accounts() {
            tracing::debug!(
                %account,
                cycles = balances.cycles,
                dascoin = %Dascoin::from_units(balances.dascoin),
                "final balance"
            );
        }
        Ok(())
    }

    /// Produce the next block.
    ///
    /// Rejected operations are logged and skipped; only a distribution error
    /// stops the producer. A failed block leaves the chain and the schedule
    /// untouched.
    pub fn produce_block(&mut self) -> Result<BlockReport, DascoinError> {
        let height = self.current_block + 1;
        let block_offset = i32::try_from(height)
            .ok()
            .and_then(|h| self.block_interval.checked_mul(h))
            .ok_or(DascoinError::ArithmeticOverflow("block time"))?;
        let time = self.genesis_time + block_offset;
        // Scheduled operations stay scheduled until their block commits.
        let ops = self.schedule.get(&height).cloned().unwrap_or_default();

        let report = self.chain.push_block(time, ops)?;
        self.schedule.remove(&height);
        self.current_block = height;

        for outcome in &report.outcomes {
            match outcome {
                Ok(applied) => tracing::debug!(block = height, ?applied, "operation applied"),
                Err(e) => tracing::warn!(
                    block = height,
                    kind = e.kind(),
                    error = %e,
                    "operation rejected"
                ),
            }
        }

        for summary in &report.distributions {
            tracing::info!(
                block = height,
                paid = %Dascoin::from_units(summary.total_paid),
                queue_size = summary.queue_size,
                "=== REWARD DISTRIBUTION === (block {})",
                height
            );
            match serde_json::to_string(summary) {
                Ok(json) => tracing::debug!(block = height, summary = %json, "distribution detail"),
                Err(e) => tracing::warn!("Could not encode distribution summary: {}", e),
            }
        }

        if report.distributions.is_empty() {
            tracing::trace!(
                "Block {} at {} (queue size {})",
                height,
                time,
                self.chain.access().get_reward_queue_size()
            );
        }

        Ok(report)
    }
}
