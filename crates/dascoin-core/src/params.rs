// crates/dascoin-core/src/params.rs
//
// Chain parameters consumed by the reward queue.
//
// Parameters are an explicit, versioned snapshot: every transition reads the
// snapshot it is handed, and governance produces a new snapshot with a bumped
// version instead of mutating shared state.

use serde::{Deserialize, Serialize};

use crate::error::DascoinError;
use crate::types::{Frequency, ShareType, DASCOIN_PRECISION, DEFAULT_FREQUENCY, MAX_DASCOIN_SUPPLY};

/// Default seconds between two reward distributions.
pub const DEFAULT_REWARD_INTERVAL_SECONDS: u32 = 600;

/// Default per-interval dascoin budget: 2,000 DAS.
pub const DEFAULT_DASCOIN_REWARD_AMOUNT: ShareType = 2_000 * DASCOIN_PRECISION;

/// Snapshot of the chain parameters relevant to the reward queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainParameters {
    /// Monotonic version, bumped by every accepted update.
    #[serde(default)]
    pub version: u64,
    /// Whether the interval distributor runs at all.
    #[serde(default)]
    pub enable_dascoin_queue: bool,
    /// Seconds of ledger time between distributor ticks.
    #[serde(default = "default_reward_interval")]
    pub reward_interval_time_seconds: u32,
    /// Dascoin budget (base units) available to each tick.
    #[serde(default = "default_reward_amount")]
    pub dascoin_reward_amount: ShareType,
    /// Frequency applied to new user submissions.
    #[serde(default = "default_frequency")]
    pub frequency: Frequency,
}

fn default_reward_interval() -> u32 {
    DEFAULT_REWARD_INTERVAL_SECONDS
}

fn default_reward_amount() -> ShareType {
    DEFAULT_DASCOIN_REWARD_AMOUNT
}

fn default_frequency() -> Frequency {
    DEFAULT_FREQUENCY
}

impl Default for ChainParameters {
    fn default() -> Self {
        Self {
            version: 0,
            enable_dascoin_queue: false,
            reward_interval_time_seconds: default_reward_interval(),
            dascoin_reward_amount: default_reward_amount(),
            frequency: default_frequency(),
        }
    }
}

/// A governance update of the queue parameters. `None` fields are unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueParametersUpdate {
    #[serde(default)]
    pub enable_dascoin_queue: Option<bool>,
    #[serde(default)]
    pub reward_interval_time_seconds: Option<u32>,
    #[serde(default)]
    pub dascoin_reward_amount: Option<ShareType>,
}

impl ChainParameters {
    /// Reward interval as a chrono duration.
    pub fn reward_interval(&self) -> chrono::Duration {
        chrono::Duration::seconds(i64::from(self.reward_interval_time_seconds))
    }

    /// Validate the snapshot as a whole.
    ///
    /// # Errors
    /// Returns `DascoinError::InvalidParameter` for a zero interval, a
    /// non-positive or over-supply budget, or a non-positive frequency.
    pub fn validate(&self) -> Result<(), DascoinError> {
        if self.reward_interval_time_seconds == 0 {
            return Err(DascoinError::InvalidParameter(
                "reward_interval_time_seconds must be positive".to_string(),
            ));
        }
        if self.dascoin_reward_amount <= 0 {
            return Err(DascoinError::InvalidParameter(format!(
                "dascoin_reward_amount must be positive, got {}",
                self.dascoin_reward_amount
            )));
        }
        if self.dascoin_reward_amount > MAX_DASCOIN_SUPPLY {
            return Err(DascoinError::InvalidParameter(format!(
                "dascoin_reward_amount {} exceeds max supply {}",
                self.dascoin_reward_amount, MAX_DASCOIN_SUPPLY
            )));
        }
        if self.frequency <= 0 {
            return Err(DascoinError::InvalidParameter(format!(
                "frequency must be positive, got {}",
                self.frequency
            )));
        }
        Ok(())
    }

    /// Produce the next snapshot with a queue parameter update applied.
    ///
    /// The receiver is left untouched; the returned snapshot carries
    /// `version + 1`.
    pub fn with_queue_update(&self, update: &QueueParametersUpdate) -> Result<Self, DascoinError> {
        let mut next = self.clone();
        if let Some(enabled) = update.enable_dascoin_queue {
            next.enable_dascoin_queue = enabled;
        }
        if let Some(interval) = update.reward_interval_time_seconds {
            next.reward_interval_time_seconds = interval;
        }
        if let Some(amount) = update.dascoin_reward_amount {
            next.dascoin_reward_amount = amount;
        }
        next.validate()?;
        next.version = self.version + 1;
        Ok(next)
    }

    /// Produce the next snapshot with a new global frequency.
    pub fn with_frequency(&self, frequency: Frequency) -> Result<Self, DascoinError> {
        if frequency <= 0 {
            return Err(DascoinError::InvalidFrequency(format!(
                "global frequency must be positive, got {}",
                frequency
            )));
        }
        let mut next = self.clone();
        next.frequency = frequency;
        next.version = self.version + 1;
        Ok(next)
    }
}
