// crates/dascoin-core/src/types.rs

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Signed ledger amount (cycles or dascoin base units).
///
/// Signed so that malformed negative inputs can be represented and rejected
/// at admission instead of wrapping.
pub type ShareType = i64;

/// Fixed-point conversion rate, scaled by [`FREQUENCY_PRECISION`].
/// A frequency of `200` means 2.00 cycles per whole DAS.
pub type Frequency = i64;

/// Ledger (block) time. Never wall-clock time.
pub type Timestamp = DateTime<Utc>;

/// Number of dascoin base units in one DAS.
pub const DASCOIN_PRECISION: ShareType = 10_000;

/// Scale factor of [`Frequency`] values.
pub const FREQUENCY_PRECISION: ShareType = 100;

/// Hard cap on dascoin supply, in base units (4.5 billion DAS).
pub const MAX_DASCOIN_SUPPLY: ShareType = 4_500_000_000 * DASCOIN_PRECISION;

/// Frequency a fresh chain starts with (2.00).
pub const DEFAULT_FREQUENCY: Frequency = 200;

/// Identifier of an account on the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(pub u64);

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "1.2.{}", self.0)
    }
}

/// Identifier of a license template in the license catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LicenseTypeId(pub u64);

impl fmt::Display for LicenseTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "1.15.{}", self.0)
    }
}

/// Stable identifier of a reward queue entry.
///
/// Assigned monotonically at admission and never reused, so queue snapshots
/// can be compared and restored by id rather than by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueueEntryId(pub u64);

impl fmt::Display for QueueEntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "1.16.{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display() {
        assert_eq!(AccountId(7).to_string(), "1.2.7");
        assert_eq!(LicenseTypeId(3).to_string(), "1.15.3");
        assert_eq!(QueueEntryId(0).to_string(), "1.16.0");
    }

    #[test]
    fn test_max_supply_exceeds_32_bits() {
        assert!(MAX_DASCOIN_SUPPLY > i32::MAX as i64);
    }

    #[test]
    fn test_ids_serialize_transparently() {
        let json = serde_json::to_string(&AccountId(42)).unwrap();
        assert_eq!(json, "42");
        let back: AccountId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, AccountId(42));
    }
}
