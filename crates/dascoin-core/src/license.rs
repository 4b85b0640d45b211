// crates/dascoin-core/src/license.rs

use serde::{Deserialize, Serialize};

use crate::error::DascoinError;
use crate::types::{Frequency, LicenseTypeId, ShareType};

/// Whether a license template is a regular or a chartered license.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LicenseKind {
    Regular,
    Chartered,
}

/// A license template from the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseType {
    pub id: LicenseTypeId,
    /// Unique catalogue name, e.g. `"standard-charter"`.
    pub name: String,
    pub kind: LicenseKind,
    /// Base cycle amount granted on issuance, before bonus.
    pub amount: ShareType,
    /// Default bonus percentage, used when issuance does not override it.
    #[serde(default)]
    pub bonus_percentage: ShareType,
    /// Default frequency lock, used when issuance does not override it.
    pub frequency_lock: Frequency,
}

impl LicenseType {
    /// Cycle amount queued when this license is issued with the given bonus:
    /// `amount + amount * bonus_percentage / 100`, truncated.
    ///
    /// # Errors
    /// Returns `DascoinError::InvalidAmount` for a negative bonus and
    /// `DascoinError::ArithmeticOverflow` if the result leaves the i64 range.
    pub fn queue_amount(&self, bonus_percentage: ShareType) -> Result<ShareType, DascoinError> {
        if bonus_percentage < 0 {
            return Err(DascoinError::InvalidAmount(format!(
                "bonus percentage must not be negative, got {}",
                bonus_percentage
            )));
        }
        let base = i128::from(self.amount);
        let total = base + base * i128::from(bonus_percentage) / 100;
        ShareType::try_from(total)
            .map_err(|_| DascoinError::ArithmeticOverflow("license queue amount"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard_charter() -> LicenseType {
        LicenseType {
            id: LicenseTypeId(1),
            name: "standard-charter".to_string(),
            kind: LicenseKind::Chartered,
            amount: 1100,
            bonus_percentage: 0,
            frequency_lock: 200,
        }
    }

    #[test]
    fn test_queue_amount_bonus() {
        let lic = standard_charter();
        assert_eq!(lic.queue_amount(0).unwrap(), 1100);
        assert_eq!(lic.queue_amount(10).unwrap(), 1210);
        assert_eq!(lic.queue_amount(100).unwrap(), 2200);
        assert_eq!(lic.queue_amount(300).unwrap(), 4400);
        assert_eq!(lic.queue_amount(500).unwrap(), 6600);
    }

    #[test]
    fn test_queue_amount_truncates() {
        let mut lic = standard_charter();
        lic.amount = 15;
        // 15 * 10 / 100 = 1.5 -> 1
        assert_eq!(lic.queue_amount(10).unwrap(), 16);
    }

    #[test]
    fn test_negative_bonus_rejected() {
        assert!(matches!(
            standard_charter().queue_amount(-1),
            Err(DascoinError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_overflow_detected() {
        let mut lic = standard_charter();
        lic.amount = i64::MAX;
        assert!(matches!(
            lic.queue_amount(100),
            Err(DascoinError::ArithmeticOverflow(_))
        ));
    }
}
