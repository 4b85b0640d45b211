// crates/dascoin-economics/src/token.rs
//
// DAS (dascoin) token amount type.
//
// The smallest unit of DAS is a base unit; 1 DAS = 10^4 base units. All
// accounting is integer base units, there is no floating point anywhere on
// the consensus path.

use std::fmt;

use dascoin_core::types::{ShareType, DASCOIN_PRECISION};

/// A dascoin amount in base units, displayed as DAS.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Dascoin {
    pub units: ShareType,
}

impl Dascoin {
    pub fn from_units(units: ShareType) -> Self {
        Self { units }
    }
}

impl fmt::Display for Dascoin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.units < 0 { "-" } else { "" };
        let abs = self.units.unsigned_abs();
        let precision = DASCOIN_PRECISION as u64;
        let whole = abs / precision;
        let frac = abs % precision;
        if frac == 0 {
            write!(f, "{}{} DAS", sign, whole)
        } else {
            let frac_str = format!("{:04}", frac);
            let trimmed = frac_str.trim_end_matches('0');
            write!(f, "{}{}.{} DAS", sign, whole, trimmed)
        }
    }
}
