// crates/dascoin-economics/src/conversion.rs
//
// Fixed-point conversion between cycles and dascoin.
//
// A frequency is the number of cycles per whole DAS, scaled by
// FREQUENCY_PRECISION (200 = 2.00 cycles per DAS). Dascoin is expressed in
// base units (DASCOIN_PRECISION per DAS):
//
//   dascoin = floor(cycles * DASCOIN_PRECISION * FREQUENCY_PRECISION / frequency)
//   cycles  = floor(dascoin * frequency / (DASCOIN_PRECISION * FREQUENCY_PRECISION))
//
// Both directions truncate, so a round trip never returns more than it
// started with. Intermediates are i128: amounts near the max supply times the
// 10^6 scale do not fit in i64.

use dascoin_core::error::DascoinError;
use dascoin_core::types::{Frequency, ShareType, DASCOIN_PRECISION, FREQUENCY_PRECISION};

const SCALE: i128 = DASCOIN_PRECISION as i128 * FREQUENCY_PRECISION as i128;

fn check_inputs(amount: ShareType, frequency: Frequency, what: &str) -> Result<(), DascoinError> {
    if amount < 0 {
        return Err(DascoinError::InvalidAmount(format!(
            "{} amount must not be negative, got {}",
            what, amount
        )));
    }
    if frequency < 0 {
        return Err(DascoinError::InvalidFrequency(format!(
            "frequency must not be negative, got {}",
            frequency
        )));
    }
    Ok(())
}

/// Convert a cycle amount to dascoin base units at `frequency`.
///
/// A zero amount or a zero frequency yields 0.
///
/// # Errors
/// `InvalidAmount`/`InvalidFrequency` for negative inputs,
/// `ArithmeticOverflow` if the result does not fit in i64.
pub fn cycles_to_dascoin(
    cycles: ShareType,
    frequency: Frequency,
) -> Result<ShareType, DascoinError> {
    check_inputs(cycles, frequency, "cycle")?;
    if cycles == 0 || frequency == 0 {
        return Ok(0);
    }
    let value = i128::from(cycles) * SCALE / i128::from(frequency);
    ShareType::try_from(value).map_err(|_| DascoinError::ArithmeticOverflow("cycles_to_dascoin"))
}

/// Convert dascoin base units to a cycle amount at `frequency`.
///
/// A zero amount or a zero frequency yields 0.
pub fn dascoin_to_cycles(
    dascoin: ShareType,
    frequency: Frequency,
) -> Result<ShareType, DascoinError> {
    check_inputs(dascoin, frequency, "dascoin")?;
    if dascoin == 0 || frequency == 0 {
        return Ok(0);
    }
    let value = i128::from(dascoin) * i128::from(frequency) / SCALE;
    ShareType::try_from(value).map_err(|_| DascoinError::ArithmeticOverflow("dascoin_to_cycles"))
}
