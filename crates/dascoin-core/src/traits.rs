// crates/dascoin-core/src/traits.rs

use crate::error::DascoinError;
use crate::license::LicenseType;
use crate::types::{AccountId, ShareType};

/// Account balances held by the general ledger.
///
/// Implemented by dascoin-economics (`InMemoryLedger`). The reward queue only
/// ever credits dascoin and debits free cycles through this seam.
pub trait BalanceLedger {
    /// Free (unqueued) cycle balance of an account. Unknown accounts hold 0.
    fn cycle_balance(&self, account: AccountId) -> ShareType;

    /// Spendable dascoin balance of an account, in base units.
    fn dascoin_balance(&self, account: AccountId) -> ShareType;

    /// Total dascoin ever minted on this ledger, in base units.
    fn total_dascoin_minted(&self) -> ShareType;

    /// Mint `amount` dascoin into an account.
    ///
    /// Never fails for a non-negative amount that keeps the totals in range.
    fn credit_balance(&mut self, account: AccountId, amount: ShareType) -> Result<(), DascoinError>;

    /// Add `amount` free cycles to an account.
    fn issue_cycles(&mut self, account: AccountId, amount: ShareType) -> Result<(), DascoinError>;

    /// Remove `amount` cycles from an account's free balance.
    ///
    /// # Errors
    /// Returns `DascoinError::InsufficientBalance` and leaves the balance
    /// untouched if the account holds fewer than `amount` cycles.
    fn debit_cycle_balance(
        &mut self,
        account: AccountId,
        amount: ShareType,
    ) -> Result<(), DascoinError>;
}

/// Read-only license template catalogue.
pub trait LicenseCatalog {
    /// Look up a template by its unique name (e.g. `"standard-charter"`).
    fn lookup(&self, name: &str) -> Option<&LicenseType>;
}
