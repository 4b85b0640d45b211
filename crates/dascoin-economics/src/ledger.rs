// crates/dascoin-economics/src/ledger.rs
//
// In-memory balance ledger.
//
// Tracks, per account, the free cycle balance and the dascoin balance, plus
// the chain-wide total of dascoin ever minted. Accounts are kept in a BTreeMap
// so iteration order is identical on every node.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use dascoin_core::error::DascoinError;
use dascoin_core::traits::BalanceLedger;
use dascoin_core::types::{AccountId, ShareType, MAX_DASCOIN_SUPPLY};

/// Balances held by a single account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountBalances {
    /// Free (unqueued) cycles.
    pub cycles: ShareType,
    /// Dascoin in base units.
    pub dascoin: ShareType,
}

/// The in-memory balance ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InMemoryLedger {
    accounts: BTreeMap<AccountId, AccountBalances>,
    total_dascoin_minted: ShareType,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Balances of every account that has ever held anything, in id order.
    pub fn accounts(&self) -> impl Iterator<Item = (&AccountId, &AccountBalances)> {
        self.accounts.iter()
    }
}

impl BalanceLedger for InMemoryLedger {
    fn cycle_balance(&self, account: AccountId) -> ShareType {
        self.accounts.get(&account).map(|b| b.cycles).unwrap_or(0)
    }

    fn dascoin_balance(&self, account: AccountId) -> ShareType {
        self.accounts.get(&account).map(|b| b.dascoin).unwrap_or(0)
    }

    fn total_dascoin_minted(&self) -> ShareType {
        self.total_dascoin_minted
    }

    fn credit_balance(
        &mut self,
        account: AccountId,
        amount: ShareType,
    ) -> Result<(), DascoinError> {
        if amount < 0 {
            return Err(DascoinError::InvalidAmount(format!(
                "cannot credit a negative dascoin amount: {}",
                amount
            )));
        }
        let minted = self
            .total_dascoin_minted
            .checked_add(amount)
            .filter(|total| *total <= MAX_DASCOIN_SUPPLY)
            .ok_or(DascoinError::ArithmeticOverflow("total dascoin minted"))?;
        let balances = self.accounts.entry(account).or_default();
        balances.dascoin = balances
            .dascoin
            .checked_add(amount)
            .ok_or(DascoinError::ArithmeticOverflow("dascoin balance"))?;
        self.total_dascoin_minted = minted;
        Ok(())
    }

    fn issue_cycles(&mut self, account: AccountId, amount: ShareType) -> Result<(), DascoinError> {
        if amount < 0 {
            return Err(DascoinError::InvalidAmount(format!(
                "cannot issue a negative cycle amount: {}",
                amount
            )));
        }
        let balances = self.accounts.entry(account).or_default();
        balances.cycles = balances
            .cycles
            .checked_add(amount)
            .ok_or(DascoinError::ArithmeticOverflow("cycle balance"))?;
        Ok(())
    }

    fn debit_cycle_balance(
        &mut self,
        account: AccountId,
        amount: ShareType,
    ) -> Result<(), DascoinError> {
        if amount < 0 {
            return Err(DascoinError::InvalidAmount(format!(
                "cannot debit a negative cycle amount: {}",
                amount
            )));
        }
        let available = self.cycle_balance(account);
        if amount > available {
            return Err(DascoinError::InsufficientBalance {
                account,
                requested: amount,
                available,
            });
        }
        if amount > 0 {
            self.accounts.entry(account).or_default().cycles = available - amount;
        }
        Ok(())
    }
}
