// crates/dascoin-economics/src/access.rs
//
// Read-only queries over the reward queue, the balance ledger, and the
// license catalogue.
//
// Every query reflects the state at call time and never mutates anything.
// Batch variants return one result per input account in input order; an
// empty input yields an empty result.

use serde::{Deserialize, Serialize};

use dascoin_core::license::LicenseType;
use dascoin_core::traits::{BalanceLedger, LicenseCatalog};
use dascoin_core::types::{AccountId, Frequency, ShareType};

use crate::queue::{QueueEntry, RewardQueue};

/// A cycle balance together with the frequency it is locked to.
/// Free (unqueued) cycles carry a frequency lock of 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleAgreement {
    pub cycles: ShareType,
    pub frequency_lock: Frequency,
}

/// A queue entry together with its absolute position from the queue front.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionWithPosition {
    pub position: usize,
    pub submission: QueueEntry,
}

/// Borrowing view used by clients to query queue and balances.
pub struct AccessLayer<'a, L, C> {
    queue: &'a RewardQueue,
    ledger: &'a L,
    catalog: &'a C,
}

impl<'a, L: BalanceLedger, C: LicenseCatalog> AccessLayer<'a, L, C> {
    pub fn new(queue: &'a RewardQueue, ledger: &'a L, catalog: &'a C) -> Self {
        Self {
            queue,
            ledger,
            catalog,
        }
    }

    pub fn get_free_cycle_balance(&self, account: AccountId) -> ShareType {
        self.ledger.cycle_balance(account)
    }

    pub fn get_free_cycle_balances_for_accounts(&self, accounts: &[AccountId]) -> Vec<ShareType> {
        accounts
            .iter()
            .map(|a| self.get_free_cycle_balance(*a))
            .collect()
    }

    /// The free balance first, then every queued entry of the account in FIFO
    /// order with its real frequency lock.
    pub fn get_all_cycle_balances(&self, account: AccountId) -> Vec<CycleAgreement> {
        let free = CycleAgreement {
            cycles: self.ledger.cycle_balance(account),
            frequency_lock: 0,
        };
        std::iter::once(free)
            .chain(
                self.queue
                    .iter()
                    .filter(|e| e.account == account)
                    .map(|e| CycleAgreement {
                        cycles: e.amount,
                        frequency_lock: e.frequency_lock,
                    }),
            )
            .collect()
    }

    pub fn get_all_cycle_balances_for_accounts(
        &self,
        accounts: &[AccountId],
    ) -> Vec<Vec<CycleAgreement>> {
        accounts
            .iter()
            .map(|a| self.get_all_cycle_balances(*a))
            .collect()
    }

    pub fn get_dascoin_balance(&self, account: AccountId) -> ShareType {
        self.ledger.dascoin_balance(account)
    }

    pub fn get_dascoin_balances_for_accounts(&self, accounts: &[AccountId]) -> Vec<ShareType> {
        accounts
            .iter()
            .map(|a| self.get_dascoin_balance(*a))
            .collect()
    }

    pub fn get_queue_submissions_with_pos(
        &self,
        account: AccountId,
    ) -> Vec<SubmissionWithPosition> {
        self.queue
            .positions_for(account)
            .into_iter()
            .map(|(position, entry)| SubmissionWithPosition {
                position,
                submission: entry.clone(),
            })
            .collect()
    }

    pub fn get_queue_submissions_with_pos_for_accounts(
        &self,
        accounts: &[AccountId],
    ) -> Vec<Vec<SubmissionWithPosition>> {
        accounts
            .iter()
            .map(|a| self.get_queue_submissions_with_pos(*a))
            .collect()
    }

    pub fn get_reward_queue_size(&self) -> usize {
        self.queue.size()
    }

    pub fn get_license_type(&self, name: &str) -> Option<LicenseType> {
        self.catalog.lookup(name).cloned()
    }

    pub fn get_total_dascoin_minted(&self) -> ShareType {
        self.ledger.total_dascoin_minted()
    }
}
