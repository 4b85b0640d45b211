// crates/dascoin-economics/src/distribution.rs
//
// Budgeted interval distribution of the reward queue.
//
// Each tick starts from a fresh budget (unused budget is discarded, never
// carried over) and walks the queue strictly from the front:
//   1. An entry whose full dascoin value fits in the remaining budget is paid
//      in full and removed.
//   2. An entry that does not fit is paid whatever budget is left, its
//      remaining cycles are reduced by the cycle equivalent of that payment,
//      and it stays at the front. The tick ends there; nothing behind it is
//      paid this interval, even if it would have fit.
//   3. An entry worth zero dascoin is dropped without payment.
//
// The budget is capped at the supply still left to mint, so a tick near the
// supply cap pays what it can and never fails on the cap itself.
//
// Conversions always use each entry's own frequency lock.

use serde::{Deserialize, Serialize};

use dascoin_core::error::DascoinError;
use dascoin_core::traits::BalanceLedger;
use dascoin_core::types::{AccountId, QueueEntryId, ShareType, MAX_DASCOIN_SUPPLY};

use crate::conversion::{cycles_to_dascoin, dascoin_to_cycles};
use crate::queue::RewardQueue;
use crate::token::Dascoin;

/// A single credit made during a tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payout {
    pub entry: QueueEntryId,
    pub account: AccountId,
    /// Dascoin credited, in base units.
    pub dascoin: ShareType,
    /// Cycles of the entry consumed by this payment.
    pub cycles: ShareType,
    /// Whether the entry was fully paid and removed.
    pub completed: bool,
}

/// The result of one distributor tick.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionSummary {
    /// Credits in the order they were made.
    pub payouts: Vec<Payout>,
    /// Total dascoin credited, in base units.
    pub total_paid: ShareType,
    /// Budget left over and discarded, including any part of the budget
    /// above the remaining supply.
    pub unused_budget: ShareType,
    /// Queue length after the tick.
    pub queue_size: usize,
}

impl DistributionSummary {
    /// Total dascoin credited to one account in this tick.
    pub fn paid_to(&self, account: AccountId) -> ShareType {
        self.payouts
            .iter()
            .filter(|p| p.account == account)
            .map(|p| p.dascoin)
            .sum()
    }
}

/// Run one distributor tick over `queue` with a budget of `reward_budget`
/// dascoin base units, crediting payments to `ledger`.
///
/// # Errors
/// Conversion and crediting errors, or `EmptyQueueOperation`, all of which
/// indicate a broken invariant. The caller must treat them as fatal to the
/// tick; queue and ledger may be partially updated when this returns `Err`.
pub fn distribute_rewards<L: BalanceLedger>(
    queue: &mut RewardQueue,
    ledger: &mut L,
    reward_budget: ShareType,
) -> Result<DistributionSummary, DascoinError> {
    if reward_budget < 0 {
        return Err(DascoinError::InvalidAmount(format!(
            "reward budget must not be negative, got {}",
            reward_budget
        )));
    }

    let mintable = MAX_DASCOIN_SUPPLY
        .saturating_sub(ledger.total_dascoin_minted())
        .max(0);
    if mintable < reward_budget {
        tracing::warn!(
            budget = %Dascoin::from_units(reward_budget),
            mintable = %Dascoin::from_units(mintable),
            "reward budget capped at remaining supply"
        );
    }

    let mut remaining = reward_budget.min(mintable);
    let mut summary = DistributionSummary::default();

    while remaining > 0 {
        let Some(entry) = queue.peek_front() else {
            break;
        };
        let (id, account, amount, frequency) =
            (entry.id, entry.account, entry.amount, entry.frequency_lock);

        let need = cycles_to_dascoin(amount, frequency)?;

        if need == 0 {
            tracing::warn!(entry = %id, %account, amount, "dropping zero-value queue entry");
            queue.pop_front()?;
            continue;
        }

        if need <= remaining {
            ledger.credit_balance(account, need)?;
            remaining -= need;
            queue.pop_front()?;
            tracing::debug!(
                entry = %id,
                %account,
                paid = %Dascoin::from_units(need),
                "queue entry paid in full"
            );
            summary.payouts.push(Payout {
                entry: id,
                account,
                dascoin: need,
                cycles: amount,
                completed: true,
            });
            continue;
        }

        let paid = remaining;
        let paid_cycles = dascoin_to_cycles(paid, frequency)?;
        ledger.credit_balance(account, paid)?;
        queue.decrement_front(amount - paid_cycles)?;
        remaining = 0;
        tracing::debug!(
            entry = %id,
            %account,
            paid = %Dascoin::from_units(paid),
            remaining_cycles = amount - paid_cycles,
            "queue entry partially paid"
        );
        summary.payouts.push(Payout {
            entry: id,
            account,
            dascoin: paid,
            cycles: paid_cycles,
            completed: false,
        });
    }

    summary.total_paid = reward_budget.min(mintable) - remaining;
    summary.unused_budget = reward_budget - summary.total_paid;
    summary.queue_size = queue.size();

    tracing::info!(
        paid = %Dascoin::from_units(summary.total_paid),
        unused = %Dascoin::from_units(summary.unused_budget),
        payouts = summary.payouts.len(),
        queue_size = summary.queue_size,
        "reward queue distribution complete"
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::InMemoryLedger;
    use crate::queue::{NewQueueEntry, QueueOrigin};
    use chrono::{TimeZone, Utc};
    use dascoin_core::types::{Frequency, DASCOIN_PRECISION};

    fn push(queue: &mut RewardQueue, account: u64, amount: ShareType, frequency: Frequency) {
        queue.append(NewQueueEntry {
            origin: QueueOrigin::ReserveCycles,
            account: AccountId(account),
            amount,
            frequency_lock: frequency,
            created_at: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
            comment: String::new(),
            historic_sum: 0,
        });
    }

    fn das(n: ShareType) -> ShareType {
        n * DASCOIN_PRECISION
    }

    #[test]
    fn test_partial_fill_and_carry_over() {
        let mut queue = RewardQueue::new();
        let mut ledger = InMemoryLedger::new();
        for (account, amount) in [(1, 200), (2, 400), (3, 200), (4, 600)] {
            push(&mut queue, account, amount, 200);
        }

        let summary = distribute_rewards(&mut queue, &mut ledger, das(500)).unwrap();
        assert_eq!(ledger.dascoin_balance(AccountId(1)), das(100));
        assert_eq!(ledger.dascoin_balance(AccountId(2)), das(200));
        assert_eq!(ledger.dascoin_balance(AccountId(3)), das(100));
        assert_eq!(ledger.dascoin_balance(AccountId(4)), das(100));
        assert_eq!(summary.total_paid, das(500));
        assert_eq!(summary.unused_budget, 0);
        assert_eq!(queue.size(), 1);
        assert_eq!(queue.peek_front().unwrap().amount, 400);
        assert!(!summary.payouts[3].completed);
        assert_eq!(summary.payouts[3].cycles, 200);

        let summary = distribute_rewards(&mut queue, &mut ledger, das(500)).unwrap();
        assert_eq!(ledger.dascoin_balance(AccountId(4)), das(300));
        assert_eq!(summary.total_paid, das(200));
        assert_eq!(summary.unused_budget, das(300));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_blocking_entry_starves_later_entries() {
        let mut queue = RewardQueue::new();
        let mut ledger = InMemoryLedger::new();
        push(&mut queue, 1, 2_000, 200); // worth 1000 DAS
        push(&mut queue, 2, 2, 200); // worth 1 DAS, would fit but must wait

        let summary = distribute_rewards(&mut queue, &mut ledger, das(10)).unwrap();
        assert_eq!(ledger.dascoin_balance(AccountId(1)), das(10));
        assert_eq!(ledger.dascoin_balance(AccountId(2)), 0);
        assert_eq!(summary.paid_to(AccountId(2)), 0);
        assert_eq!(queue.size(), 2);
        assert_eq!(queue.peek_front().unwrap().amount, 2_000 - 20);
    }

    #[test]
    fn test_exact_budget_pays_in_full() {
        let mut queue = RewardQueue::new();
        let mut ledger = InMemoryLedger::new();
        push(&mut queue, 1, 200, 200);
        push(&mut queue, 2, 200, 200);

        let summary = distribute_rewards(&mut queue, &mut ledger, das(100)).unwrap();
        assert_eq!(summary.payouts.len(), 1);
        assert!(summary.payouts[0].completed);
        assert_eq!(queue.size(), 1);
        assert_eq!(queue.peek_front().unwrap().account, AccountId(2));
        assert_eq!(queue.peek_front().unwrap().amount, 200);
    }

    #[test]
    fn test_empty_queue_discards_budget() {
        let mut queue = RewardQueue::new();
        let mut ledger = InMemoryLedger::new();
        let summary = distribute_rewards(&mut queue, &mut ledger, das(500)).unwrap();
        assert!(summary.payouts.is_empty());
        assert_eq!(summary.unused_budget, das(500));
        assert_eq!(ledger.total_dascoin_minted(), 0);
    }

    #[test]
    fn test_zero_value_entry_dropped_without_payment() {
        let mut queue = RewardQueue::new();
        let mut ledger = InMemoryLedger::new();
        push(&mut queue, 1, 100, 0);
        push(&mut queue, 2, 200, 200);

        let summary = distribute_rewards(&mut queue, &mut ledger, das(500)).unwrap();
        assert_eq!(ledger.dascoin_balance(AccountId(1)), 0);
        assert_eq!(ledger.dascoin_balance(AccountId(2)), das(100));
        assert_eq!(summary.payouts.len(), 1);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_uses_entry_frequency_lock() {
        let mut queue = RewardQueue::new();
        let mut ledger = InMemoryLedger::new();
        push(&mut queue, 1, 10_000, 300);

        distribute_rewards(&mut queue, &mut ledger, das(10_000)).unwrap();
        assert_eq!(ledger.dascoin_balance(AccountId(1)), 33_333_333);
    }

    #[test]
    fn test_partial_payment_truncates_cycles_in_entry_favour() {
        let mut queue = RewardQueue::new();
        let mut ledger = InMemoryLedger::new();
        push(&mut queue, 1, 10_000, 300);

        // 1 base unit buys 300 / 10^6 cycles, which truncates to 0.
        distribute_rewards(&mut queue, &mut ledger, 1).unwrap();
        assert_eq!(ledger.dascoin_balance(AccountId(1)), 1);
        assert_eq!(queue.peek_front().unwrap().amount, 10_000);
    }

    #[test]
    fn test_budget_capped_at_remaining_supply() {
        let mut queue = RewardQueue::new();
        let mut ledger = InMemoryLedger::new();
        ledger.credit_balance(AccountId(9), MAX_DASCOIN_SUPPLY - 1).unwrap();
        push(&mut queue, 1, 200, 200);

        let summary = distribute_rewards(&mut queue, &mut ledger, das(500)).unwrap();
        assert_eq!(ledger.dascoin_balance(AccountId(1)), 1);
        assert_eq!(ledger.total_dascoin_minted(), MAX_DASCOIN_SUPPLY);
        assert_eq!(summary.total_paid, 1);
        assert_eq!(summary.unused_budget, das(500) - 1);
        assert!(!summary.payouts[0].completed);
        assert_eq!(queue.size(), 1);

        // Nothing left to mint: the next tick pays nothing and succeeds.
        let summary = distribute_rewards(&mut queue, &mut ledger, das(500)).unwrap();
        assert!(summary.payouts.is_empty());
        assert_eq!(summary.unused_budget, das(500));
        assert_eq!(queue.peek_front().unwrap().account, AccountId(1));
    }

    #[test]
    fn test_negative_budget_rejected() {
        let mut queue = RewardQueue::new();
        let mut ledger = InMemoryLedger::new();
        assert!(distribute_rewards(&mut queue, &mut ledger, -1).is_err());
    }
}
