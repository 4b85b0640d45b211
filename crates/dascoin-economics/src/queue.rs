// crates/dascoin-economics/src/queue.rs
//
// The reward queue: an append-at-back / remove-from-front FIFO of pending
// cycle submissions.
//
// Insertion order is the only order in which entries are ever paid. Entries
// are created only by admission, shrunk in place only by the distributor,
// and dropped once their remaining amount reaches zero. Each entry records
// the projected total-ever-minted (`historic_sum`) at the moment it was
// admitted.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use dascoin_core::error::DascoinError;
use dascoin_core::types::{AccountId, Frequency, LicenseTypeId, QueueEntryId, ShareType, Timestamp};

/// How a queue entry came to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QueueOrigin {
    /// The account spent cycles from its own free balance.
    UserSubmit,
    /// The cycle issuing authority granted cycles directly into the queue.
    ReserveCycles,
    /// Issuing a license queued its bonus-scaled cycle amount.
    CharterLicense { license: LicenseTypeId },
}

impl QueueOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueueOrigin::UserSubmit => "user_submit",
            QueueOrigin::ReserveCycles => "reserve_cycles",
            QueueOrigin::CharterLicense { .. } => "charter_license",
        }
    }

    /// The license template, present only for charter submissions.
    pub fn license(&self) -> Option<LicenseTypeId> {
        match self {
            QueueOrigin::CharterLicense { license } => Some(*license),
            _ => None,
        }
    }
}

/// One outstanding promise to mint dascoin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueEntry {
    pub id: QueueEntryId,
    pub origin: QueueOrigin,
    pub account: AccountId,
    /// Cycles not yet converted and paid. Always positive while queued.
    pub amount: ShareType,
    /// Frequency locked at admission; used for every conversion of this entry.
    pub frequency_lock: Frequency,
    pub created_at: Timestamp,
    pub comment: String,
    /// Projected total dascoin ever minted as of this entry's admission.
    pub historic_sum: ShareType,
}

impl QueueEntry {
    pub fn license(&self) -> Option<LicenseTypeId> {
        self.origin.license()
    }
}

/// Entry contents as built by admission, before an id is assigned.
#[derive(Debug, Clone)]
pub struct NewQueueEntry {
    pub origin: QueueOrigin,
    pub account: AccountId,
    pub amount: ShareType,
    pub frequency_lock: Frequency,
    pub created_at: Timestamp,
    pub comment: String,
    pub historic_sum: ShareType,
}

/// The ordered reward queue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardQueue {
    entries: VecDeque<QueueEntry>,
    /// Id handed to the next appended entry.
    next_id: u64,
}

impl RewardQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry at the back and return its 0-based position counted
    /// from the current front.
    pub fn append(&mut self, entry: NewQueueEntry) -> usize {
        let id = QueueEntryId(self.next_id);
        self.next_id += 1;
        self.entries.push_back(QueueEntry {
            id,
            origin: entry.origin,
            account: entry.account,
            amount: entry.amount,
            frequency_lock: entry.frequency_lock,
            created_at: entry.created_at,
            comment: entry.comment,
            historic_sum: entry.historic_sum,
        });
        self.entries.len() - 1
    }

    pub fn peek_front(&self) -> Option<&QueueEntry> {
        self.entries.front()
    }

    /// Remove and return the front entry.
    ///
    /// # Errors
    /// `DascoinError::EmptyQueueOperation` on an empty queue.
    pub fn pop_front(&mut self) -> Result<QueueEntry, DascoinError> {
        self.entries
            .pop_front()
            .ok_or(DascoinError::EmptyQueueOperation("pop_front"))
    }

    /// Rewrite the front entry's remaining amount without moving it.
    ///
    /// # Errors
    /// `DascoinError::EmptyQueueOperation` on an empty queue.
    pub fn decrement_front(&mut self, remaining_amount: ShareType) -> Result<(), DascoinError> {
        let front = self
            .entries
            .front_mut()
            .ok_or(DascoinError::EmptyQueueOperation("decrement_front"))?;
        front.amount = remaining_amount;
        Ok(())
    }

    pub fn size(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in FIFO order.
    pub fn iter(&self) -> impl Iterator<Item = &QueueEntry> {
        self.entries.iter()
    }

    /// Every entry owned by `account`, paired with its absolute position
    /// from the current front, in FIFO order.
    pub fn positions_for(&self, account: AccountId) -> Vec<(usize, &QueueEntry)> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.account == account)
            .collect()
    }

    /// Historic sum of the newest entry, or `total_minted` when the queue is
    /// empty.
    pub fn historic_total(&self, total_minted: ShareType) -> ShareType {
        self.entries
            .back()
            .map(|e| e.historic_sum)
            .unwrap_or(total_minted)
    }
}
