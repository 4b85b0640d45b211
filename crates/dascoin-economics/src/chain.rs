// crates/dascoin-economics/src/chain.rs
//
// The ledger state machine that owns the reward queue.
//
// Transitions are applied strictly one at a time in ledger-commit order:
//   - `apply` admits one operation. Every operation validates before it
//     mutates, so a rejected operation leaves no trace.
//   - `advance_to` moves ledger time forward and runs the distributor once for
//     every reward boundary crossed while the queue is enabled. Boundaries sit
//     at multiples of the reward interval counted from the moment the queue
//     was (last) enabled or its interval changed.
//   - Each tick runs one distribution on copies of the queue and the ledger and
//     commits them only on success. `advance_to` and `push_block` roll the
//     whole call back when any tick fails.
//
// Ledger time is the only clock. Nothing here reads the wall clock.

use serde::{Deserialize, Serialize};

use dascoin_core::authority::ChainAuthorities;
use dascoin_core::error::DascoinError;
use dascoin_core::params::{ChainParameters, QueueParametersUpdate};
use dascoin_core::traits::{BalanceLedger, LicenseCatalog};
use dascoin_core::types::{AccountId, Frequency, ShareType, Timestamp};

use crate::access::AccessLayer;
use crate::admission::{
    issue_chartered_license, submit_cycles, submit_reserve_cycles, LicenseIssuance,
    ReserveCyclesRequest,
};
use crate::distribution::{distribute_rewards, DistributionSummary};
use crate::ledger::InMemoryLedger;
use crate::licenses::InMemoryLicenseCatalog;
use crate::queue::RewardQueue;
use crate::token::Dascoin;

/// Operations the reward queue state machine accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    /// `user_submit`: spend free cycles into the queue.
    SubmitCyclesToQueue { account: AccountId, amount: ShareType },
    /// `reserve_cycles`: the cycle issuer grants cycles into the queue.
    SubmitReserveCyclesToQueue(ReserveCyclesRequest),
    /// `charter_license`: issue a license and queue its cycles.
    IssueLicense(LicenseIssuance),
    /// Governance update of the queue parameters.
    UpdateQueueParameters {
        issuer: AccountId,
        #[serde(default)]
        enable_dascoin_queue: Option<bool>,
        #[serde(default)]
        reward_interval_time_seconds: Option<u32>,
        #[serde(default)]
        dascoin_reward_amount: Option<ShareType>,
    },
    /// Governance update of the global frequency used by new user submissions.
    UpdateGlobalFrequency { issuer: AccountId, frequency: Frequency },
    /// The cycle issuer adds free cycles to an account.
    IssueCycles {
        issuer: AccountId,
        account: AccountId,
        amount: ShareType,
    },
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::SubmitCyclesToQueue { .. } => "submit_cycles_to_queue",
            Operation::SubmitReserveCyclesToQueue(_) => "submit_reserve_cycles_to_queue",
            Operation::IssueLicense(_) => "issue_license",
            Operation::UpdateQueueParameters { .. } => "update_queue_parameters",
            Operation::UpdateGlobalFrequency { .. } => "update_global_frequency",
            Operation::IssueCycles { .. } => "issue_cycles",
        }
    }
}

/// What an accepted operation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum OperationOutcome {
    /// A queue entry was appended at `position`.
    Queued { position: usize },
    /// The operation changed balances or parameters without queueing.
    Applied,
}

impl OperationOutcome {
    pub fn position(&self) -> Option<usize> {
        match self {
            OperationOutcome::Queued { position } => Some(*position),
            OperationOutcome::Applied => None,
        }
    }
}

/// Per-block result of `push_block`.
#[derive(Debug, Clone, Default)]
pub struct BlockReport {
    /// One result per operation, in block order. Rejected operations are
    /// reported here and otherwise ignored.
    pub outcomes: Vec<Result<OperationOutcome, DascoinError>>,
    /// One summary per reward boundary crossed by this block.
    pub distributions: Vec<DistributionSummary>,
}

/// By-value copy of everything a transition can change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainSnapshot<L> {
    pub queue: RewardQueue,
    pub ledger: L,
    pub params: ChainParameters,
    pub head_time: Timestamp,
    pub next_reward_time: Option<Timestamp>,
}

/// The reward queue state machine.
pub struct ChainState<L = InMemoryLedger, C = InMemoryLicenseCatalog> {
    queue: RewardQueue,
    ledger: L,
    catalog: C,
    params: ChainParameters,
    authorities: ChainAuthorities,
    head_time: Timestamp,
    next_reward_time: Option<Timestamp>,
}

impl<L, C> ChainState<L, C>
where
    L: BalanceLedger + Clone,
    C: LicenseCatalog,
{
    /// Create a state machine at `genesis_time`.
    ///
    /// If the queue starts enabled, the first reward boundary is one interval
    /// after genesis.
    ///
    /// # Errors
    /// `InvalidParameter` if `params` fail validation.
    pub fn new(
        ledger: L,
        catalog: C,
        params: ChainParameters,
        authorities: ChainAuthorities,
        genesis_time: Timestamp,
    ) -> Result<Self, DascoinError> {
        params.validate()?;
        let next_reward_time = params
            .enable_dascoin_queue
            .then(|| genesis_time + params.reward_interval());
        Ok(Self {
            queue: RewardQueue::new(),
            ledger,
            catalog,
            params,
            authorities,
            head_time: genesis_time,
            next_reward_time,
        })
    }

    pub fn current_ledger_time(&self) -> Timestamp {
        self.head_time
    }

    pub fn params(&self) -> &ChainParameters {
        &self.params
    }

    pub fn authorities(&self) -> &ChainAuthorities {
        &self.authorities
    }

    pub fn queue(&self) -> &RewardQueue {
        &self.queue
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn next_reward_time(&self) -> Option<Timestamp> {
        self.next_reward_time
    }

    /// Read-only query surface over the current state.
    pub fn access(&self) -> AccessLayer<'_, L, C> {
        AccessLayer::new(&self.queue, &self.ledger, &self.catalog)
    }

    /// Apply one operation at the current ledger time.
    pub fn apply(&mut self, op: Operation) -> Result<OperationOutcome, DascoinError> {
        let name = op.name();
        let result = self.apply_inner(op);
        if let Err(e) = &result {
            tracing::debug!(op = name, kind = e.kind(), error = %e, "operation rejected");
        }
        result
    }

    fn apply_inner(&mut self, op: Operation) -> Result<OperationOutcome, DascoinError> {
        let now = self.head_time;
        match op {
            Operation::SubmitCyclesToQueue { account, amount } => {
                let position = submit_cycles(
                    &mut self.queue,
                    &mut self.ledger,
                    &self.params,
                    account,
                    amount,
                    now,
                )?;
                Ok(OperationOutcome::Queued { position })
            }
            Operation::SubmitReserveCyclesToQueue(request) => {
                let position = submit_reserve_cycles(
                    &mut self.queue,
                    &self.ledger,
                    &self.authorities,
                    request,
                    now,
                )?;
                Ok(OperationOutcome::Queued { position })
            }
            Operation::IssueLicense(request) => {
                let position = issue_chartered_license(
                    &mut self.queue,
                    &self.ledger,
                    &self.catalog,
                    &self.authorities,
                    request,
                    now,
                )?;
                Ok(OperationOutcome::Queued { position })
            }
            Operation::UpdateQueueParameters {
                issuer,
                enable_dascoin_queue,
                reward_interval_time_seconds,
                dascoin_reward_amount,
            } => {
                self.authorities.require_license_issuer(issuer)?;
                let update = QueueParametersUpdate {
                    enable_dascoin_queue,
                    reward_interval_time_seconds,
                    dascoin_reward_amount,
                };
                let next = self.params.with_queue_update(&update)?;
                self.install_params(next);
                Ok(OperationOutcome::Applied)
            }
            Operation::UpdateGlobalFrequency { issuer, frequency } => {
                self.authorities.require_license_issuer(issuer)?;
                let next = self.params.with_frequency(frequency)?;
                tracing::info!(frequency, version = next.version, "global frequency updated");
                self.params = next;
                Ok(OperationOutcome::Applied)
            }
            Operation::IssueCycles {
                issuer,
                account,
                amount,
            } => {
                self.authorities.require_cycle_issuer(issuer)?;
                self.ledger.issue_cycles(account, amount)?;
                Ok(OperationOutcome::Applied)
            }
        }
    }

    /// Swap in a new parameter snapshot and re-arm the reward schedule.
    fn install_params(&mut self, next: ChainParameters) {
        let was_enabled = self.params.enable_dascoin_queue;
        let interval_changed =
            next.reward_interval_time_seconds != self.params.reward_interval_time_seconds;

        self.next_reward_time = match (was_enabled, next.enable_dascoin_queue) {
            (_, false) => None,
            (false, true) => Some(self.head_time + next.reward_interval()),
            (true, true) if interval_changed => Some(self.head_time + next.reward_interval()),
            (true, true) => self.next_reward_time,
        };

        tracing::info!(
            version = next.version,
            enabled = next.enable_dascoin_queue,
            interval_seconds = next.reward_interval_time_seconds,
            budget = %Dascoin::from_units(next.dascoin_reward_amount),
            "queue parameters updated"
        );
        self.params = next;
    }

    /// Run one distribution with the current budget.
    ///
    /// The distribution runs on copies of the queue and the ledger; they are
    /// committed only if it succeeds.
    fn tick(&mut self) -> Result<DistributionSummary, DascoinError> {
        let mut queue = self.queue.clone();
        let mut ledger = self.ledger.clone();
        let budget = self.params.dascoin_reward_amount;
        let summary = distribute_rewards(&mut queue, &mut ledger, budget).inspect_err(|e| {
            if e.is_fatal() {
                tracing::error!(kind = e.kind(), error = %e, "reward distribution aborted");
            } else {
                tracing::warn!(kind = e.kind(), error = %e, "reward distribution rejected");
            }
        })?;
        self.queue = queue;
        self.ledger = ledger;
        Ok(summary)
    }

    /// Move ledger time to `time`, running one distribution for each reward
    /// boundary at or before it.
    ///
    /// # Errors
    /// `InvalidParameter` if `time` is earlier than the current ledger time;
    /// any distribution error. On error the state is rolled back to what it
    /// was before the call, ticks for earlier boundaries included.
    pub fn advance_to(
        &mut self,
        time: Timestamp,
    ) -> Result<Vec<DistributionSummary>, DascoinError> {
        self.check_time(time)?;
        let before = self.snapshot();
        let result = self.run_due_ticks(time);
        if result.is_err() {
            self.restore(before);
        }
        result
    }

    fn check_time(&self, time: Timestamp) -> Result<(), DascoinError> {
        if time < self.head_time {
            return Err(DascoinError::InvalidParameter(format!(
                "ledger time cannot move backwards: {} -> {}",
                self.head_time, time
            )));
        }
        Ok(())
    }

    fn run_due_ticks(&mut self, time: Timestamp) -> Result<Vec<DistributionSummary>, DascoinError> {
        self.head_time = time;
        let mut summaries = Vec::new();
        while self.params.enable_dascoin_queue {
            let Some(boundary) = self.next_reward_time else {
                break;
            };
            if boundary > time {
                break;
            }
            tracing::debug!(%boundary, "reward interval boundary reached");
            summaries.push(self.tick()?);
            self.next_reward_time = Some(boundary + self.params.reward_interval());
        }
        Ok(summaries)
    }

    /// Apply a whole block: move to `time`, admit `ops` in order, then run
    /// any distributions that became due.
    ///
    /// The block is all or nothing. If a distribution fails, the state is
    /// rolled back to before the block, its accepted operations included.
    pub fn push_block(
        &mut self,
        time: Timestamp,
        ops: impl IntoIterator<Item = Operation>,
    ) -> Result<BlockReport, DascoinError> {
        self.check_time(time)?;
        let before = self.snapshot();
        self.head_time = time;
        let outcomes = ops.into_iter().map(|op| self.apply(op)).collect();
        let distributions = match self.run_due_ticks(time) {
            Ok(distributions) => distributions,
            Err(e) => {
                self.restore(before);
                return Err(e);
            }
        };
        Ok(BlockReport {
            outcomes,
            distributions,
        })
    }

    pub fn snapshot(&self) -> ChainSnapshot<L> {
        ChainSnapshot {
            queue: self.queue.clone(),
            ledger: self.ledger.clone(),
            params: self.params.clone(),
            head_time: self.head_time,
            next_reward_time: self.next_reward_time,
        }
    }

    /// Roll back to a snapshot taken earlier with `snapshot`.
    pub fn restore(&mut self, snapshot: ChainSnapshot<L>) {
        self.queue = snapshot.queue;
        self.ledger = snapshot.ledger;
        self.params = snapshot.params;
        self.head_time = snapshot.head_time;
        self.next_reward_time = snapshot.next_reward_time;
    }
}
