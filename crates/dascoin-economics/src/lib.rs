// crates/dascoin-economics/src/lib.rs
//
// dascoin-economics: cycle to dascoin conversion, the reward queue,
// submission admission, and budgeted interval distribution for DasCoin.
//
// All dascoin values are tracked in base units.
// 1 DAS = 10,000 base units (10^4).

pub mod access;
pub mod admission;
pub mod chain;
pub mod conversion;
pub mod distribution;
pub mod ledger;
pub mod licenses;
pub mod queue;
pub mod token;

// Re-export key types for ergonomic access from downstream crates.
pub use access::{AccessLayer, CycleAgreement, SubmissionWithPosition};
pub use admission::{
    issue_chartered_license, push_queue_submission, submit_cycles, submit_reserve_cycles,
    LicenseIssuance, ReserveCyclesRequest, Submission,
};
pub use chain::{BlockReport, ChainSnapshot, ChainState, Operation, OperationOutcome};
pub use conversion::{cycles_to_dascoin, dascoin_to_cycles};
pub use distribution::{distribute_rewards, DistributionSummary, Payout};
pub use ledger::{AccountBalances, InMemoryLedger};
pub use licenses::InMemoryLicenseCatalog;
pub use queue::{NewQueueEntry, QueueEntry, QueueOrigin, RewardQueue};
pub use token::Dascoin;
