// crates/dascoin-core/src/lib.rs
//
// dascoin-core: Core types, errors, chain parameters, and ledger interfaces
// for the DasCoin reward queue.
//
// This is the leaf crate of the workspace. It defines the identifiers and
// amount types, the protocol error enum, the versioned chain parameter
// snapshot, license templates, chain authorities, and the trait seams through
// which the queue talks to the general ledger.

pub mod authority;
pub mod error;
pub mod license;
pub mod params;
pub mod traits;
pub mod types;

// Re-export key types for ergonomic access from downstream crates.
// Usage: `use dascoin_core::AccountId;`

pub use authority::ChainAuthorities;
pub use error::DascoinError;
pub use license::{LicenseKind, LicenseType};
pub use params::{ChainParameters, QueueParametersUpdate};
pub use traits::{BalanceLedger, LicenseCatalog};
pub use types::{
    AccountId, Frequency, LicenseTypeId, QueueEntryId, ShareType, Timestamp, DASCOIN_PRECISION,
    DEFAULT_FREQUENCY, FREQUENCY_PRECISION, MAX_DASCOIN_SUPPLY,
};
