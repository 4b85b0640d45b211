// crates/dascoin-core/src/authority.rs
//
// Chain authorities allowed to issue privileged queue operations.
//
// Signature and authority verification happens in the external validation
// layer; here an operation only names its issuer, and a mismatch is surfaced
// as an `UnauthorizedOrigin` rejection.

use serde::{Deserialize, Serialize};

use crate::error::DascoinError;
use crate::types::AccountId;

/// Accounts holding the chain authorities the reward queue cares about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainAuthorities {
    /// May grant reserved cycles into the queue and issue free cycles.
    pub cycle_issuing_authority: AccountId,
    /// May issue licenses and update queue parameters.
    pub license_issuing_authority: AccountId,
}

impl ChainAuthorities {
    pub fn require_cycle_issuer(&self, issuer: AccountId) -> Result<(), DascoinError> {
        if issuer != self.cycle_issuing_authority {
            return Err(DascoinError::UnauthorizedOrigin(format!(
                "{} is not the cycle issuing authority",
                issuer
            )));
        }
        Ok(())
    }

    pub fn require_license_issuer(&self, issuer: AccountId) -> Result<(), DascoinError> {
        if issuer != self.license_issuing_authority {
            return Err(DascoinError::UnauthorizedOrigin(format!(
                "{} is not the license issuing authority",
                issuer
            )));
        }
        Ok(())
    }
}
