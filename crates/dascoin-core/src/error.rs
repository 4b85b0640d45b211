use thiserror::Error;

use crate::types::{AccountId, ShareType};

/// Protocol-wide error types for the DasCoin reward queue.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DascoinError {
    /// Amount is negative, or zero where a positive amount is required.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Frequency is zero or negative.
    #[error("Invalid frequency: {0}")]
    InvalidFrequency(String),

    /// A user submission tried to spend more cycles than the account holds.
    #[error(
        "Insufficient balance on account {account}: requested {requested}, available {available}"
    )]
    InsufficientBalance {
        account: AccountId,
        requested: ShareType,
        available: ShareType,
    },

    /// An operation that requires a chain authority was issued by someone else.
    #[error("Unauthorized origin: {0}")]
    UnauthorizedOrigin(String),

    /// A license issuance referenced a template missing from the catalogue.
    #[error("Unknown license: {0}")]
    UnknownLicense(String),

    /// Popping or rewriting the front of an empty reward queue.
    /// This is an invariant violation and aborts the triggering transition.
    #[error("Empty queue operation: {0}")]
    EmptyQueueOperation(&'static str),

    /// A governance parameter update failed validation.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Fixed-point arithmetic left the representable range.
    #[error("Arithmetic overflow: {0}")]
    ArithmeticOverflow(&'static str),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl DascoinError {
    /// Stable snake_case kind, used when surfacing a declined operation.
    pub fn kind(&self) -> &'static str {
        match self {
            DascoinError::InvalidAmount(_) => "invalid_amount",
            DascoinError::InvalidFrequency(_) => "invalid_frequency",
            DascoinError::InsufficientBalance { .. } => "insufficient_balance",
            DascoinError::UnauthorizedOrigin(_) => "unauthorized_origin",
            DascoinError::UnknownLicense(_) => "unknown_license",
            DascoinError::EmptyQueueOperation(_) => "empty_queue_operation",
            DascoinError::InvalidParameter(_) => "invalid_parameter",
            DascoinError::NotFound(_) => "not_found",
            DascoinError::ArithmeticOverflow(_) => "arithmetic_overflow",
            DascoinError::Serialization(_) => "serialization",
        }
    }

    /// Whether the error is an internal invariant violation rather than a
    /// rejected input.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            DascoinError::EmptyQueueOperation(_) | DascoinError::ArithmeticOverflow(_)
        )
    }
}

impl From<serde_json::Error> for DascoinError {
    fn from(e: serde_json::Error) -> Self {
        DascoinError::Serialization(e.to_string())
    }
}
