//! Domain Error Types
//!
//! Pure domain errors that don't depend on infrastructure.

use thiserror::Error;
use uuid::Uuid;

use super::money::MoneyError;
use super::payment::{PaymentStatus, PaymentTransition};

/// Business rule violations raised by the domain types.
///
/// These are rejected operations, never transient failures: retrying the
/// same call with the same inputs fails the same way. The core does not log
/// them; that is left to the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Money construction or arithmetic violated an invariant
    #[error("Invalid money: {0}")]
    InvalidMoney(#[from] MoneyError),

    /// Ledger entries of different currencies were aggregated together
    #[error("Mixed currencies in ledger: expected {expected}, found {found}")]
    MixedCurrency { expected: String, found: String },

    /// Payment is not in a status that permits the requested transition
    #[error("Cannot {transition} a payment that is {from}")]
    InvalidTransition {
        from: PaymentStatus,
        transition: PaymentTransition,
    },

    /// Merchant is inactive
    #[error("Merchant is inactive: {0}")]
    InactiveMerchant(Uuid),
}

impl DomainError {
    /// Create a mixed currency error
    pub fn mixed_currency(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::MixedCurrency {
            expected: expected.into(),
            found: found.into(),
        }
    }
}
