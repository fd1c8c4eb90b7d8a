//! Ledger Entry
//!
//! Immutable record of a single settled value movement. Corrections are
//! recorded as new entries, never as edits.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::money::Money;

/// A settled movement of money attributed to a merchant and a payment.
///
/// `merchant_id` and `payment_id` are references only; nothing here checks
/// that they exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    id: Uuid,
    merchant_id: Uuid,
    payment_id: Uuid,
    amount: Money,
}

impl LedgerEntry {
    pub fn new(id: Uuid, merchant_id: Uuid, payment_id: Uuid, amount: Money) -> Self {
        Self {
            id,
            merchant_id,
            payment_id,
            amount,
        }
    }

    /// Record a new movement under a freshly generated entry ID
    pub fn record(merchant_id: Uuid, payment_id: Uuid, amount: Money) -> Self {
        Self::new(Uuid::new_v4(), merchant_id, payment_id, amount)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn merchant_id(&self) -> Uuid {
        self.merchant_id
    }

    pub fn payment_id(&self) -> Uuid {
        self.payment_id
    }

    pub fn amount(&self) -> &Money {
        &self.amount
    }
}
