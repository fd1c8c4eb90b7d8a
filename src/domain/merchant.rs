//! Merchant
//!
//! Merchant record with an activity guard. The record does not decide where
//! the guard applies; callers invoke `ensure_active` before operations that
//! require an active merchant.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Merchant {
    id: Uuid,
    name: String,
    is_active: bool,
}

impl Merchant {
    pub fn new(id: Uuid, name: impl Into<String>, is_active: bool) -> Self {
        Self {
            id,
            name: name.into(),
            is_active,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Fail with `DomainError::InactiveMerchant` unless the merchant is active
    pub fn ensure_active(&self) -> Result<(), DomainError> {
        if !self.is_active {
            return Err(DomainError::InactiveMerchant(self.id));
        }
        Ok(())
    }
}
